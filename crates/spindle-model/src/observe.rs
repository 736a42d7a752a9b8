//! Typed listener registries.
//!
//! Each event kind is its own `Listeners<T>` field on the model rather than
//! a string-keyed channel on one generic emitter; dispatch is synchronous
//! and in subscription order. No subscribers means emit is a silent no-op.

/// Callback registry for one event kind.
pub struct Listeners<T> {
    subs: Vec<Box<dyn FnMut(&T) + Send>>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self { subs: Vec::new() }
    }

    /// Register a listener. Listeners cannot be removed; they live as long
    /// as the model does.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + Send + 'static) {
        self.subs.push(Box::new(listener));
    }

    /// Synchronously invoke every listener with `value`.
    pub fn emit(&mut self, value: &T) {
        for sub in &mut self.subs {
            sub(value);
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}
