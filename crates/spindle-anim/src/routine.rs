//! Routine — a tween driving an effect callback
//!
//! The full coroutine contract: each resume applies the eased value through
//! an effect closure; after the duration elapses the effect runs once with
//! the curve value at `t = 1`, then the completion callback fires exactly
//! once, then the routine is retired.

use crate::easing::Easing;
use crate::tween::{Step, Tween};

type Effect = Box<dyn FnMut(f64) + Send>;
type Completion = Box<dyn FnOnce() + Send>;

/// A scheduled animation unit.
///
/// Completion notification is optional; the two shapes get separate
/// constructors rather than one overloaded parameter slot.
pub struct Routine {
    tween: Tween,
    effect: Effect,
    on_complete: Option<Completion>,
}

impl Routine {
    /// Routine that invokes `on_complete` after its final effect call.
    pub fn with_callback(
        effect: impl FnMut(f64) + Send + 'static,
        easing: Easing,
        on_complete: impl FnOnce() + Send + 'static,
        duration_ms: f64,
    ) -> Self {
        Self {
            tween: Tween::new(easing, duration_ms),
            effect: Box::new(effect),
            on_complete: Some(Box::new(on_complete)),
        }
    }

    /// Routine with no completion callback.
    pub fn fire_and_forget(
        effect: impl FnMut(f64) + Send + 'static,
        easing: Easing,
        duration_ms: f64,
    ) -> Self {
        Self {
            tween: Tween::new(easing, duration_ms),
            effect: Box::new(effect),
            on_complete: None,
        }
    }

    /// Resume the routine. Returns `true` once it has retired; further
    /// resumes are no-ops.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.tween.tick(now_ms) {
            Step::Running(eased) => {
                (self.effect)(eased);
                false
            }
            Step::Finished(eased) => {
                (self.effect)(eased);
                if let Some(callback) = self.on_complete.take() {
                    callback();
                }
                true
            }
            Step::Idle => true,
        }
    }

    /// Whether the routine has run to completion.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.tween.is_spent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_effect_sees_final_value_once() {
        let values = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = values.clone();
        let mut routine = Routine::fire_and_forget(
            move |t| sink.lock().push(t),
            Easing::Linear,
            100.0,
        );

        for frame in 0..8 {
            routine.tick(frame as f64 * 20.0);
        }

        let seen = values.lock();
        // 0, 0.2, 0.4, 0.6, 0.8, then the final 1.0 — and nothing after.
        assert_eq!(seen.len(), 6);
        assert_eq!(*seen.last().unwrap(), 1.0);
        assert_eq!(seen.iter().filter(|&&v| v == 1.0).count(), 1);
    }

    #[test]
    fn test_completion_fires_exactly_once_after_final_effect() {
        let effect_calls = Arc::new(AtomicUsize::new(0));
        let completions = Arc::new(AtomicUsize::new(0));
        let effects = effect_calls.clone();
        let effects_at_completion = effect_calls.clone();
        let done = completions.clone();

        let mut routine = Routine::with_callback(
            move |_| {
                effects.fetch_add(1, Ordering::SeqCst);
            },
            Easing::Linear,
            move || {
                // The final effect call has already happened.
                assert!(effects_at_completion.load(Ordering::SeqCst) > 0);
                done.fetch_add(1, Ordering::SeqCst);
            },
            50.0,
        );

        routine.tick(0.0);
        assert_eq!(completions.load(Ordering::SeqCst), 0);
        assert!(routine.tick(60.0));
        assert!(routine.tick(70.0));
        assert!(routine.tick(80.0));
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_retired_routine_stops_driving_effect() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut routine = Routine::fire_and_forget(
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            Easing::Linear,
            10.0,
        );

        routine.tick(0.0);
        routine.tick(20.0);
        let after_finish = calls.load(Ordering::SeqCst);
        routine.tick(30.0);
        routine.tick(40.0);
        assert_eq!(calls.load(Ordering::SeqCst), after_finish);
    }
}
