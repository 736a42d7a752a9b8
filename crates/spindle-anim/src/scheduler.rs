//! Scheduler — per-frame resumption of active routines
//!
//! Holds the set of in-flight routines and resumes all of them once per
//! rendering frame, in insertion order, synchronously. Routines registered
//! from within a completion callback go through a spawn queue and are first
//! resumed on the following tick.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::routine::Routine;

/// Handle for registering routines from inside effect or completion
/// callbacks while a tick is in progress.
#[derive(Clone, Default)]
pub struct SpawnHandle {
    pending: Arc<Mutex<Vec<Routine>>>,
}

impl SpawnHandle {
    /// Queue a routine; it joins the active set at the start of the next tick.
    pub fn spawn(&self, routine: Routine) {
        self.pending.lock().push(routine);
    }
}

/// The frame-driven routine scheduler.
///
/// Single-threaded and cooperative: `tick` is expected to be called once per
/// rendering frame by whichever component owns the frame loop. There is no
/// cancellation; a routine runs until it retires itself.
#[derive(Default)]
pub struct Scheduler {
    active: Vec<Routine>,
    spawn: SpawnHandle,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for deferred registration from callbacks.
    pub fn handle(&self) -> SpawnHandle {
        self.spawn.clone()
    }

    /// Register a routine directly (outside a tick). It is resumed starting
    /// with the next `tick` call, after all earlier registrations.
    pub fn add(&mut self, routine: Routine) {
        self.active.push(routine);
    }

    /// Resume every active routine with the current timestamp and retire
    /// the finished ones.
    pub fn tick(&mut self, now_ms: f64) {
        // Adopt callback-spawned routines before resuming, so anything
        // queued during the previous tick runs from this one on.
        let mut adopted = std::mem::take(&mut *self.spawn.pending.lock());
        self.active.append(&mut adopted);

        self.active.retain_mut(|routine| !routine.tick(now_ms));
    }

    /// Number of in-flight routines (excluding queued spawns).
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// True when nothing is in flight or queued.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty() && self.spawn.pending.lock().is_empty()
    }
}
