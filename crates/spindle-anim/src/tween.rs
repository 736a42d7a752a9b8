//! Tween — a resumable timed interpolation step
//!
//! The explicit-state replacement for a suspended generator: each `tick`
//! resumes the computation with the current timestamp and reports eased
//! progress, firing the final step exactly once.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// Result of resuming a [`Tween`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Still in flight; carries the eased progress for this frame.
    Running(f64),
    /// Duration elapsed; carries the eased value at `t = 1`. Reported
    /// exactly once, after which the tween is spent.
    Finished(f64),
    /// Already spent; resuming is a no-op.
    Idle,
}

/// A timed interpolation over a fixed duration and easing curve.
///
/// The start timestamp is captured lazily on the first `tick`, so a tween
/// held by a delayed phase does not age while waiting. The first resume
/// always reports eased progress at `t = 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tween {
    easing: Easing,
    duration_ms: f64,
    start_ms: Option<f64>,
    spent: bool,
}

impl Tween {
    /// Create a tween.
    ///
    /// Panics on a non-positive duration; that is a programmer error, not
    /// a recoverable condition.
    pub fn new(easing: Easing, duration_ms: f64) -> Self {
        assert!(
            duration_ms > 0.0,
            "tween duration must be positive, got {duration_ms}"
        );
        Self {
            easing,
            duration_ms,
            start_ms: None,
            spent: false,
        }
    }

    /// Resume the tween at `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Step {
        if self.spent {
            return Step::Idle;
        }
        let start = *self.start_ms.get_or_insert(now_ms);
        if now_ms < start + self.duration_ms {
            let t = (now_ms - start) / self.duration_ms;
            Step::Running(self.easing.evaluate(t))
        } else {
            self.spent = true;
            Step::Finished(self.easing.evaluate(1.0))
        }
    }

    /// Total duration in milliseconds.
    #[inline]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Timestamp of the first resume, if any.
    #[inline]
    pub fn started_at(&self) -> Option<f64> {
        self.start_ms
    }

    /// Whether the final step has been reported.
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.spent
    }
}
