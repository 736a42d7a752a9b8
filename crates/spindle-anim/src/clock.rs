//! Wall-clock timestamp source for embedders with a real frame loop.

use std::time::Instant;

/// Millisecond clock anchored at construction.
///
/// The animation core never reads time itself; a host samples this once per
/// frame and passes the value down. Headless tests and the simulator use a
/// synthetic counter instead.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds elapsed since construction.
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
