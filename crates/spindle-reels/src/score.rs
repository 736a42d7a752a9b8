//! Win score display state.
//!
//! The count-up and reveal animations run as free-standing scheduler
//! routines; they write through a shared handle that the renderer reads
//! each frame.

use std::sync::Arc;

use parking_lot::Mutex;

/// Renderable score state. `value` is `None` while no win is shown.
#[derive(Debug, Clone)]
pub struct ScoreDisplay {
    pub value: Option<u64>,
    pub alpha: f64,
    pub scale: f64,
}

impl Default for ScoreDisplay {
    fn default() -> Self {
        Self {
            value: None,
            alpha: 1.0,
            scale: 0.25,
        }
    }
}

/// Shared handle cloned into the animation routines.
pub type ScoreHandle = Arc<Mutex<ScoreDisplay>>;

pub fn new_handle() -> ScoreHandle {
    Arc::new(Mutex::new(ScoreDisplay::default()))
}
