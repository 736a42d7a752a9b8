//! # spindle-anim — frame-driven animation primitives
//!
//! The timing core of the Spindle slot machine: easing curves, resumable
//! timed tweens, effect-driving routines and the per-frame scheduler that
//! resumes them.
//!
//! ## Model
//!
//! Everything is cooperative and single-threaded. The embedder samples a
//! wall-clock timestamp once per rendering frame and passes it down; every
//! animation derives its progress from that timestamp, never from frame
//! counts, so durations stay accurate under frame-rate jitter.
//!
//! ```text
//! host frame loop
//!     │  now_ms
//!     v
//! Scheduler::tick ──> Routine::tick ──> Tween::tick ──> Easing::evaluate
//!                       │                                      │
//!                       └── effect(eased) / on_complete        └── eased t
//! ```

pub mod clock;
pub mod easing;
pub mod routine;
pub mod scheduler;
pub mod tween;

pub use clock::FrameClock;
pub use easing::{lerp, Easing};
pub use routine::Routine;
pub use scheduler::{Scheduler, SpawnHandle};
pub use tween::{Step, Tween};
