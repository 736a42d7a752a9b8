//! # spindle-reels — reel animation and round orchestration
//!
//! The presentation core of the Spindle slot machine, headless: reel
//! spin-up/spin-down state machines with overshoot settle, the FIFO action
//! queue that serializes board transitions, win highlighting, the score
//! display, and the session glue that ties them to the game model and an
//! outcome source.
//!
//! ## Frame contract
//!
//! The embedder calls [`GameSession::update`] (or
//! [`orchestrator::RoundOrchestrator::update`] directly) once per rendering
//! frame with wall-clock milliseconds and the frame delta in seconds, then
//! reads retained state: symbol cells (offset/texture/brightness), reel blur
//! and the score display. Sound cues arrive through [`audio::AudioSink`].
//!
//! ## Ordering guarantees
//!
//! - board transitions run strictly FIFO, never overlapping;
//! - every reel settles before any win highlight starts;
//! - a new bet is ignored until the previous round's visuals complete.

pub mod audio;
pub mod orchestrator;
pub mod queue;
pub mod reel;
pub mod score;
pub mod session;
pub mod symbol;

pub use audio::{AudioCue, AudioSink, NullAudio};
pub use orchestrator::{RoundCtx, RoundOrchestrator};
pub use queue::{ActionQueue, Transition};
pub use reel::{Reel, ReelConfig, ReelState};
pub use score::{ScoreDisplay, ScoreHandle};
pub use session::GameSession;
pub use symbol::SymbolCell;
