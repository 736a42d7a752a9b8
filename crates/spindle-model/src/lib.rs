//! # spindle-model — slot game state and round outcomes
//!
//! The data side of the Spindle slot machine: bet/win scalars with change
//! notification, the settled symbol board, win lines, round-result payload
//! parsing, and the outcome-source boundary with its local fallback table.
//!
//! Nothing in this crate animates or renders; it is consumed by
//! `spindle-reels`, which turns board changes into reel transitions.

pub mod board;
pub mod error;
pub mod game;
pub mod observe;
pub mod outcome;
pub mod round;
pub mod winline;

pub use board::{Board, BOARD_CELLS, REEL_COUNT, ROWS_PER_REEL};
pub use error::ParseError;
pub use game::{GameModel, MAX_BET, MIN_BET};
pub use observe::Listeners;
pub use outcome::{LocalOutcomeTable, OutcomeError, OutcomeSource};
pub use round::{RawRoundResult, RoundResult};
pub use winline::WinLine;
