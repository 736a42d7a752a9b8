//! Error types for wire-payload parsing.

use thiserror::Error;

/// Failure while turning a round-result payload into model types.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid symbol index '{0}'")]
    InvalidSymbolIndex(String),

    #[error("symbol index {0} is 1-based on the wire and must be >= 1")]
    SymbolIndexOutOfRange(u64),

    #[error("board has {0} cells, expected {expected}", expected = crate::board::BOARD_CELLS)]
    WrongBoardSize(usize),

    #[error("win line '{0}' is not of the form num~win~indexes")]
    MalformedWinLine(String),

    #[error("invalid number '{0}' in win line")]
    InvalidWinLineNumber(String),

    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),
}
