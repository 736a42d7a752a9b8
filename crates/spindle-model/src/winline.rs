//! WinLine — one paying pattern on the settled board.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A winning line from a round result. Immutable once parsed.
///
/// Wire format: `"num~win~i,j,k"` — line number, payout for this line, and
/// the flat board cell indices (0-based) the line covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLine {
    /// Line number as reported by the outcome service.
    pub num: u32,
    /// Payout for this line.
    pub win: u64,
    /// Flat board cell indices covered by the line.
    pub board_symbol_indexes: Vec<usize>,
}

impl WinLine {
    /// Parse the `num~win~indexes` wire form.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let mut parts = raw.splitn(3, '~');
        let (num, win, indexes) = match (parts.next(), parts.next(), parts.next()) {
            (Some(num), Some(win), Some(indexes)) => (num, win, indexes),
            _ => return Err(ParseError::MalformedWinLine(raw.to_string())),
        };

        let num = num
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidWinLineNumber(num.to_string()))?;
        let win = win
            .parse::<u64>()
            .map_err(|_| ParseError::InvalidWinLineNumber(win.to_string()))?;
        let board_symbol_indexes = indexes
            .split(',')
            .map(|idx| {
                idx.parse::<usize>()
                    .map_err(|_| ParseError::InvalidWinLineNumber(idx.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            num,
            win,
            board_symbol_indexes,
        })
    }
}
