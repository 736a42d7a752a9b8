//! Board — the settled grid of symbol indices.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Number of reels on the board.
pub const REEL_COUNT: usize = 5;

/// Visible rows per reel.
pub const ROWS_PER_REEL: usize = 3;

/// Flat cell count of a settled board.
pub const BOARD_CELLS: usize = REEL_COUNT * ROWS_PER_REEL;

/// Settled outcome grid: a flat, reel-major sequence of 0-based symbol
/// indices (`cell = reel * 3 + row`). Replaced atomically each round; an
/// empty board means a round is in flight with no outcome yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board(Vec<usize>);

impl Board {
    /// Empty board (round started, outcome pending).
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parse the wire form: 15 comma-separated 1-based symbol indices,
    /// e.g. `"3,1,4,1,5,9,2,6,5,3,5,8,9,7,9"`.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let cells = raw
            .split(',')
            .map(|cell| {
                let value = cell
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ParseError::InvalidSymbolIndex(cell.to_string()))?;
                if value == 0 {
                    return Err(ParseError::SymbolIndexOutOfRange(value));
                }
                Ok((value - 1) as usize)
            })
            .collect::<Result<Vec<_>, _>>()?;

        if cells.len() != BOARD_CELLS {
            return Err(ParseError::WrongBoardSize(cells.len()));
        }
        Ok(Self(cells))
    }

    /// Build from already 0-based cells (tests, canned results).
    pub fn from_cells(cells: Vec<usize>) -> Result<Self, ParseError> {
        if cells.len() != BOARD_CELLS {
            return Err(ParseError::WrongBoardSize(cells.len()));
        }
        Ok(Self(cells))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[usize] {
        &self.0
    }

    /// The 3 cells for one reel, top to bottom.
    ///
    /// Panics on an empty board or an out-of-range reel; callers only slice
    /// a populated board.
    pub fn reel_slice(&self, reel: usize) -> &[usize] {
        let start = reel * ROWS_PER_REEL;
        &self.0[start..start + ROWS_PER_REEL]
    }
}
