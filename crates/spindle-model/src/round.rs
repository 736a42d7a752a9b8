//! Round result — wire payload and its parsed form.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::ParseError;
use crate::winline::WinLine;

/// The outcome service's JSON shape, exactly as it arrives:
/// board as one comma-joined string, win lines as `num~win~indexes` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRoundResult {
    pub win: u64,
    pub board: String,
    pub winlines: Vec<String>,
}

/// A fully parsed round outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// Total round payout as reported by the service.
    pub win: u64,
    /// Settled board, 0-based cells.
    pub board: Board,
    /// Winning lines, possibly empty.
    pub win_lines: Vec<WinLine>,
}

impl RoundResult {
    /// Parse a raw JSON payload string.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let raw: RawRoundResult = serde_json::from_str(json)?;
        Self::try_from(raw)
    }
}

impl TryFrom<RawRoundResult> for RoundResult {
    type Error = ParseError;

    fn try_from(raw: RawRoundResult) -> Result<Self, ParseError> {
        let board = Board::parse(&raw.board)?;
        let win_lines = raw
            .winlines
            .iter()
            .map(|line| WinLine::parse(line))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            win: raw.win,
            board,
            win_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_payload_end_to_end() {
        let result = RoundResult::from_json(
            r#"{"win":25,"board":"3,1,4,1,5,9,2,6,5,3,5,8,9,7,9","winlines":["0~25~0,1,2"]}"#,
        )
        .unwrap();

        assert_eq!(result.win, 25);
        assert_eq!(
            result.board.cells(),
            &[2, 0, 3, 0, 4, 8, 1, 5, 4, 2, 4, 7, 8, 6, 8]
        );
        assert_eq!(result.win_lines.len(), 1);
        assert_eq!(result.win_lines[0].num, 0);
        assert_eq!(result.win_lines[0].win, 25);
        assert_eq!(result.win_lines[0].board_symbol_indexes, vec![0, 1, 2]);
    }

    #[test]
    fn test_losing_payload_has_no_lines() {
        let result = RoundResult::from_json(
            r#"{"win":0,"board":"1,2,3,4,5,6,7,8,9,10,1,2,3,4,5","winlines":[]}"#,
        )
        .unwrap();
        assert_eq!(result.win, 0);
        assert!(result.win_lines.is_empty());
    }

    #[test]
    fn test_bad_board_propagates() {
        let err = RoundResult::from_json(r#"{"win":0,"board":"1,2,3","winlines":[]}"#);
        assert!(matches!(err, Err(ParseError::WrongBoardSize(3))));
    }
}
