//! GameModel — bet, win, board and win lines with change notification.

use crate::board::Board;
use crate::observe::Listeners;
use crate::round::RoundResult;
use crate::winline::WinLine;

/// Smallest allowed bet.
pub const MIN_BET: u32 = 1;

/// Largest allowed bet.
pub const MAX_BET: u32 = 10;

/// The game-side state of a session.
///
/// All mutation goes through setters that notify the matching listener
/// registry; the presentation layer subscribes and reacts. Board changes
/// carry the round protocol: an empty board announces a round start, a
/// populated board delivers its outcome.
pub struct GameModel {
    bet: u32,
    win: u64,
    board: Board,
    win_lines: Vec<WinLine>,

    /// Fired with the new bet after every bet change.
    pub on_bet_change: Listeners<u32>,
    /// Fired with the new board on every board replacement.
    pub on_board_change: Listeners<Board>,
    /// Fired with the new win lines on every replacement.
    pub on_win_lines_change: Listeners<Vec<WinLine>>,
}

impl GameModel {
    pub fn new() -> Self {
        Self {
            bet: MIN_BET,
            win: 0,
            board: Board::empty(),
            win_lines: Vec::new(),
            on_bet_change: Listeners::new(),
            on_board_change: Listeners::new(),
            on_win_lines_change: Listeners::new(),
        }
    }

    #[inline]
    pub fn bet(&self) -> u32 {
        self.bet
    }

    #[inline]
    pub fn win(&self) -> u64 {
        self.win
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn win_lines(&self) -> &[WinLine] {
        &self.win_lines
    }

    pub fn increase_bet(&mut self) {
        self.set_bet((self.bet + 1).min(MAX_BET));
    }

    pub fn decrease_bet(&mut self) {
        self.set_bet(self.bet.saturating_sub(1).max(MIN_BET));
    }

    /// Clamp into `[MIN_BET, MAX_BET]` and notify.
    pub fn set_bet(&mut self, bet: u32) {
        self.bet = bet.clamp(MIN_BET, MAX_BET);
        let bet = self.bet;
        self.on_bet_change.emit(&bet);
    }

    /// Reset win/board/lines at the start of a round. The empty board
    /// notification is what kicks off the spin-up transition downstream.
    pub fn drop_state(&mut self) {
        self.win = 0;
        self.update_board(Board::empty());
        self.update_win_lines(Vec::new());
    }

    /// Apply a parsed outcome. Win lines are set before the board so that
    /// board listeners observe a consistent round.
    pub fn apply_round(&mut self, result: RoundResult) {
        log::debug!(
            "[Game] round applied: win={} lines={}",
            result.win,
            result.win_lines.len()
        );
        self.win = result.win;
        self.update_win_lines(result.win_lines);
        self.update_board(result.board);
    }

    fn update_board(&mut self, board: Board) {
        self.board = board;
        let board = self.board.clone();
        self.on_board_change.emit(&board);
    }

    fn update_win_lines(&mut self, win_lines: Vec<WinLine>) {
        self.win_lines = win_lines;
        let win_lines = self.win_lines.clone();
        self.on_win_lines_change.emit(&win_lines);
    }
}

impl Default for GameModel {
    fn default() -> Self {
        Self::new()
    }
}
