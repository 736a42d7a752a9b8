//! GameSession — model, outcome source and reel bank wired together.
//!
//! The session owns the [`GameModel`] and forwards its board notifications
//! to the [`RoundOrchestrator`]. Listener callbacks only record events;
//! they are drained and acted on from [`GameSession::update`], keeping all
//! animation work on the frame loop.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use spindle_model::{
    Board, GameModel, LocalOutcomeTable, OutcomeError, OutcomeSource, WinLine, REEL_COUNT,
};

use crate::audio::AudioSink;
use crate::orchestrator::RoundOrchestrator;
use crate::reel::{Reel, ReelConfig};
use crate::score::{self, ScoreHandle};

type BoardEvents = Arc<Mutex<VecDeque<(Board, Vec<WinLine>)>>>;

pub struct GameSession {
    model: GameModel,
    orchestrator: RoundOrchestrator,
    source: Box<dyn OutcomeSource + Send>,
    fallback: LocalOutcomeTable,
    board_events: BoardEvents,
}

impl GameSession {
    pub fn new(source: Box<dyn OutcomeSource + Send>, audio: Box<dyn AudioSink + Send>) -> Self {
        let reels = (0..REEL_COUNT)
            .map(|i| Reel::new(i, ReelConfig::default()))
            .collect();
        Self::assemble(source, audio, reels, LocalOutcomeTable::new())
    }

    /// Deterministic variant: seeds the reel filler symbols and the local
    /// fallback table.
    pub fn with_seed(
        source: Box<dyn OutcomeSource + Send>,
        audio: Box<dyn AudioSink + Send>,
        seed: u64,
    ) -> Self {
        let reels = (0..REEL_COUNT)
            .map(|i| Reel::with_seed(i, ReelConfig::default(), seed.wrapping_add(i as u64)))
            .collect();
        Self::assemble(source, audio, reels, LocalOutcomeTable::seeded(seed))
    }

    fn assemble(
        source: Box<dyn OutcomeSource + Send>,
        audio: Box<dyn AudioSink + Send>,
        reels: Vec<Reel>,
        fallback: LocalOutcomeTable,
    ) -> Self {
        let mut model = GameModel::new();
        let board_events: BoardEvents = Arc::new(Mutex::new(VecDeque::new()));

        // Win lines always change before the board does, so the snapshot
        // taken here is consistent for the board that follows.
        let latest_lines: Arc<Mutex<Vec<WinLine>>> = Arc::new(Mutex::new(Vec::new()));
        let lines_sink = latest_lines.clone();
        model
            .on_win_lines_change
            .subscribe(move |lines| *lines_sink.lock() = lines.clone());

        let events_sink = board_events.clone();
        model.on_board_change.subscribe(move |board| {
            events_sink
                .lock()
                .push_back((board.clone(), latest_lines.lock().clone()));
        });

        Self {
            model,
            orchestrator: RoundOrchestrator::new(reels, audio, score::new_handle()),
            source,
            fallback,
            board_events,
        }
    }

    #[inline]
    pub fn model(&self) -> &GameModel {
        &self.model
    }

    #[inline]
    pub fn reels(&self) -> &[Reel] {
        self.orchestrator.reels()
    }

    #[inline]
    pub fn score(&self) -> &ScoreHandle {
        self.orchestrator.score()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.orchestrator.is_running()
    }

    /// Raise the bet by one step. Ignored while a round is in flight.
    pub fn increase_bet(&mut self) {
        if self.is_running() {
            return;
        }
        self.model.increase_bet();
    }

    /// Lower the bet by one step. Ignored while a round is in flight.
    pub fn decrease_bet(&mut self) {
        if self.is_running() {
            return;
        }
        self.model.decrease_bet();
    }

    /// Place the current bet and start a round. The model announces the
    /// round start and outcome; the reels react on the next `update`.
    pub fn make_bet(&mut self) -> Result<(), OutcomeError> {
        if self.is_running() {
            log::debug!("[Session] bet ignored, round in flight");
            return Ok(());
        }

        let bet = self.model.bet();
        self.model.drop_state();

        let result = match self.source.place_bet(bet) {
            Ok(result) => result,
            Err(err) => {
                log::warn!("[Session] outcome source failed ({err}), using local table");
                self.fallback.place_bet(bet)?
            }
        };
        self.model.apply_round(result);
        Ok(())
    }

    /// Per-frame step: hand queued board events to the orchestrator, then
    /// advance all animation.
    pub fn update(&mut self, now_ms: f64, dt: f64) {
        loop {
            let event = self.board_events.lock().pop_front();
            let Some((board, lines)) = event else { break };
            self.orchestrator.board_changed(&board, &lines);
        }
        self.orchestrator.update(now_ms, dt);
    }
}
