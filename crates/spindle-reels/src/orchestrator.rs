//! Round orchestration: staggered spin start, staggered stop, win
//! presentation.
//!
//! Board changes enqueue transitions on an [`ActionQueue`]; each transition
//! drives the reel bank across several seconds of animation. The win
//! presentation (bell, count-up, reveal, symbol highlight) belongs to the
//! stop transition; the score routines free-run on the shared scheduler and
//! do not hold the round open past the highlight.

use spindle_anim::{lerp, Easing, Routine, Scheduler};
use spindle_model::{Board, WinLine, BOARD_CELLS, ROWS_PER_REEL};

use crate::audio::{AudioCue, AudioSink};
use crate::queue::{ActionQueue, Transition};
use crate::reel::Reel;
use crate::score::ScoreHandle;

/// Delay between consecutive reel starts and stops.
const STAGGER_MS: f64 = 80.0;

/// Extra hold after the last reel has been kicked off before the start
/// transition completes.
const START_HOLD_MS: f64 = 500.0;

/// Win count-up length.
const COUNT_UP_MS: f64 = 800.0;

/// Score reveal length.
const REVEAL_MS: f64 = 1200.0;

/// Everything a transition may touch while it runs.
pub struct RoundCtx {
    pub reels: Vec<Reel>,
    pub audio: Box<dyn AudioSink + Send>,
    pub scheduler: Scheduler,
    pub score: ScoreHandle,
    running: bool,
}

impl RoundCtx {
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

pub struct RoundOrchestrator {
    ctx: RoundCtx,
    queue: ActionQueue<RoundCtx>,
}

impl RoundOrchestrator {
    pub fn new(reels: Vec<Reel>, audio: Box<dyn AudioSink + Send>, score: ScoreHandle) -> Self {
        Self {
            ctx: RoundCtx {
                reels,
                audio,
                scheduler: Scheduler::new(),
                score,
                running: false,
            },
            queue: ActionQueue::new(),
        }
    }

    /// Whether a round is holding the controls (spin in flight or win
    /// presentation still playing).
    #[inline]
    pub fn is_running(&self) -> bool {
        self.ctx.running
    }

    #[inline]
    pub fn reels(&self) -> &[Reel] {
        &self.ctx.reels
    }

    #[inline]
    pub fn score(&self) -> &ScoreHandle {
        &self.ctx.score
    }

    /// React to a model board change. An empty board marks the start of a
    /// round; a populated one carries the landing symbols and win lines.
    pub fn board_changed(&mut self, board: &Board, win_lines: &[WinLine]) {
        if board.is_empty() {
            log::debug!("[Round] queueing spin start");
            self.queue.push(Box::new(StartTransition::default()));
            return;
        }
        log::debug!(
            "[Round] queueing spin stop, {} win line(s)",
            win_lines.len()
        );
        self.queue.push(Box::new(StopTransition::new(
            board.clone(),
            win_lines.to_vec(),
        )));
    }

    /// Per-frame step: the front transition first, then the reel bank,
    /// then the free-running routines.
    pub fn update(&mut self, now_ms: f64, dt: f64) {
        self.queue.update(&mut self.ctx, now_ms, dt);

        let RoundCtx { reels, audio, .. } = &mut self.ctx;
        for reel in reels.iter_mut() {
            reel.update(now_ms, dt, audio.as_mut());
        }

        self.ctx.scheduler.tick(now_ms);
    }
}

/// Kicks the reels off one by one and holds the queue until the bank is
/// visibly at speed.
#[derive(Default)]
struct StartTransition {
    begun_ms: f64,
    next_reel: usize,
}

impl Transition<RoundCtx> for StartTransition {
    fn begin(&mut self, ctx: &mut RoundCtx, now_ms: f64) {
        ctx.running = true;
        self.begun_ms = now_ms;
        log::info!("[Round] spin start");
    }

    fn update(&mut self, ctx: &mut RoundCtx, now_ms: f64, _dt: f64) -> bool {
        while self.next_reel < ctx.reels.len()
            && now_ms >= self.begun_ms + self.next_reel as f64 * STAGGER_MS
        {
            ctx.reels[self.next_reel].start_spin();
            self.next_reel += 1;
        }
        let hold = STAGGER_MS * ctx.reels.len() as f64 + START_HOLD_MS;
        now_ms >= self.begun_ms + hold
    }
}

enum StopStage {
    /// Stops issued; waiting for every reel to settle.
    Settling,
    /// Highlight running on the winning rows.
    Highlighting,
}

/// Brings the bank down onto the outcome board, then plays the win
/// presentation when any line paid.
struct StopTransition {
    board: Board,
    win_lines: Vec<WinLine>,
    stage: StopStage,
}

impl StopTransition {
    fn new(board: Board, win_lines: Vec<WinLine>) -> Self {
        Self {
            board,
            win_lines,
            stage: StopStage::Settling,
        }
    }

    /// Bell, score routines, and per-reel highlight flags.
    fn present_win(&self, ctx: &mut RoundCtx) {
        ctx.audio.play(AudioCue::WinBell);

        // The banner shows the best single line, not the round total.
        let best = self.win_lines.iter().map(|line| line.win).max().unwrap_or(0);
        log::debug!("[Round] win presentation, best line pays {best}");

        let spawn = ctx.scheduler.handle();
        let score = ctx.score.clone();
        spawn.spawn(Routine::fire_and_forget(
            move |t| {
                score.lock().value = Some(lerp(0.0, best as f64, t).round() as u64);
            },
            Easing::Linear,
            COUNT_UP_MS,
        ));

        let score = ctx.score.clone();
        spawn.spawn(Routine::fire_and_forget(
            move |t| {
                let mut display = score.lock();
                display.alpha =
                    1.0 - (1.0 - Easing::Sin { amount: 1.0 }.evaluate(t)).powi(100);
                display.scale = lerp(0.25, 1.0, Easing::BackOut { amount: 1.0 }.evaluate(t));
            },
            Easing::Linear,
            REVEAL_MS,
        ));

        let mut lit = [false; BOARD_CELLS];
        for line in &self.win_lines {
            for &index in &line.board_symbol_indexes {
                if index < BOARD_CELLS {
                    lit[index] = true;
                }
            }
        }
        for reel in ctx.reels.iter_mut() {
            let base = reel.index() * ROWS_PER_REEL;
            let mut flags = [false; ROWS_PER_REEL];
            flags.copy_from_slice(&lit[base..base + ROWS_PER_REEL]);
            reel.highlight(flags);
        }
    }
}

impl Transition<RoundCtx> for StopTransition {
    fn begin(&mut self, ctx: &mut RoundCtx, _now_ms: f64) {
        log::info!("[Round] spin stop");
        for (i, reel) in ctx.reels.iter_mut().enumerate() {
            let mut symbols = [0usize; ROWS_PER_REEL];
            symbols.copy_from_slice(self.board.reel_slice(i));
            reel.stop_spin(symbols, i as f64 * STAGGER_MS);
        }
    }

    fn update(&mut self, ctx: &mut RoundCtx, _now_ms: f64, _dt: f64) -> bool {
        match self.stage {
            StopStage::Settling => {
                if !ctx.reels.iter().all(Reel::is_settled) {
                    return false;
                }
                if self.win_lines.is_empty() {
                    ctx.running = false;
                    return true;
                }
                self.present_win(ctx);
                self.stage = StopStage::Highlighting;
                false
            }
            StopStage::Highlighting => {
                if !ctx.reels.iter().all(Reel::is_highlight_done) {
                    return false;
                }
                ctx.running = false;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::reel::ReelConfig;
    use crate::score;
    use spindle_model::REEL_COUNT;

    const STEP_MS: f64 = 16.0;

    fn bank() -> Vec<Reel> {
        (0..REEL_COUNT)
            .map(|i| Reel::with_seed(i, ReelConfig::default(), 40 + i as u64))
            .collect()
    }

    fn step(orc: &mut RoundOrchestrator, now: &mut f64) {
        *now += STEP_MS;
        orc.update(*now, STEP_MS / 1000.0);
    }

    fn run_for(orc: &mut RoundOrchestrator, now: &mut f64, span_ms: f64) {
        let until = *now + span_ms;
        while *now < until {
            step(orc, now);
        }
    }

    fn board(cells: [usize; BOARD_CELLS]) -> Board {
        match Board::from_cells(cells.to_vec()) {
            Ok(board) => board,
            Err(err) => panic!("bad test board: {err}"),
        }
    }

    #[test]
    fn test_round_without_wins_releases_after_settle() {
        let mut orc = RoundOrchestrator::new(bank(), Box::new(NullAudio), score::new_handle());
        let mut now = 0.0;

        orc.board_changed(&Board::empty(), &[]);
        step(&mut orc, &mut now);
        assert!(orc.is_running());

        run_for(&mut orc, &mut now, 1000.0);
        assert!(orc.reels().iter().all(|r| r.speed() > 0.0));

        let landing = board([3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9]);
        orc.board_changed(&landing, &[]);
        run_for(&mut orc, &mut now, 4000.0);

        assert!(!orc.is_running());
        for (i, reel) in orc.reels().iter().enumerate() {
            let mut expected = [0usize; ROWS_PER_REEL];
            expected.copy_from_slice(landing.reel_slice(i));
            assert_eq!(reel.visible_symbols(), expected, "reel {i}");
        }
        assert!(orc.score().lock().value.is_none());
    }

    #[test]
    fn test_winning_round_counts_up_best_line_and_holds_for_highlight() {
        let mut orc = RoundOrchestrator::new(bank(), Box::new(NullAudio), score::new_handle());
        let mut now = 0.0;

        orc.board_changed(&Board::empty(), &[]);
        run_for(&mut orc, &mut now, 1200.0);

        let landing = board([7, 7, 7, 7, 7, 7, 7, 7, 7, 1, 2, 3, 4, 5, 6]);
        let lines = vec![
            WinLine {
                num: 0,
                win: 25,
                board_symbol_indexes: vec![0, 3, 6],
            },
            WinLine {
                num: 2,
                win: 120,
                board_symbol_indexes: vec![2, 5, 8],
            },
        ];
        orc.board_changed(&landing, &lines);

        // Step until the presentation starts (count-up routine live).
        let deadline = now + 10_000.0;
        while orc.score().lock().value.is_none() {
            step(&mut orc, &mut now);
            assert!(now < deadline, "presentation never started");
        }
        assert!(
            orc.reels().iter().all(Reel::is_settled),
            "reels still moving"
        );

        // Halfway through the reveal the banner is fully visible.
        run_for(&mut orc, &mut now, 600.0);
        assert!((orc.score().lock().alpha - 1.0).abs() < 1e-9);

        // The reveal curve returns to zero at its end, fading the banner
        // back out; the count-up value and the scale hold their ends.
        run_for(&mut orc, &mut now, 2000.0);
        assert!(!orc.is_running());
        assert_eq!(orc.score().lock().value, Some(120));
        assert!((orc.score().lock().scale - 1.0).abs() < 1e-9);
        assert!(orc.score().lock().alpha.abs() < 1e-9);
    }

    #[test]
    fn test_queued_start_waits_for_stop_to_finish() {
        let mut orc = RoundOrchestrator::new(bank(), Box::new(NullAudio), score::new_handle());
        let mut now = 0.0;

        orc.board_changed(&Board::empty(), &[]);
        run_for(&mut orc, &mut now, 1000.0);
        let landing = board([3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9]);
        orc.board_changed(&landing, &[]);
        // Immediately queue the next round's start behind the stop.
        orc.board_changed(&Board::empty(), &[]);

        run_for(&mut orc, &mut now, 4000.0);
        // The queued start has begun by now; the bank spins again.
        assert!(orc.is_running());
        run_for(&mut orc, &mut now, 1200.0);
        assert!(orc.reels().iter().all(|r| r.speed() > 0.0));
    }
}
