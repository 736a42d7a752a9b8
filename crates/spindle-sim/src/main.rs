//! Spindle round simulator.
//!
//! Plays full rounds headlessly on a synthetic fixed-step clock and prints
//! one line per round plus a closing summary. Useful for eyeballing timing
//! changes without a renderer:
//!
//!   cargo run -p spindle-sim -- --spins 20 --seed 7 --verbose

use std::sync::Arc;

use clap::Parser;
use parking_lot::Mutex;

use spindle_model::{LocalOutcomeTable, MAX_BET, MIN_BET};
use spindle_reels::{AudioCue, AudioSink, GameSession};

#[derive(Parser)]
#[command(name = "spindle-sim", about = "Headless Spindle round simulator")]
struct Cli {
    /// Number of rounds to play
    #[arg(short, long, default_value_t = 10)]
    spins: u32,

    /// Bet per round (clamped to the table limits)
    #[arg(short, long, default_value_t = 1)]
    bet: u32,

    /// Seed for the outcome table and reel filler symbols
    #[arg(long)]
    seed: Option<u64>,

    /// Synthetic frame rate
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Log reel and round internals
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Default)]
struct CueCounter {
    cues: Arc<Mutex<Vec<AudioCue>>>,
}

impl AudioSink for CueCounter {
    fn play(&mut self, cue: AudioCue) {
        self.cues.lock().push(cue);
    }
}

fn main() {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let step_ms = 1000.0 / cli.fps.max(1) as f64;
    let audio = CueCounter::default();
    let cues = audio.cues.clone();

    let mut session = match cli.seed {
        Some(seed) => GameSession::with_seed(
            Box::new(LocalOutcomeTable::seeded(seed)),
            Box::new(audio),
            seed,
        ),
        None => GameSession::new(Box::new(LocalOutcomeTable::new()), Box::new(audio)),
    };

    let bet = cli.bet.clamp(MIN_BET, MAX_BET);
    for _ in MIN_BET..bet {
        session.increase_bet();
    }
    log::info!("[Sim] {} spin(s) at bet {bet}, {} fps", cli.spins, cli.fps);

    let mut now = 0.0;
    let mut total_win = 0u64;
    let mut winning_rounds = 0u32;

    for round in 1..=cli.spins {
        if let Err(err) = session.make_bet() {
            log::error!("[Sim] round {round} aborted: {err}");
            break;
        }

        let started = now;
        let mut frames = 0u64;
        loop {
            now += step_ms;
            session.update(now, step_ms / 1000.0);
            frames += 1;
            if now - started > 1000.0 && !session.is_running() {
                break;
            }
            if frames > 1_000_000 {
                log::error!("[Sim] round {round} stalled, giving up");
                return;
            }
        }

        let win = session.model().win();
        let lines = session.model().win_lines().len();
        total_win += win;
        if win > 0 {
            winning_rounds += 1;
        }

        let board = session
            .model()
            .board()
            .cells()
            .iter()
            .map(|cell| cell.to_string())
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "round {round:>3}: win={win:>4} lines={lines} {:>6.1}s board=[{board}]",
            (now - started) / 1000.0
        );
    }

    let cues = cues.lock();
    let stops = cues
        .iter()
        .filter(|cue| matches!(cue, AudioCue::ReelStop { .. }))
        .count();
    let bells = cues
        .iter()
        .filter(|cue| matches!(cue, AudioCue::WinBell))
        .count();
    println!(
        "total: {} round(s), {winning_rounds} won, bet {} -> win {total_win}, \
         {stops} reel stop(s), {bells} bell(s)",
        cli.spins,
        u64::from(bet) * u64::from(cli.spins)
    );
}
