//! Reel — one spinning column of symbols.
//!
//! A reel is a ring of [`SLOT_COUNT`] symbol cells scrolled by a continuous
//! `position` (in symbol-size units). Motion is driven by one active phase
//! at a time — acceleration, linear braking, overshoot settle or highlight —
//! each an explicit tween-holding state instead of a stored closure.
//! Starting a new phase supersedes the old one silently; there is no
//! cancellation path.

use std::collections::VecDeque;

use rand::prelude::*;

use spindle_anim::{lerp, Easing, Step, Tween};
use spindle_model::ROWS_PER_REEL;

use crate::audio::{AudioCue, AudioSink};
use crate::symbol::SymbolCell;

/// Ring size: visible rows plus one wraparound buffer slot.
pub const SLOT_COUNT: usize = ROWS_PER_REEL + 1;

/// Highlight animation length.
const HIGHLIGHT_MS: f64 = 1200.0;

/// Reel motion state.
///
/// There is no separate idle state: a settled reel is `Stopping` with no
/// active phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelState {
    /// Accelerating or cruising at max speed; `position` advances by
    /// `speed * dt` every frame.
    Starting,
    /// Braking, settling, or already settled; `position` is tween-driven.
    Stopping,
}

/// Static reel parameters.
#[derive(Debug, Clone)]
pub struct ReelConfig {
    /// Symbol cell size in pixels (one position unit).
    pub symbol_size: f64,
    /// Cruise speed in symbol units per second.
    pub max_speed: f64,
    /// Acceleration in symbol units per second squared; also sets the
    /// braking profile (`stop_duration = speed / acceleration`).
    pub acceleration: f64,
    /// Number of symbol textures to draw random filler from.
    pub texture_count: usize,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            symbol_size: 180.0,
            max_speed: 10.0,
            acceleration: 20.0,
            texture_count: 10,
        }
    }
}

enum Phase {
    Accelerate {
        tween: Tween,
        from_speed: f64,
    },
    Brake {
        tween: Tween,
        from_pos: f64,
        target_pos: f64,
        finish_pos: f64,
        stop_duration_s: f64,
    },
    Settle {
        tween: Tween,
        from_pos: f64,
        finish_pos: f64,
        from_speed: f64,
        cue_fired: bool,
    },
    Highlight {
        tween: Tween,
        flags: [bool; ROWS_PER_REEL],
        slots: [usize; ROWS_PER_REEL],
    },
}

/// A stop request waiting out its stagger delay. The delay deadline is
/// anchored on the first frame after the request, matching the lazy start
/// of the tweens themselves.
struct PendingStop {
    symbols: [usize; ROWS_PER_REEL],
    delay_ms: f64,
    deadline_ms: Option<f64>,
}

pub struct Reel {
    index: usize,
    symbol_size: f64,
    max_speed: f64,
    acceleration: f64,
    texture_count: usize,

    position: f64,
    speed: f64,
    blur: f64,
    state: ReelState,
    phase: Option<Phase>,
    pending_stop: Option<PendingStop>,
    symbol_seq: VecDeque<usize>,
    cells: [SymbolCell; SLOT_COUNT],
    settled: bool,
    highlight_done: bool,
    rng: StdRng,
}

impl Reel {
    pub fn new(index: usize, config: ReelConfig) -> Self {
        Self::with_rng(index, config, StdRng::from_os_rng())
    }

    /// Deterministic filler symbols, for tests and the simulator.
    pub fn with_seed(index: usize, config: ReelConfig, seed: u64) -> Self {
        Self::with_rng(index, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(index: usize, config: ReelConfig, mut rng: StdRng) -> Self {
        let cells = std::array::from_fn(|slot| {
            let texture = rng.random_range(0..config.texture_count);
            SymbolCell::new(texture, slot as f64 * config.symbol_size)
        });
        Self {
            index,
            symbol_size: config.symbol_size,
            max_speed: config.max_speed,
            acceleration: config.acceleration,
            texture_count: config.texture_count,
            position: 0.0,
            speed: 0.0,
            blur: 0.0,
            state: ReelState::Stopping,
            phase: None,
            pending_stop: None,
            symbol_seq: VecDeque::new(),
            cells,
            settled: false,
            highlight_done: false,
            rng,
        }
    }

    /// Begin spinning up: ramp `speed` to `max_speed` over
    /// `max_speed / acceleration` seconds with a back-in pull.
    pub fn start_spin(&mut self) {
        self.state = ReelState::Starting;
        self.settled = false;
        let duration_ms = self.max_speed / self.acceleration * 1000.0;
        log::debug!("[Reel {}] spin-up over {duration_ms:.0} ms", self.index);
        self.phase = Some(Phase::Accelerate {
            tween: Tween::new(Easing::BackIn { amount: 1.0 }, duration_ms),
            from_speed: self.speed,
        });
    }

    /// Request a stop onto `final_symbols` (top to bottom) after
    /// `start_delay_ms`. Completion is observable through [`Reel::is_settled`].
    pub fn stop_spin(&mut self, final_symbols: [usize; ROWS_PER_REEL], start_delay_ms: f64) {
        self.settled = false;
        self.pending_stop = Some(PendingStop {
            symbols: final_symbols,
            delay_ms: start_delay_ms,
            deadline_ms: None,
        });
    }

    /// Start the win highlight over the three visible rows; `flags` are
    /// top-to-bottom, `true` for cells on a winning line. Completion is
    /// observable through [`Reel::is_highlight_done`].
    pub fn highlight(&mut self, flags: [bool; ROWS_PER_REEL]) {
        self.highlight_done = false;
        let slots = self.bottom_slots();
        self.phase = Some(Phase::Highlight {
            tween: Tween::new(Easing::Linear, HIGHLIGHT_MS),
            flags,
            slots,
        });
    }

    /// Per-frame step: resume the active phase, advance constant-speed
    /// motion, then recompute slot placement and wraparound swaps.
    pub fn update(&mut self, now_ms: f64, dt: f64, audio: &mut dyn AudioSink) {
        let stop_due = match self.pending_stop.as_mut() {
            Some(pending) => {
                let deadline = *pending
                    .deadline_ms
                    .get_or_insert(now_ms + pending.delay_ms);
                now_ms >= deadline
            }
            None => false,
        };
        if stop_due {
            if let Some(pending) = self.pending_stop.take() {
                self.begin_stop(pending.symbols);
            }
        }

        self.tick_phase(now_ms, audio);

        if self.state == ReelState::Starting {
            self.position += self.speed * dt;
        }

        self.update_symbols();
    }

    /// Whether the last requested stop has fully settled.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Whether the last requested highlight has finished.
    #[inline]
    pub fn is_highlight_done(&self) -> bool {
        self.highlight_done
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn state(&self) -> ReelState {
        self.state
    }

    /// Motion-blur intensity proxy for the renderer (equals current speed).
    #[inline]
    pub fn blur(&self) -> f64 {
        self.blur
    }

    /// All ring slots, including the wraparound buffer.
    #[inline]
    pub fn cells(&self) -> &[SymbolCell] {
        &self.cells
    }

    /// Slot indices of the three visible rows, top to bottom.
    pub fn bottom_slots(&self) -> [usize; ROWS_PER_REEL] {
        let mut slots: Vec<usize> = (0..SLOT_COUNT).collect();
        slots.sort_by(|&a, &b| {
            self.cells[b]
                .y
                .partial_cmp(&self.cells[a].y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        // Largest-y three are on screen; reversed = top to bottom.
        [slots[2], slots[1], slots[0]]
    }

    /// Textures of the three visible rows, top to bottom.
    pub fn visible_symbols(&self) -> [usize; ROWS_PER_REEL] {
        self.bottom_slots().map(|slot| self.cells[slot].texture)
    }

    fn begin_stop(&mut self, symbols: [usize; ROWS_PER_REEL]) {
        assert!(
            self.speed > 0.0,
            "stop_spin on reel {} that is not spinning",
            self.index
        );
        // Reversed so the wraparound dequeues them bottom row first and the
        // slice reads top-to-bottom once settled.
        self.symbol_seq = symbols.iter().rev().copied().collect();
        self.state = ReelState::Stopping;

        let stop_duration_s = self.speed / self.acceleration;
        // At least one full extra rotation past the next whole position.
        let finish_pos = (self.position + ROWS_PER_REEL as f64).ceil();
        // Constant-deceleration braking distance.
        let target_pos = finish_pos - 0.5 * self.speed * stop_duration_s;
        let brake_ms = (target_pos - self.position) / self.speed * 1000.0;

        // A fast reel can have a braking distance (0.5 * speed^2 / accel)
        // wider than the landing window, putting the brake target behind the
        // current position. Skip the brake and settle the whole remaining
        // distance.
        if brake_ms <= 0.0 {
            log::debug!(
                "[Reel {}] settling directly {:.2} -> {:.2}",
                self.index,
                self.position,
                finish_pos
            );
            self.phase = Some(Phase::Settle {
                tween: Tween::new(Easing::BackOut { amount: 1.0 }, stop_duration_s * 1000.0),
                from_pos: self.position,
                finish_pos,
                from_speed: self.speed,
                cue_fired: false,
            });
            return;
        }

        log::debug!(
            "[Reel {}] braking {:.2} -> {:.2}, settle at {:.2}",
            self.index,
            self.position,
            target_pos,
            finish_pos
        );
        self.phase = Some(Phase::Brake {
            tween: Tween::new(Easing::Linear, brake_ms),
            from_pos: self.position,
            target_pos,
            finish_pos,
            stop_duration_s,
        });
    }

    fn tick_phase(&mut self, now_ms: f64, audio: &mut dyn AudioSink) {
        let Some(phase) = self.phase.take() else {
            return;
        };

        self.phase = match phase {
            Phase::Accelerate {
                mut tween,
                from_speed,
            } => match tween.tick(now_ms) {
                Step::Running(eased) => {
                    self.speed = lerp(from_speed, self.max_speed, eased);
                    Some(Phase::Accelerate { tween, from_speed })
                }
                Step::Finished(eased) => {
                    self.speed = lerp(from_speed, self.max_speed, eased);
                    log::debug!("[Reel {}] cruising at {:.1}", self.index, self.speed);
                    None
                }
                Step::Idle => None,
            },

            Phase::Brake {
                mut tween,
                from_pos,
                target_pos,
                finish_pos,
                stop_duration_s,
            } => match tween.tick(now_ms) {
                Step::Running(eased) => {
                    self.position = lerp(from_pos, target_pos, eased);
                    Some(Phase::Brake {
                        tween,
                        from_pos,
                        target_pos,
                        finish_pos,
                        stop_duration_s,
                    })
                }
                Step::Finished(eased) => {
                    self.position = lerp(from_pos, target_pos, eased);
                    Some(Phase::Settle {
                        tween: Tween::new(
                            Easing::BackOut { amount: 1.0 },
                            stop_duration_s * 1000.0,
                        ),
                        from_pos: self.position,
                        finish_pos,
                        from_speed: self.speed,
                        cue_fired: false,
                    })
                }
                Step::Idle => None,
            },

            Phase::Settle {
                mut tween,
                from_pos,
                finish_pos,
                from_speed,
                mut cue_fired,
            } => {
                let step = tween.tick(now_ms);
                // Landing cue a third of the way into the bounce.
                if !cue_fired {
                    if let Some(start) = tween.started_at() {
                        if now_ms - start >= tween.duration_ms() / 3.0 {
                            audio.play(AudioCue::ReelStop { reel: self.index });
                            cue_fired = true;
                        }
                    }
                }
                match step {
                    Step::Running(eased) => {
                        self.position = lerp(from_pos, finish_pos, eased);
                        self.speed = lerp(from_speed, 0.0, eased);
                        Some(Phase::Settle {
                            tween,
                            from_pos,
                            finish_pos,
                            from_speed,
                            cue_fired,
                        })
                    }
                    Step::Finished(_) => {
                        self.position = finish_pos;
                        self.speed = 0.0;
                        if !cue_fired {
                            audio.play(AudioCue::ReelStop { reel: self.index });
                        }
                        self.settled = true;
                        log::debug!(
                            "[Reel {}] settled at {:.1}",
                            self.index,
                            self.position
                        );
                        None
                    }
                    Step::Idle => None,
                }
            }

            Phase::Highlight {
                mut tween,
                flags,
                slots,
            } => match tween.tick(now_ms) {
                Step::Running(t) => {
                    self.apply_highlight(t, flags, slots);
                    Some(Phase::Highlight { tween, flags, slots })
                }
                Step::Finished(t) => {
                    self.apply_highlight(t, flags, slots);
                    self.highlight_done = true;
                    None
                }
                Step::Idle => None,
            },
        };
    }

    fn apply_highlight(
        &mut self,
        t: f64,
        flags: [bool; ROWS_PER_REEL],
        slots: [usize; ROWS_PER_REEL],
    ) {
        let t_light = Easing::Sin { amount: 3.0 }.evaluate(t);
        let t_dark = (1.0 - Easing::Sin { amount: 1.0 }.evaluate(t)).powi(8);
        for (row, &slot) in slots.iter().enumerate() {
            self.cells[slot].brightness = if flags[row] {
                lerp(1.0, 2.0, t_light)
            } else {
                lerp(0.33, 1.0, t_dark)
            };
        }
    }

    fn update_symbols(&mut self) {
        self.blur = self.speed;
        let size = self.symbol_size;
        for slot in 0..SLOT_COUNT {
            let prev_y = self.cells[slot].y;
            let y = ((self.position + slot as f64) % SLOT_COUNT as f64) * size - size;
            if y < 0.0 && prev_y > size {
                // The slot wrapped past the top; commit the next outcome
                // symbol (or random filler once the sequence is spent).
                let texture = self.next_symbol();
                self.cells[slot].texture = texture;
            }
            self.cells[slot].y = y;
        }
    }

    fn next_symbol(&mut self) -> usize {
        match self.symbol_seq.pop_front() {
            Some(texture) => texture,
            None => self.rng.random_range(0..self.texture_count),
        }
    }
}
