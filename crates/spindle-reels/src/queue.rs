//! FIFO queue of frame-polled transitions.
//!
//! Round phases (spin start, spin stop) are long-running and must execute
//! strictly in arrival order, at most one in flight. A [`Transition`] is
//! begun once and then polled every frame until it reports completion;
//! the next queued transition begins on the same frame its predecessor
//! finishes.

use std::collections::VecDeque;

/// A queued unit of work driven by the frame loop.
pub trait Transition<C> {
    /// Called exactly once, on the frame this transition reaches the
    /// front of the queue.
    fn begin(&mut self, ctx: &mut C, now_ms: f64);

    /// Called every frame after `begin`; return `true` when done.
    fn update(&mut self, ctx: &mut C, now_ms: f64, dt: f64) -> bool;
}

pub struct ActionQueue<C> {
    queue: VecDeque<Box<dyn Transition<C> + Send>>,
    started: bool,
}

impl<C> Default for ActionQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ActionQueue<C> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            started: false,
        }
    }

    pub fn push(&mut self, transition: Box<dyn Transition<C> + Send>) {
        self.queue.push_back(transition);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drive the front transition for one frame. Finished transitions are
    /// popped and their successors begun within the same call, so a chain
    /// of instantly-completing transitions drains in one frame.
    pub fn update(&mut self, ctx: &mut C, now_ms: f64, dt: f64) {
        loop {
            let Some(front) = self.queue.front_mut() else {
                return;
            };
            if !self.started {
                front.begin(ctx, now_ms);
                self.started = true;
            }
            if !front.update(ctx, now_ms, dt) {
                return;
            }
            self.queue.pop_front();
            self.started = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        events: Vec<String>,
    }

    struct Countdown {
        name: &'static str,
        frames: u32,
    }

    impl Transition<Log> for Countdown {
        fn begin(&mut self, ctx: &mut Log, _now_ms: f64) {
            ctx.events.push(format!("{} begin", self.name));
        }

        fn update(&mut self, ctx: &mut Log, _now_ms: f64, _dt: f64) -> bool {
            if self.frames == 0 {
                ctx.events.push(format!("{} done", self.name));
                return true;
            }
            self.frames -= 1;
            false
        }
    }

    #[test]
    fn test_runs_one_at_a_time_in_order() {
        let mut log = Log::default();
        let mut queue: ActionQueue<Log> = ActionQueue::new();
        queue.push(Box::new(Countdown { name: "a", frames: 2 }));
        queue.push(Box::new(Countdown { name: "b", frames: 1 }));

        let mut now = 0.0;
        while !queue.is_empty() {
            now += 16.0;
            queue.update(&mut log, now, 0.016);
        }
        assert_eq!(
            log.events,
            vec!["a begin", "a done", "b begin", "b done"]
        );
    }

    #[test]
    fn test_successor_begins_on_completion_frame() {
        let mut log = Log::default();
        let mut queue: ActionQueue<Log> = ActionQueue::new();
        queue.push(Box::new(Countdown { name: "a", frames: 0 }));
        queue.push(Box::new(Countdown { name: "b", frames: 3 }));

        queue.update(&mut log, 16.0, 0.016);
        // "a" finishes instantly; "b" must already be begun this frame.
        assert_eq!(log.events, vec!["a begin", "a done", "b begin"]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_push_while_running_waits_its_turn() {
        let mut log = Log::default();
        let mut queue: ActionQueue<Log> = ActionQueue::new();
        queue.push(Box::new(Countdown { name: "a", frames: 5 }));
        queue.update(&mut log, 16.0, 0.016);

        queue.push(Box::new(Countdown { name: "b", frames: 0 }));
        queue.update(&mut log, 32.0, 0.016);
        assert_eq!(log.events, vec!["a begin"]);

        let mut now = 32.0;
        while !queue.is_empty() {
            now += 16.0;
            queue.update(&mut log, now, 0.016);
        }
        assert_eq!(
            log.events,
            vec!["a begin", "a done", "b begin", "b done"]
        );
    }

    #[test]
    fn test_empty_queue_update_is_a_no_op() {
        let mut log = Log::default();
        let mut queue: ActionQueue<Log> = ActionQueue::new();
        queue.update(&mut log, 16.0, 0.016);
        assert!(log.events.is_empty());
        assert!(queue.is_empty());
    }
}
