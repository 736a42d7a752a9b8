//! Audio cue boundary.
//!
//! Playback lives outside the core; the reel and orchestrator fire fixed
//! cue points through this trait.

/// A sound the core asks the embedder to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// A reel is about to land (fired a third into its settle bounce).
    ReelStop { reel: usize },
    /// At least one win line landed this round.
    WinBell,
}

/// Sink for sound cues.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Discards every cue; for tests and headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}
