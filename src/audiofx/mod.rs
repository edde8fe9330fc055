//! Non-speech feedback cues
//!
//! Short confirmation/navigation sounds the hub plays around narration.
//! Cue playback is fire-and-forget and never scheduled; mixing and clip
//! loading belong to the platform audio layer behind the port.

pub mod catalog;
pub mod null;

pub use catalog::CueCatalog;
pub use null::{NullAudioCueService, RecordingAudioCueService};

/// Identifier for a short UI feedback sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiCueId {
    WelcomeChime,
    ExitChime,

    Confirm,
    Back,
    Toggle,

    NavigateNext,
    NavigatePrevious,

    Increase,
    Decrease,

    SequenceEnd,

    Repeat,
    Error,
}

/// Feedback-sound device.
pub trait AudioCueService: Send + Sync {
    fn play_cue(&self, cue: UiCueId);
    fn stop_all(&self);
}
