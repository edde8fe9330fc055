//! Speech port and backends
//!
//! The narration core treats text-to-speech as an opaque device: it queues
//! text, hard-stops, and reads one "is speaking" flag. Real platform
//! backends live outside this crate; the stub and console backends here
//! cover tests and headless runs.

pub mod console;
pub mod localizer;
pub mod stub;

pub use console::ConsoleSpeechService;
pub use localizer::SpeechLocalizer;
pub use stub::StubSpeechService;

/// Urgency of a narration request. Only the ordering matters: the scheduler
/// compares priorities to decide preemption, never their absolute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SpeechPriority {
    Low,
    #[default]
    Normal,
    High,
}

/// Text-to-speech device.
pub trait SpeechService: Send + Sync {
    /// Queue text for synthesis. Fire-and-forget; the backend decides
    /// whether and when playback starts.
    fn speak(&self, text: &str);

    /// Hard-stop queued and active speech.
    fn stop_all(&self);

    /// Whether the backend is currently producing audio. Backends with no
    /// such signal may always return false; the narration steps compensate
    /// with a protect window.
    fn is_speaking(&self) -> bool;

    /// Switch the synthesis language.
    fn set_language(&self, language_code: &str);
}
