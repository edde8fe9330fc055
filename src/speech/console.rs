use parking_lot::Mutex;

use super::SpeechService;

/// Speech backend for the demo binary: prints the text and simulates a
/// speaking duration from the word count so the scheduler sees a realistic
/// two-phase (start, finish) signal.
///
/// The owner must call [`tick`](Self::tick) with wall-clock seconds to drain
/// the simulated utterance.
#[derive(Debug)]
pub struct ConsoleSpeechService {
    words_per_second: f32,
    state: Mutex<ConsoleState>,
}

#[derive(Debug, Default)]
struct ConsoleState {
    remaining: f32,
    language: Option<String>,
}

/// Floor so one-word utterances still occupy an audible beat.
const MIN_UTTERANCE_SECONDS: f32 = 0.6;

impl ConsoleSpeechService {
    pub fn new(words_per_second: f32) -> Self {
        Self {
            words_per_second: words_per_second.max(0.5),
            state: Mutex::new(ConsoleState::default()),
        }
    }

    /// Advance the simulated utterance clock.
    pub fn tick(&self, dt: f32) {
        let mut state = self.state.lock();
        if state.remaining > 0.0 {
            state.remaining = (state.remaining - dt).max(0.0);
        }
    }
}

impl SpeechService for ConsoleSpeechService {
    fn speak(&self, text: &str) {
        let words = text.split_whitespace().count().max(1);
        let duration = (words as f32 / self.words_per_second).max(MIN_UTTERANCE_SECONDS);
        println!("[speech] {text}");
        self.state.lock().remaining = duration;
    }

    fn stop_all(&self) {
        self.state.lock().remaining = 0.0;
    }

    fn is_speaking(&self) -> bool {
        self.state.lock().remaining > 0.0
    }

    fn set_language(&self, language_code: &str) {
        println!("[speech] language set to {language_code}");
        self.state.lock().language = Some(language_code.to_string());
    }
}
