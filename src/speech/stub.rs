use parking_lot::Mutex;

use super::SpeechService;

/// In-memory speech backend for tests and headless runs.
///
/// Records every spoken text and exposes the speaking flag for the driver to
/// toggle; it never produces audio on its own.
#[derive(Debug, Default)]
pub struct StubSpeechService {
    state: Mutex<StubState>,
}

#[derive(Debug, Default)]
struct StubState {
    speaking: bool,
    spoken: Vec<String>,
    stop_calls: usize,
    language: Option<String>,
}

impl StubSpeechService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive the speaking flag from the outside.
    pub fn set_speaking(&self, speaking: bool) {
        self.state.lock().speaking = speaking;
    }

    /// Everything spoken so far, oldest first.
    pub fn spoken(&self) -> Vec<String> {
        self.state.lock().spoken.clone()
    }

    pub fn last_spoken(&self) -> Option<String> {
        self.state.lock().spoken.last().cloned()
    }

    pub fn stop_calls(&self) -> usize {
        self.state.lock().stop_calls
    }

    pub fn language(&self) -> Option<String> {
        self.state.lock().language.clone()
    }
}

impl SpeechService for StubSpeechService {
    fn speak(&self, text: &str) {
        self.state.lock().spoken.push(text.to_string());
    }

    fn stop_all(&self) {
        let mut state = self.state.lock();
        state.speaking = false;
        state.stop_calls += 1;
    }

    fn is_speaking(&self) -> bool {
        self.state.lock().speaking
    }

    fn set_language(&self, language_code: &str) {
        self.state.lock().language = Some(language_code.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_spoken_text() {
        let stub = StubSpeechService::new();
        stub.speak("one");
        stub.speak("two");
        assert_eq!(stub.spoken(), vec!["one".to_string(), "two".to_string()]);
        assert_eq!(stub.last_spoken().as_deref(), Some("two"));
    }

    #[test]
    fn test_stop_all_clears_speaking_and_counts() {
        let stub = StubSpeechService::new();
        stub.set_speaking(true);
        assert!(stub.is_speaking());
        stub.stop_all();
        assert!(!stub.is_speaking());
        assert_eq!(stub.stop_calls(), 1);
    }

    #[test]
    fn test_set_language() {
        let stub = StubSpeechService::new();
        stub.set_language("en-US");
        assert_eq!(stub.language().as_deref(), Some("en-US"));
    }
}
