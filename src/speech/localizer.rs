use std::sync::Arc;

use crate::localization::LocalizationService;

use super::SpeechService;

/// Localize-then-speak convenience for callers outside the scheduler (status
/// lines, one-shot confirmations) that do not need sequencing.
pub struct SpeechLocalizer {
    localization: Arc<dyn LocalizationService>,
    speech: Arc<dyn SpeechService>,
}

impl SpeechLocalizer {
    pub fn new(
        localization: Arc<dyn LocalizationService>,
        speech: Arc<dyn SpeechService>,
    ) -> Self {
        Self {
            localization,
            speech,
        }
    }

    pub fn speak_key(&self, key: &str) {
        self.speech.speak(&self.localization.get(key));
    }

    pub fn speak_key_args(&self, key: &str, args: &[String]) {
        self.speech.speak(&self.localization.get_args(key, args));
    }

    pub fn stop_all(&self) {
        self.speech.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::TableLocalization;
    use crate::speech::StubSpeechService;

    #[test]
    fn test_speak_key_resolves_text() {
        let mut table = TableLocalization::new();
        table.insert("score", "Score: {0}");
        let speech = Arc::new(StubSpeechService::new());
        let localizer = SpeechLocalizer::new(Arc::new(table), speech.clone());

        localizer.speak_key_args("score", &["42".to_string()]);
        assert_eq!(speech.last_spoken().as_deref(), Some("Score: 42"));
    }
}
