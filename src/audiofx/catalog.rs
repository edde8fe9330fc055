use std::collections::HashMap;

use super::UiCueId;

/// Maps cue identifiers to clip names for the platform audio layer.
#[derive(Debug, Clone)]
pub struct CueCatalog {
    clips: HashMap<UiCueId, String>,
}

impl CueCatalog {
    pub fn empty() -> Self {
        Self {
            clips: HashMap::new(),
        }
    }

    pub fn set_clip(&mut self, cue: UiCueId, clip: impl Into<String>) {
        self.clips.insert(cue, clip.into());
    }

    pub fn clip_for(&self, cue: UiCueId) -> Option<&str> {
        self.clips.get(&cue).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

impl Default for CueCatalog {
    /// Stock clip set for the hub UI.
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.set_clip(UiCueId::WelcomeChime, "ui_welcome_chime.wav");
        catalog.set_clip(UiCueId::ExitChime, "ui_exit_chime.wav");
        catalog.set_clip(UiCueId::Confirm, "ui_confirm.wav");
        catalog.set_clip(UiCueId::Back, "ui_back.wav");
        catalog.set_clip(UiCueId::Toggle, "ui_toggle.wav");
        catalog.set_clip(UiCueId::NavigateNext, "ui_nav_next.wav");
        catalog.set_clip(UiCueId::NavigatePrevious, "ui_nav_prev.wav");
        catalog.set_clip(UiCueId::Increase, "ui_increase.wav");
        catalog.set_clip(UiCueId::Decrease, "ui_decrease.wav");
        catalog.set_clip(UiCueId::SequenceEnd, "ui_sequence_end.wav");
        catalog.set_clip(UiCueId::Repeat, "ui_repeat.wav");
        catalog.set_clip(UiCueId::Error, "ui_error.wav");
        catalog
    }
}
