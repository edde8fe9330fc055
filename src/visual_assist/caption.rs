use parking_lot::Mutex;

use super::{MarqueeGate, VisualAssistService};

/// Stock visual-assist surface: holds the current caption and implements the
/// marquee wait with an explicit flag.
#[derive(Debug, Default)]
pub struct CaptionBoard {
    state: Mutex<BoardState>,
}

#[derive(Debug, Default)]
struct BoardState {
    caption: Option<String>,
    waiting_first_pass: bool,
}

impl CaptionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caption for the utterance currently being narrated, if any.
    pub fn current_caption(&self) -> Option<String> {
        self.state.lock().caption.clone()
    }
}

impl VisualAssistService for CaptionBoard {
    fn notify_planned_speech(&self, text: &str) {
        self.state.lock().caption = Some(text.to_string());
    }

    fn marquee_gate(&self) -> Option<&dyn MarqueeGate> {
        Some(self)
    }
}

impl MarqueeGate for CaptionBoard {
    fn is_waiting_for_first_marquee_pass(&self) -> bool {
        self.state.lock().waiting_first_pass
    }

    fn begin_wait_for_first_marquee_pass(&self) {
        self.state.lock().waiting_first_pass = true;
    }

    fn complete_wait_for_first_marquee_pass(&self) {
        self.state.lock().waiting_first_pass = false;
    }

    fn force_release(&self) {
        self.state.lock().waiting_first_pass = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_updates_on_planned_speech() {
        let board = CaptionBoard::new();
        assert!(board.current_caption().is_none());
        board.notify_planned_speech("Welcome");
        assert_eq!(board.current_caption().as_deref(), Some("Welcome"));
    }

    #[test]
    fn test_marquee_wait_cycle() {
        let board = CaptionBoard::new();
        assert!(!board.is_waiting_for_first_marquee_pass());

        board.begin_wait_for_first_marquee_pass();
        assert!(board.is_waiting_for_first_marquee_pass());

        board.complete_wait_for_first_marquee_pass();
        assert!(!board.is_waiting_for_first_marquee_pass());
    }

    #[test]
    fn test_force_release_clears_wait() {
        let board = CaptionBoard::new();
        board.begin_wait_for_first_marquee_pass();
        board.force_release();
        assert!(!board.is_waiting_for_first_marquee_pass());
    }
}
