use parking_lot::Mutex;

use super::{AudioCueService, UiCueId};

/// Cue device that discards everything. Used when the platform has no audio
/// output or cues are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudioCueService;

impl AudioCueService for NullAudioCueService {
    fn play_cue(&self, _cue: UiCueId) {}
    fn stop_all(&self) {}
}

/// Cue device that records what was played; the test-side counterpart of
/// [`NullAudioCueService`].
#[derive(Debug, Default)]
pub struct RecordingAudioCueService {
    state: Mutex<RecordingState>,
}

#[derive(Debug, Default)]
struct RecordingState {
    played: Vec<UiCueId>,
    stop_calls: usize,
}

impl RecordingAudioCueService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<UiCueId> {
        self.state.lock().played.clone()
    }

    pub fn stop_calls(&self) -> usize {
        self.state.lock().stop_calls
    }
}

impl AudioCueService for RecordingAudioCueService {
    fn play_cue(&self, cue: UiCueId) {
        self.state.lock().played.push(cue);
    }

    fn stop_all(&self) {
        self.state.lock().stop_calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_service_is_silent() {
        let cues = NullAudioCueService;
        cues.play_cue(UiCueId::Confirm);
        cues.stop_all();
    }

    #[test]
    fn test_recording_service_tracks_cues() {
        let cues = RecordingAudioCueService::new();
        cues.play_cue(UiCueId::NavigateNext);
        cues.play_cue(UiCueId::Confirm);
        cues.stop_all();
        assert_eq!(cues.played(), vec![UiCueId::NavigateNext, UiCueId::Confirm]);
        assert_eq!(cues.stop_calls(), 1);
    }
}
