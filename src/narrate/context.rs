use std::sync::Arc;

use crate::audiofx::AudioCueService;
use crate::localization::LocalizationService;
use crate::speech::SpeechService;
use crate::visual_assist::{MarqueeGate, VisualAssistService};

use super::handle::SequenceHandle;

/// Immutable port bundle handed to every step of one running attempt.
///
/// Built fresh each time a sequence enters the running slot (including
/// promotion from pending). Steps read it during `advance` and never retain
/// it.
pub struct SequenceContext {
    speech: Arc<dyn SpeechService>,
    localization: Arc<dyn LocalizationService>,
    audio_fx: Arc<dyn AudioCueService>,
    visual_assist: Option<Arc<dyn VisualAssistService>>,
    handle: SequenceHandle,
}

impl SequenceContext {
    pub(crate) fn new(
        speech: Arc<dyn SpeechService>,
        localization: Arc<dyn LocalizationService>,
        audio_fx: Arc<dyn AudioCueService>,
        visual_assist: Option<Arc<dyn VisualAssistService>>,
        handle: SequenceHandle,
    ) -> Self {
        Self {
            speech,
            localization,
            audio_fx,
            visual_assist,
            handle,
        }
    }

    pub fn speech(&self) -> &dyn SpeechService {
        self.speech.as_ref()
    }

    pub fn localization(&self) -> &dyn LocalizationService {
        self.localization.as_ref()
    }

    pub fn audio_fx(&self) -> &dyn AudioCueService {
        self.audio_fx.as_ref()
    }

    pub fn visual_assist(&self) -> Option<&dyn VisualAssistService> {
        self.visual_assist.as_deref()
    }

    /// Marquee-wait capability of the visual-assist port, when present.
    pub fn marquee_gate(&self) -> Option<&dyn MarqueeGate> {
        self.visual_assist
            .as_deref()
            .and_then(|va| va.marquee_gate())
    }

    /// Handle of the attempt this context belongs to.
    pub fn handle(&self) -> &SequenceHandle {
        &self.handle
    }
}
