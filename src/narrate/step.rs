//! Cooperative narration steps
//!
//! A step advances by exactly one suspension point per `advance` call; `dt`
//! is the unscaled wall-clock time since the previous tick, so narration
//! keeps moving while gameplay is paused or slowed. Cancellation is observed
//! only at suspension points: whatever runs between two suspensions always
//! finishes.

use crate::audiofx::UiCueId;

use super::context::SequenceContext;

/// How long to poll the speech device for a "speaking" signal after a speak
/// request before concluding the backend will never report one.
pub const START_DETECT_TIMEOUT: f32 = 0.75;

/// Minimum audible gap honored for backends that never report a speaking
/// state, so consecutive utterances do not overlap.
pub const PROTECT_WINDOW: f32 = 0.35;

/// Outcome of advancing a step by one suspension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The step yielded; call `advance` again next tick.
    Suspended,
    /// The step finished (ran to its end or observed cancellation).
    Done,
}

/// One cooperative unit of narration work.
pub trait Step {
    fn advance(&mut self, ctx: &SequenceContext, dt: f32) -> StepStatus;
}

fn release_marquee(ctx: &SequenceContext) {
    if let Some(gate) = ctx.marquee_gate() {
        gate.force_release();
    }
}

#[derive(Debug, Clone, Copy)]
enum SpeakState {
    NotStarted,
    StartDetect { t: f32 },
    Protect { p: f32 },
    WaitComplete,
    MarqueeWait,
}

/// Speak a localized key, then wait for the speech device to start and
/// finish.
///
/// The speak call is fire-and-forget, so the step first polls for the device
/// to report speaking (up to [`START_DETECT_TIMEOUT`]). Backends that never
/// report a speaking state fall into a fixed [`PROTECT_WINDOW`] instead of
/// the completion wait; that branch is a timing heuristic, not a completion
/// guarantee. After speech ends, the step holds until the first marquee pass
/// when the visual-assist port asks for one.
pub struct SpeakAndWait {
    key: String,
    args: Vec<String>,
    state: SpeakState,
}

impl SpeakAndWait {
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_args(key, Vec::new())
    }

    pub fn with_args(key: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            key: key.into(),
            args,
            state: SpeakState::NotStarted,
        }
    }
}

impl Step for SpeakAndWait {
    fn advance(&mut self, ctx: &SequenceContext, dt: f32) -> StepStatus {
        let handle = ctx.handle();
        loop {
            match &mut self.state {
                SpeakState::NotStarted => {
                    if handle.is_cancelled() {
                        return StepStatus::Done;
                    }
                    let text = if self.args.is_empty() {
                        ctx.localization().get(&self.key)
                    } else {
                        ctx.localization().get_args(&self.key, &self.args)
                    };
                    if let Some(va) = ctx.visual_assist() {
                        va.notify_planned_speech(&text);
                    }
                    ctx.speech().speak(&text);
                    self.state = SpeakState::StartDetect { t: 0.0 };
                    return StepStatus::Suspended;
                }
                SpeakState::StartDetect { t } => {
                    if handle.is_cancelled() || ctx.speech().is_speaking() {
                        self.state = SpeakState::WaitComplete;
                        continue;
                    }
                    if *t >= START_DETECT_TIMEOUT {
                        self.state = SpeakState::Protect { p: 0.0 };
                        continue;
                    }
                    *t += dt;
                    return StepStatus::Suspended;
                }
                SpeakState::Protect { p } => {
                    if handle.is_cancelled() || *p >= PROTECT_WINDOW {
                        release_marquee(ctx);
                        return StepStatus::Done;
                    }
                    *p += dt;
                    return StepStatus::Suspended;
                }
                SpeakState::WaitComplete => {
                    if ctx.speech().is_speaking() {
                        if handle.is_cancelled() {
                            release_marquee(ctx);
                            return StepStatus::Done;
                        }
                        return StepStatus::Suspended;
                    }
                    match ctx.marquee_gate() {
                        Some(gate) if gate.is_waiting_for_first_marquee_pass() => {
                            self.state = SpeakState::MarqueeWait;
                            continue;
                        }
                        _ => return StepStatus::Done,
                    }
                }
                SpeakState::MarqueeWait => {
                    let Some(gate) = ctx.marquee_gate() else {
                        return StepStatus::Done;
                    };
                    if handle.is_cancelled() {
                        gate.force_release();
                        return StepStatus::Done;
                    }
                    if !gate.is_waiting_for_first_marquee_pass() {
                        return StepStatus::Done;
                    }
                    return StepStatus::Suspended;
                }
            }
        }
    }
}

/// Timed cooperative delay, cancellation-checked every tick.
pub struct PauseFor {
    seconds: f32,
    elapsed: f32,
}

impl PauseFor {
    pub fn new(seconds: f32) -> Self {
        Self {
            seconds,
            elapsed: 0.0,
        }
    }
}

impl Step for PauseFor {
    fn advance(&mut self, ctx: &SequenceContext, dt: f32) -> StepStatus {
        if ctx.handle().is_cancelled() || self.elapsed >= self.seconds {
            return StepStatus::Done;
        }
        self.elapsed += dt;
        StepStatus::Suspended
    }
}

/// Fire a non-speech feedback cue and finish without suspending.
pub struct PlayCue {
    cue: UiCueId,
}

impl PlayCue {
    pub fn new(cue: UiCueId) -> Self {
        Self { cue }
    }
}

impl Step for PlayCue {
    fn advance(&mut self, ctx: &SequenceContext, _dt: f32) -> StepStatus {
        if !ctx.handle().is_cancelled() {
            ctx.audio_fx().play_cue(self.cue);
        }
        StepStatus::Done
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::audiofx::RecordingAudioCueService;
    use crate::localization::TableLocalization;
    use crate::narrate::handle::SequenceHandle;
    use crate::speech::StubSpeechService;
    use crate::visual_assist::CaptionBoard;
    use crate::visual_assist::MarqueeGate;

    struct Rig {
        speech: Arc<StubSpeechService>,
        cues: Arc<RecordingAudioCueService>,
        board: Arc<CaptionBoard>,
        ctx: SequenceContext,
    }

    fn rig() -> Rig {
        let speech = Arc::new(StubSpeechService::new());
        let cues = Arc::new(RecordingAudioCueService::new());
        let board = Arc::new(CaptionBoard::new());
        let mut table = TableLocalization::new();
        table.insert("greet", "Hello");
        table.insert("current.game", "Current game: {0}");
        let ctx = SequenceContext::new(
            speech.clone(),
            Arc::new(table),
            cues.clone(),
            Some(board.clone()),
            SequenceHandle::new(),
        );
        Rig {
            speech,
            cues,
            board,
            ctx,
        }
    }

    #[test]
    fn test_speak_resolves_and_fires_on_first_advance() {
        let rig = rig();
        let mut step = SpeakAndWait::new("greet");
        assert_eq!(step.advance(&rig.ctx, 0.0), StepStatus::Suspended);
        assert_eq!(rig.speech.spoken(), vec!["Hello".to_string()]);
        assert_eq!(rig.board.current_caption().as_deref(), Some("Hello"));
    }

    #[test]
    fn test_speak_substitutes_args() {
        let rig = rig();
        let mut step =
            SpeakAndWait::with_args("current.game", vec!["Memory Match".to_string()]);
        step.advance(&rig.ctx, 0.0);
        assert_eq!(rig.speech.last_spoken().as_deref(), Some("Current game: Memory Match"));
    }

    #[test]
    fn test_cancelled_before_start_has_no_side_effect() {
        let rig = rig();
        rig.ctx.handle().cancel();
        let mut step = SpeakAndWait::new("greet");
        assert_eq!(step.advance(&rig.ctx, 0.0), StepStatus::Done);
        assert!(rig.speech.spoken().is_empty());
    }

    #[test]
    fn test_speak_waits_for_completion() {
        let rig = rig();
        let mut step = SpeakAndWait::new("greet");
        step.advance(&rig.ctx, 0.0);

        rig.speech.set_speaking(true);
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Suspended);
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Suspended);

        rig.speech.set_speaking(false);
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Done);
    }

    #[test]
    fn test_speak_protect_window_when_backend_never_speaks() {
        let rig = rig();
        let mut step = SpeakAndWait::new("greet");
        step.advance(&rig.ctx, 0.0);

        let dt = 0.05;
        let mut ticks = 0;
        while step.advance(&rig.ctx, dt) == StepStatus::Suspended {
            ticks += 1;
            assert!(ticks < 100, "step never finished");
        }
        let elapsed = ticks as f32 * dt;
        let expected = START_DETECT_TIMEOUT + PROTECT_WINDOW;
        assert!(
            (elapsed - expected).abs() <= dt + 1e-4,
            "elapsed {elapsed} not within one tick of {expected}"
        );
    }

    #[test]
    fn test_speak_cancel_during_completion_wait() {
        let rig = rig();
        let mut step = SpeakAndWait::new("greet");
        step.advance(&rig.ctx, 0.0);
        rig.speech.set_speaking(true);
        step.advance(&rig.ctx, 0.1);

        rig.ctx.handle().cancel();
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Done);
    }

    #[test]
    fn test_speak_holds_for_first_marquee_pass() {
        let rig = rig();
        let mut step = SpeakAndWait::new("greet");
        step.advance(&rig.ctx, 0.0);
        rig.speech.set_speaking(true);
        step.advance(&rig.ctx, 0.1);

        rig.board.begin_wait_for_first_marquee_pass();
        rig.speech.set_speaking(false);
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Suspended);
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Suspended);

        rig.board.complete_wait_for_first_marquee_pass();
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Done);
    }

    #[test]
    fn test_pause_accumulates_wall_clock() {
        let rig = rig();
        let mut step = PauseFor::new(0.3);
        assert_eq!(step.advance(&rig.ctx, 0.0), StepStatus::Suspended);
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Suspended);
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Suspended);
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Suspended);
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Done);
    }

    #[test]
    fn test_pause_cancels_mid_wait() {
        let rig = rig();
        let mut step = PauseFor::new(5.0);
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Suspended);
        rig.ctx.handle().cancel();
        assert_eq!(step.advance(&rig.ctx, 0.1), StepStatus::Done);
    }

    #[test]
    fn test_play_cue_fires_once_and_finishes() {
        let rig = rig();
        let mut step = PlayCue::new(UiCueId::Confirm);
        assert_eq!(step.advance(&rig.ctx, 0.0), StepStatus::Done);
        assert_eq!(rig.cues.played(), vec![UiCueId::Confirm]);
    }

    #[test]
    fn test_play_cue_skipped_when_cancelled() {
        let rig = rig();
        rig.ctx.handle().cancel();
        let mut step = PlayCue::new(UiCueId::Confirm);
        assert_eq!(step.advance(&rig.ctx, 0.0), StepStatus::Done);
        assert!(rig.cues.played().is_empty());
    }
}
