//! Narration sequence scheduler
//!
//! Owns the single running slot, the one-deep pending slot, and the active
//! gate. All calls arrive on the tick driver's thread; mutual exclusion is
//! structural, not lock-based. Preemption policy:
//!
//! - nothing running: start the request immediately, on the same tick
//! - running and non-interruptible: the request replaces the pending slot
//!   (the evicted entry's handle is cancelled)
//! - running and interruptible: a strictly lower-priority request is dropped
//!   and the caller gets the running handle back; otherwise the running
//!   sequence is cancelled and the request starts immediately

use std::sync::Arc;

use tracing::debug;

use crate::audiofx::AudioCueService;
use crate::localization::LocalizationService;
use crate::speech::{SpeechPriority, SpeechService};
use crate::visual_assist::VisualAssistService;

use super::context::SequenceContext;
use super::gate::{GateStatus, GateTimer};
use super::handle::SequenceHandle;
use super::sequence::{Sequence, SequenceFactory};
use super::sequences;
use super::step::StepStatus;

/// Which part of the hub issued a narration request.
///
/// Recorded with the request and surfaced in logs; scheduling never branches
/// on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NarrationScope {
    Start,
    Hub,
    GameModule,
    Gameplay,
}

struct RunningEntry {
    sequence: Sequence,
    ctx: SequenceContext,
    scope: NarrationScope,
    priority: SpeechPriority,
    interruptible: bool,
}

struct PendingEntry {
    factory: SequenceFactory,
    handle: SequenceHandle,
    scope: NarrationScope,
    priority: SpeechPriority,
    interruptible: bool,
}

/// Serializes every spoken sequence in the app onto one voice.
///
/// One instance lives for the lifetime of the UI root; it owns the port
/// handles and both scheduling slots. Drive it with [`tick`](Self::tick)
/// once per frame, passing unscaled wall-clock seconds.
pub struct NarrationScheduler {
    speech: Arc<dyn SpeechService>,
    localization: Arc<dyn LocalizationService>,
    audio_fx: Arc<dyn AudioCueService>,
    visual_assist: Option<Arc<dyn VisualAssistService>>,
    running: Option<RunningEntry>,
    pending: Option<PendingEntry>,
    gate: Option<GateTimer>,
}

impl NarrationScheduler {
    pub fn new(
        speech: Arc<dyn SpeechService>,
        localization: Arc<dyn LocalizationService>,
        audio_fx: Arc<dyn AudioCueService>,
    ) -> Self {
        Self {
            speech,
            localization,
            audio_fx,
            visual_assist: None,
            running: None,
            pending: None,
            gate: None,
        }
    }

    /// Attach the optional visual-assist port.
    pub fn with_visual_assist(mut self, visual_assist: Arc<dyn VisualAssistService>) -> Self {
        self.visual_assist = Some(visual_assist);
        self
    }

    /// Request a narration sequence.
    ///
    /// The returned handle identifies the accepted attempt: a fresh handle
    /// when the request was started or queued, the running sequence's handle
    /// when the request was dropped in its favor.
    pub fn play<F>(
        &mut self,
        scope: NarrationScope,
        sequence: F,
        priority: SpeechPriority,
        interruptible: bool,
    ) -> SequenceHandle
    where
        F: FnOnce(&SequenceContext) -> Sequence + 'static,
    {
        let Some(current) = &self.running else {
            return self.start_new(scope, Box::new(sequence), priority, interruptible);
        };

        if !current.interruptible {
            return self.queue_pending(scope, Box::new(sequence), priority, interruptible);
        }

        if priority < current.priority {
            debug!(
                ?scope,
                ?priority,
                running = ?current.priority,
                "narration request dropped in favor of running sequence"
            );
            return current.ctx.handle().clone();
        }

        self.cancel_for_preempt();
        self.start_new(scope, Box::new(sequence), priority, interruptible)
    }

    /// Defer an announcement until `delay_seconds` passes with `predicate`
    /// still holding; fires as a non-interruptible [`play`](Self::play).
    ///
    /// Replaces any gate already counting down. A blank key is a no-op.
    pub fn play_gated<P>(
        &mut self,
        scope: NarrationScope,
        key: &str,
        predicate: P,
        delay_seconds: f32,
        priority: SpeechPriority,
        args: &[String],
    ) where
        P: Fn() -> bool + 'static,
    {
        if key.trim().is_empty() {
            return;
        }
        if self.gate.is_some() {
            debug!(?scope, key, "replacing active narration gate");
        }
        self.gate = Some(GateTimer::new(
            scope,
            key.to_string(),
            Box::new(predicate),
            delay_seconds,
            priority,
            args.to_vec(),
        ));
    }

    /// Cancel everything: gate, running sequence, pending request, and any
    /// in-flight speech. Safe to call with nothing active.
    pub fn cancel_current(&mut self) {
        self.gate = None;
        if let Some(entry) = self.running.take() {
            debug!(scope = ?entry.scope, "cancelling running narration");
            entry.ctx.handle().cancel();
        }
        if let Some(pending) = self.pending.take() {
            pending.handle.cancel();
        }
        self.force_release_marquee();
        self.speech.stop_all();
    }

    /// Advance all active cooperative work by one suspension point.
    ///
    /// The running sequence moves first; a gate firing on this tick starts
    /// its announcement synchronously and is not advanced again until the
    /// next tick.
    pub fn tick(&mut self, dt: f32) {
        self.advance_running(dt);
        self.tick_gate(dt);
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn gate_active(&self) -> bool {
        self.gate.is_some()
    }

    /// Scope of the running sequence, if any.
    pub fn current_scope(&self) -> Option<NarrationScope> {
        self.running.as_ref().map(|entry| entry.scope)
    }

    /// Handle of the running sequence, if any.
    pub fn current_handle(&self) -> Option<SequenceHandle> {
        self.running.as_ref().map(|entry| entry.ctx.handle().clone())
    }

    fn start_new(
        &mut self,
        scope: NarrationScope,
        factory: SequenceFactory,
        priority: SpeechPriority,
        interruptible: bool,
    ) -> SequenceHandle {
        self.force_release_marquee();

        let handle = SequenceHandle::new();
        let ctx = self.make_context(handle.clone());
        let sequence = factory(&ctx);
        debug!(
            ?scope,
            ?priority,
            interruptible,
            steps = sequence.len(),
            "starting narration sequence"
        );
        self.running = Some(RunningEntry {
            sequence,
            ctx,
            scope,
            priority,
            interruptible,
        });
        // First suspension point runs within the caller's tick.
        self.advance_running(0.0);
        handle
    }

    fn queue_pending(
        &mut self,
        scope: NarrationScope,
        factory: SequenceFactory,
        priority: SpeechPriority,
        interruptible: bool,
    ) -> SequenceHandle {
        if let Some(evicted) = self.pending.take() {
            debug!(scope = ?evicted.scope, "evicting pending narration");
            evicted.handle.cancel();
        }
        let handle = SequenceHandle::new();
        debug!(?scope, ?priority, "queueing narration behind non-interruptible sequence");
        self.pending = Some(PendingEntry {
            factory,
            handle: handle.clone(),
            scope,
            priority,
            interruptible,
        });
        handle
    }

    fn cancel_for_preempt(&mut self) {
        self.gate = None;
        if let Some(entry) = self.running.take() {
            debug!(scope = ?entry.scope, "preempting running narration");
            entry.ctx.handle().cancel();
        }
        self.force_release_marquee();
        self.speech.stop_all();
    }

    fn tick_gate(&mut self, dt: f32) {
        let Some(mut gate) = self.gate.take() else {
            return;
        };
        match gate.tick(dt) {
            GateStatus::Waiting => self.gate = Some(gate),
            GateStatus::Aborted => {
                debug!("narration gate aborted, condition no longer holds");
            }
            GateStatus::Fired => {
                let (scope, key, args, priority) = gate.into_request();
                debug!(?scope, key = %key, "narration gate fired");
                self.play(
                    scope,
                    move |_ctx: &SequenceContext| sequences::navigate_to(&key, &args),
                    priority,
                    false,
                );
            }
        }
    }

    fn advance_running(&mut self, dt: f32) {
        let Some(entry) = self.running.as_mut() else {
            return;
        };
        let status = entry.sequence.advance(&entry.ctx, dt);
        let handle = entry.ctx.handle().clone();

        // Cancellation wins over completion, even on the final suspension.
        if handle.is_cancelled() {
            self.running = None;
            return;
        }
        if status == StepStatus::Done {
            handle.mark_completed();
            self.running = None;
            self.promote_pending();
        }
    }

    fn promote_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if pending.handle.is_cancelled() {
            return;
        }
        debug!(scope = ?pending.scope, "promoting pending narration");
        let ctx = self.make_context(pending.handle.clone());
        let sequence = (pending.factory)(&ctx);
        self.running = Some(RunningEntry {
            sequence,
            ctx,
            scope: pending.scope,
            priority: pending.priority,
            interruptible: pending.interruptible,
        });
        // Promotion happens on the completing tick, with no idle tick.
        self.advance_running(0.0);
    }

    fn make_context(&self, handle: SequenceHandle) -> SequenceContext {
        SequenceContext::new(
            self.speech.clone(),
            self.localization.clone(),
            self.audio_fx.clone(),
            self.visual_assist.clone(),
            handle,
        )
    }

    fn force_release_marquee(&self) {
        if let Some(gate) = self
            .visual_assist
            .as_deref()
            .and_then(|va| va.marquee_gate())
        {
            gate.force_release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audiofx::RecordingAudioCueService;
    use crate::localization::TableLocalization;
    use crate::narrate::sequences;
    use crate::speech::StubSpeechService;

    fn scheduler() -> (NarrationScheduler, Arc<StubSpeechService>) {
        let speech = Arc::new(StubSpeechService::new());
        let mut table = TableLocalization::new();
        table.insert("greet", "Hello");
        table.insert("exit.to_main_menu", "Back to main menu");
        let scheduler = NarrationScheduler::new(
            speech.clone(),
            Arc::new(table),
            Arc::new(RecordingAudioCueService::new()),
        );
        (scheduler, speech)
    }

    #[test]
    fn test_play_starts_synchronously_when_idle() {
        let (mut scheduler, speech) = scheduler();
        let handle = scheduler.play(
            NarrationScope::Hub,
            |_| sequences::speak_key("greet", &[]),
            SpeechPriority::Normal,
            true,
        );
        assert!(scheduler.is_running());
        assert!(!handle.is_cancelled());
        assert_eq!(speech.spoken(), vec!["Hello".to_string()]);
    }

    #[test]
    fn test_lower_priority_returns_running_handle() {
        let (mut scheduler, _speech) = scheduler();
        let first = scheduler.play(
            NarrationScope::Hub,
            |_| sequences::speak_key("greet", &[]),
            SpeechPriority::High,
            true,
        );
        let second = scheduler.play(
            NarrationScope::Hub,
            |_| sequences::speak_key("greet", &[]),
            SpeechPriority::Normal,
            true,
        );
        assert!(first.ptr_eq(&second));
        assert!(!first.is_cancelled());
    }

    #[test]
    fn test_equal_priority_preempts() {
        let (mut scheduler, speech) = scheduler();
        let first = scheduler.play(
            NarrationScope::Hub,
            |_| sequences::speak_key("greet", &[]),
            SpeechPriority::Normal,
            true,
        );
        let second = scheduler.play(
            NarrationScope::Hub,
            |_| sequences::speak_key("greet", &[]),
            SpeechPriority::Normal,
            true,
        );
        assert!(first.is_cancelled());
        assert!(!first.ptr_eq(&second));
        assert_eq!(speech.stop_calls(), 1);
        assert!(scheduler.is_running());
    }

    #[test]
    fn test_non_interruptible_queues_latest_request() {
        let (mut scheduler, _speech) = scheduler();
        let running = scheduler.play(
            NarrationScope::Hub,
            |_| sequences::speak_key("greet", &[]),
            SpeechPriority::Normal,
            false,
        );
        let queued_a = scheduler.play(
            NarrationScope::Hub,
            |_| sequences::speak_key("greet", &[]),
            SpeechPriority::High,
            true,
        );
        let queued_b = scheduler.play(
            NarrationScope::Hub,
            |_| sequences::speak_key("greet", &[]),
            SpeechPriority::High,
            true,
        );
        assert!(!running.is_cancelled());
        assert!(queued_a.is_cancelled());
        assert!(!queued_b.is_cancelled());
        assert!(scheduler.has_pending());
    }

    #[test]
    fn test_cancel_current_is_idempotent() {
        let (mut scheduler, _speech) = scheduler();
        scheduler.cancel_current();
        scheduler.cancel_current();
        assert!(!scheduler.is_running());
        assert!(!scheduler.has_pending());
        assert!(!scheduler.gate_active());
    }

    #[test]
    fn test_blank_gate_key_is_noop() {
        let (mut scheduler, _speech) = scheduler();
        scheduler.play_gated(
            NarrationScope::Hub,
            "   ",
            || true,
            0.5,
            SpeechPriority::High,
            &[],
        );
        assert!(!scheduler.gate_active());
    }

    #[test]
    fn test_empty_sequence_completes_on_play() {
        let (mut scheduler, _speech) = scheduler();
        let handle = scheduler.play(
            NarrationScope::Hub,
            |_| Sequence::new(),
            SpeechPriority::Normal,
            true,
        );
        assert!(handle.is_completed());
        assert!(!scheduler.is_running());
    }
}
