//! Delayed, condition-checked announcement trigger
//!
//! A gate defers an announcement and keeps re-checking that the world still
//! warrants it; if the predicate stops holding before the delay elapses the
//! announcement is silently dropped. The scheduler keeps at most one gate
//! alive: starting a new one replaces the old one.

use crate::speech::SpeechPriority;

use super::scheduler::NarrationScope;

/// Stock gate delay: long enough to skip announcements for screens the user
/// flicks straight through, short enough to feel immediate.
pub const DEFAULT_GATE_DELAY_SECONDS: f32 = 0.5;

/// Outcome of one gate tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// Delay still running, predicate still holds.
    Waiting,
    /// Delay elapsed with the predicate holding; issue the announcement.
    Fired,
    /// Predicate stopped holding; no announcement.
    Aborted,
}

/// Independent countdown for "announce only if this still matters" requests.
pub struct GateTimer {
    scope: NarrationScope,
    key: String,
    args: Vec<String>,
    priority: SpeechPriority,
    predicate: Box<dyn Fn() -> bool>,
    delay: f32,
    elapsed: f32,
}

impl GateTimer {
    pub fn new(
        scope: NarrationScope,
        key: String,
        predicate: Box<dyn Fn() -> bool>,
        delay_seconds: f32,
        priority: SpeechPriority,
        args: Vec<String>,
    ) -> Self {
        Self {
            scope,
            key,
            args,
            priority,
            predicate,
            delay: delay_seconds,
            elapsed: 0.0,
        }
    }

    /// Poll the predicate and advance the countdown by one tick.
    pub fn tick(&mut self, dt: f32) -> GateStatus {
        if !(self.predicate)() {
            return GateStatus::Aborted;
        }
        self.elapsed += dt;
        if self.elapsed < self.delay {
            return GateStatus::Waiting;
        }
        if (self.predicate)() {
            GateStatus::Fired
        } else {
            GateStatus::Aborted
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Consume the gate and hand back the announcement it was holding.
    pub(crate) fn into_request(self) -> (NarrationScope, String, Vec<String>, SpeechPriority) {
        (self.scope, self.key, self.args, self.priority)
    }
}
