use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::speech::SpeechService;

use super::inactivity::UserInactivity;

/// Default idle time before a repeat request is honored.
pub const DEFAULT_IDLE_THRESHOLD_SECONDS: f32 = 10.0;

/// Minimum spacing between automatic repeat checks.
const MIN_AUTO_INTERVAL_SECONDS: f32 = 0.05;

/// Idle-gated repeat requests.
///
/// A repeat is refused while speech is active, while the app reports a
/// transition in progress, or before the idle threshold has passed. The
/// registered handler decides what "repeat" means for the current screen
/// (typically re-playing its prompt sequence).
pub struct RepeatService {
    inactivity: Arc<Mutex<UserInactivity>>,
    speech: Arc<dyn SpeechService>,
    transitioning: Box<dyn Fn() -> bool>,
    handler: Option<Box<dyn Fn()>>,
    pub idle_threshold_seconds: f32,
    auto_interval: f32,
    auto_clock: f32,
    next_auto: f32,
}

impl RepeatService {
    pub fn new(
        inactivity: Arc<Mutex<UserInactivity>>,
        speech: Arc<dyn SpeechService>,
        transitioning: impl Fn() -> bool + 'static,
    ) -> Self {
        Self {
            inactivity,
            speech,
            transitioning: Box::new(transitioning),
            handler: None,
            idle_threshold_seconds: DEFAULT_IDLE_THRESHOLD_SECONDS,
            auto_interval: 0.5,
            auto_clock: 0.0,
            next_auto: 0.0,
        }
    }

    pub fn set_repeat_handler(&mut self, handler: impl Fn() + 'static) {
        self.handler = Some(Box::new(handler));
    }

    pub fn set_auto_interval(&mut self, seconds: f32) {
        self.auto_interval = seconds.max(MIN_AUTO_INTERVAL_SECONDS);
    }

    /// Ask for a repeat now. Returns whether the request was honored.
    pub fn request_repeat(&self) -> bool {
        if self.speech.is_speaking() {
            return false;
        }
        if (self.transitioning)() {
            return false;
        }
        if !self
            .inactivity
            .lock()
            .is_idle(self.idle_threshold_seconds)
        {
            return false;
        }

        debug!("repeat request honored");
        if let Some(handler) = &self.handler {
            handler();
        }
        true
    }

    /// Periodic automatic check, driven once per frame. Returns whether a
    /// repeat fired this tick.
    pub fn tick_auto(&mut self, dt: f32) -> bool {
        self.auto_clock += dt;
        if self.auto_clock < self.next_auto {
            return false;
        }
        self.next_auto = self.auto_clock + self.auto_interval;
        self.request_repeat()
    }
}
