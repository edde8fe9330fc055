use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation/completion token for one scheduled narration attempt.
///
/// Clones share the same underlying flags, so the scheduler and the caller
/// observe the same state. A handle is single-use: once a flag is set it
/// stays set, and a cancelled handle is never marked completed (the scheduler
/// checks cancellation after every suspension point, including the last one).
#[derive(Debug, Clone, Default)]
pub struct SequenceHandle {
    flags: Arc<HandleFlags>,
}

#[derive(Debug, Default)]
struct HandleFlags {
    cancelled: AtomicBool,
    completed: AtomicBool,
}

impl SequenceHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent; has no effect on an attempt that
    /// already ran to completion.
    pub fn cancel(&self) {
        self.flags.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flags.cancelled.load(Ordering::Relaxed)
    }

    pub fn is_completed(&self) -> bool {
        self.flags.completed.load(Ordering::Relaxed)
    }

    /// Whether two handles refer to the same scheduling attempt.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.flags, &other.flags)
    }

    /// Mark natural completion. Scheduler-internal; only called when the
    /// handle is not cancelled.
    pub(crate) fn mark_completed(&self) {
        self.flags.completed.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_handle_is_clear() {
        let h = SequenceHandle::new();
        assert!(!h.is_cancelled());
        assert!(!h.is_completed());
    }

    #[test]
    fn test_cancel_is_permanent_and_idempotent() {
        let h = SequenceHandle::new();
        h.cancel();
        h.cancel();
        assert!(h.is_cancelled());
        assert!(!h.is_completed());
    }

    #[test]
    fn test_mark_completed() {
        let h = SequenceHandle::new();
        h.mark_completed();
        assert!(h.is_completed());
        assert!(!h.is_cancelled());
    }

    #[test]
    fn test_clones_share_state() {
        let h = SequenceHandle::new();
        let observer = h.clone();
        h.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn test_ptr_eq_identity() {
        let a = SequenceHandle::new();
        let b = SequenceHandle::new();
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }
}
