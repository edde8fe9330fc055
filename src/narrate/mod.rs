//! Narration sequence scheduling
//!
//! Everything the hub speaks goes through one scheduler so that exactly one
//! coherent voice is heard at a time. A narration request is a factory that
//! produces a [`Sequence`] of cooperative steps; the scheduler drives the
//! running sequence one suspension point per tick, holds at most one pending
//! request behind a non-interruptible sequence, and preempts by priority.
//!
//! # Architecture
//!
//! - [`SequenceHandle`] — cancellation/completion token for one attempt
//! - [`Step`] implementations — speak-and-wait, timed pause, cue fire
//! - [`Sequence`] — ordered steps driven front to back
//! - [`NarrationScheduler`] — running/pending slots, preemption policy
//! - [`GateTimer`] — delayed announcement that self-cancels when its
//!   condition stops holding
//! - [`sequences`] — stock sequence builders shared across the hub

pub mod context;
pub mod gate;
pub mod handle;
pub mod scheduler;
pub mod sequence;
pub mod sequences;
pub mod step;

pub use context::SequenceContext;
pub use gate::{GateStatus, GateTimer, DEFAULT_GATE_DELAY_SECONDS};
pub use handle::SequenceHandle;
pub use scheduler::{NarrationScheduler, NarrationScope};
pub use sequence::{Sequence, SequenceFactory};
pub use step::{PauseFor, PlayCue, SpeakAndWait, Step, StepStatus};
