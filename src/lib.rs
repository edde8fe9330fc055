// voxhub library
// Audio-first game hub: narration scheduling and the ports it speaks through

pub mod activity;
pub mod audiofx;
pub mod config;
pub mod localization;
pub mod narrate;
pub mod speech;
pub mod visual_assist;

pub use narrate::{
    GateStatus, GateTimer, NarrationScheduler, NarrationScope, Sequence, SequenceContext,
    SequenceHandle, Step, StepStatus,
};
pub use speech::SpeechPriority;
