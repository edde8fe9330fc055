use std::collections::VecDeque;

use super::context::SequenceContext;
use super::step::{Step, StepStatus};

/// Factory invoked once when a request enters the running slot. Requests are
/// side-effect-free until the produced sequence is driven.
pub type SequenceFactory = Box<dyn FnOnce(&SequenceContext) -> Sequence>;

/// An ordered list of narration steps executed cooperatively to completion
/// or cancellation.
///
/// Steps run front to back; a finished step is popped and the next one
/// begins on the following tick. An empty sequence completes on its first
/// advance.
#[derive(Default)]
pub struct Sequence {
    steps: VecDeque<Box<dyn Step>>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: Vec<Box<dyn Step>>) -> Self {
        Self {
            steps: steps.into(),
        }
    }

    /// Append a step, builder style.
    pub fn then(mut self, step: impl Step + 'static) -> Self {
        self.steps.push_back(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn advance(&mut self, ctx: &SequenceContext, dt: f32) -> StepStatus {
        let Some(step) = self.steps.front_mut() else {
            return StepStatus::Done;
        };
        match step.advance(ctx, dt) {
            StepStatus::Suspended => StepStatus::Suspended,
            StepStatus::Done => {
                self.steps.pop_front();
                if self.steps.is_empty() {
                    StepStatus::Done
                } else {
                    StepStatus::Suspended
                }
            }
        }
    }
}
