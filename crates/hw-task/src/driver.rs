//! Runs an ordered list of steps.

use std::fmt::Debug;

use tracing::trace;

use crate::{StepOutcome, TaskEnd};

/// Instant transitions (`Next` / `JumpTo`) allowed in one tick before the
/// driver yields.  Keeps a jump cycle from spinning forever inside a tick.
pub const MAX_TRANSITIONS_PER_TICK: usize = 32;

/// Cursor over an ordered step list.
#[derive(Clone, Debug)]
pub struct TaskDriver<S> {
    steps: Vec<S>,
    cursor: usize,
    ended: Option<TaskEnd>,
}

impl<S: Copy + PartialEq + Debug> TaskDriver<S> {
    pub fn new(steps: Vec<S>) -> Self {
        TaskDriver { steps, cursor: 0, ended: None }
    }

    /// The step that will run next, or `None` once the task has ended.
    pub fn current(&self) -> Option<S> {
        if self.ended.is_some() {
            return None;
        }
        self.steps.get(self.cursor).copied()
    }

    #[inline]
    pub fn ended(&self) -> Option<TaskEnd> {
        self.ended
    }

    /// Force the task to stop.  Has no effect on a task that already ended.
    pub fn end(&mut self, end: TaskEnd) {
        self.ended.get_or_insert(end);
    }

    /// Run steps until one waits, the task ends, or the per-tick transition
    /// budget runs out.  Returns the end status the first time the task
    /// stops.
    pub fn tick(&mut self, mut run: impl FnMut(S) -> StepOutcome<S>) -> Option<TaskEnd> {
        if self.ended.is_some() {
            return None;
        }
        for _ in 0..MAX_TRANSITIONS_PER_TICK {
            let Some(&step) = self.steps.get(self.cursor) else {
                return self.finish(TaskEnd::succeeded());
            };
            match run(step) {
                StepOutcome::Next => {
                    self.cursor += 1;
                    if self.cursor >= self.steps.len() {
                        return self.finish(TaskEnd::succeeded());
                    }
                }
                StepOutcome::Wait => return None,
                StepOutcome::JumpTo(target) => match self.steps.iter().position(|&s| s == target) {
                    Some(i) => self.cursor = i,
                    None => return self.finish(TaskEnd::errored("jump to a step not in this task")),
                },
                StepOutcome::End(end) => return self.finish(end),
            }
        }
        trace!(step = ?self.steps.get(self.cursor), "transition budget spent, yielding");
        None
    }

    fn finish(&mut self, end: TaskEnd) -> Option<TaskEnd> {
        self.ended = Some(end);
        Some(end)
    }
}
