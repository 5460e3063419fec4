//! Step results and final task status.

use std::fmt;

/// What a step wants the driver to do next.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepOutcome<S> {
    Next,
    Wait,
    JumpTo(S),
    End(TaskEnd),
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TaskStatus {
    Succeeded,
    /// The world changed under the task (target gone, carrier lost, forced
    /// dismount).  Not an error; the agent just picks something else.
    Incompletable,
    /// A condition that retrying cannot fix, such as loading with no carrier.
    Errored,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Succeeded => "succeeded",
            TaskStatus::Incompletable => "incompletable",
            TaskStatus::Errored => "errored",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How and why a task stopped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TaskEnd {
    pub status: TaskStatus,
    pub reason: Option<&'static str>,
}

impl TaskEnd {
    pub const fn succeeded() -> Self {
        TaskEnd { status: TaskStatus::Succeeded, reason: None }
    }

    pub const fn incompletable(reason: &'static str) -> Self {
        TaskEnd { status: TaskStatus::Incompletable, reason: Some(reason) }
    }

    pub const fn errored(reason: &'static str) -> Self {
        TaskEnd { status: TaskStatus::Errored, reason: Some(reason) }
    }

    pub const fn cancelled() -> Self {
        TaskEnd { status: TaskStatus::Cancelled, reason: None }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == TaskStatus::Succeeded
    }
}

impl fmt::Display for TaskEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            Some(r) => write!(f, "{} ({r})", self.status),
            None => write!(f, "{}", self.status),
        }
    }
}
