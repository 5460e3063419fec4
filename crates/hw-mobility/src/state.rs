//! Per-agent movement state.

use std::collections::VecDeque;

use hw_core::Cell;

use crate::TravelGoal;

/// The movement state for a single agent.
///
/// An agent is either **stationary** (`goal == None`) or **in transit**
/// along `path` toward `goal`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovementState {
    /// What the agent is heading for.  `None` when stationary.
    pub goal: Option<TravelGoal>,

    /// Cells still to step onto, front first.
    pub path: VecDeque<Cell>,

    /// Distance covered toward `path.front()`, in cells.
    pub step_progress: f32,
}

impl MovementState {
    #[inline]
    pub fn in_transit(&self) -> bool {
        self.goal.is_some()
    }

    /// Length of the step from `at` to the next path cell: 1 for orthogonal
    /// steps, √2 for diagonal ones.
    pub fn step_len(&self, at: Cell) -> f32 {
        match self.path.front() {
            Some(next) if next.x != at.x && next.z != at.z => std::f32::consts::SQRT_2,
            _ => 1.0,
        }
    }

    /// Fraction of the current step completed, in `[0.0, 1.0]`.
    pub fn step_fraction(&self, at: Cell) -> f32 {
        if self.path.is_empty() {
            return 0.0;
        }
        (self.step_progress / self.step_len(at)).min(1.0)
    }
}
