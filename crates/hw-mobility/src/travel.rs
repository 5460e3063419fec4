//! The travel capability consumed by task steps.

use hw_core::{AgentId, Cell};
use hw_spatial::{GridMap, PathEnd};

/// Where to go and how close counts as "there".
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TravelGoal {
    pub cell: Cell,
    pub end: PathEnd,
}

impl TravelGoal {
    pub fn on(cell: Cell) -> Self {
        TravelGoal { cell, end: PathEnd::OnCell }
    }

    pub fn touch(cell: Cell) -> Self {
        TravelGoal { cell, end: PathEnd::Touch }
    }

    #[inline]
    pub fn reached_from(self, at: Cell) -> bool {
        self.end.satisfied(at, self.cell)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TravelStatus {
    Arrived,
    Traveling,
    Unreachable,
}

/// Advance an agent toward a goal over many ticks.
///
/// `request` is idempotent: calling it every tick with the same goal keeps
/// the journey going and reports `Arrived` once the agent is there.
pub trait Travel {
    fn request(&mut self, agent: AgentId, from: Cell, goal: TravelGoal, map: &GridMap) -> TravelStatus;

    /// Drop any journey in progress.
    fn cancel(&mut self, agent: AgentId);

    fn can_reach(&self, map: &GridMap, from: Cell, goal: TravelGoal) -> bool;
}
