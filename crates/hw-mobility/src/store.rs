//! The `MobilityStore`: per-agent movement state.

use hw_core::AgentId;
use hw_spatial::Route;

use crate::{MovementState, TravelGoal};

/// Movement state for every agent, indexed by `AgentId`.
pub struct MobilityStore {
    pub states: Vec<MovementState>,
}

impl MobilityStore {
    /// Create a store with all agents stationary.
    pub fn new(agent_count: usize) -> Self {
        Self { states: vec![MovementState::default(); agent_count] }
    }

    /// Start `agent` along `route` toward `goal`.
    pub fn begin_travel(&mut self, agent: AgentId, goal: TravelGoal, route: Route) {
        self.states[agent.index()] = MovementState {
            goal: Some(goal),
            path: route.cells.into(),
            step_progress: 0.0,
        };
    }

    /// Stop `agent` where it stands.
    pub fn stop(&mut self, agent: AgentId) {
        self.states[agent.index()] = MovementState::default();
    }

    #[inline]
    pub fn in_transit(&self, agent: AgentId) -> bool {
        self.states.get(agent.index()).is_some_and(|s| s.in_transit())
    }

    #[inline]
    pub fn goal(&self, agent: AgentId) -> Option<TravelGoal> {
        self.states.get(agent.index()).and_then(|s| s.goal)
    }
}
