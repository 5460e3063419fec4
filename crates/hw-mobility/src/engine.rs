//! High-level mobility engine: routes travel requests and advances agents.

use hw_agent::AgentStore;
use hw_core::{AgentId, Cell, Rot4};
use hw_spatial::{GridMap, Router};
use tracing::debug;

use crate::{MobilityError, MobilityResult, MobilityStore, Travel, TravelGoal, TravelStatus};

/// Wraps a [`Router`] and [`MobilityStore`].
///
/// # Type parameter
///
/// `R` must implement [`Router`] (e.g. [`hw_spatial::DijkstraRouter`]).
pub struct MobilityEngine<R: Router> {
    pub router: R,
    pub store: MobilityStore,
    /// Cells per tick at speed 1.0.
    pub walk_cells_per_tick: f32,
}

impl<R: Router> MobilityEngine<R> {
    pub fn new(router: R, agent_count: usize, walk_cells_per_tick: f32) -> Self {
        Self {
            router,
            store: MobilityStore::new(agent_count),
            walk_cells_per_tick,
        }
    }

    /// Route `agent` from `from` toward `goal` and start moving.
    pub fn begin_travel(
        &mut self,
        agent: AgentId,
        from:  Cell,
        goal:  TravelGoal,
        map:   &GridMap,
    ) -> MobilityResult<()> {
        if agent.index() >= self.store.states.len() {
            return Err(MobilityError::UnknownAgent(agent));
        }
        let route = self.router.route(map, from, goal.cell, goal.end)?;
        self.store.begin_travel(agent, goal, route);
        Ok(())
    }

    /// Move every travelling agent along its path.
    ///
    /// `speed(agent)` is the multiplier on `walk_cells_per_tick` for this
    /// tick.  Updates `position`, `draw_pos`, `rotation` and `moving` in
    /// `agents`; returns the agents that finished their path this tick.
    pub fn advance(&mut self, agents: &mut AgentStore, mut speed: impl FnMut(AgentId) -> f32) -> Vec<AgentId> {
        let mut arrived = Vec::new();
        for (i, state) in self.store.states.iter_mut().enumerate() {
            if !state.in_transit() {
                continue;
            }
            let agent = AgentId(i as u32);
            let mut at = agents.position[i];
            state.step_progress += self.walk_cells_per_tick * speed(agent).max(0.0);

            while let Some(&next) = state.path.front() {
                let len = state.step_len(at);
                if state.step_progress < len {
                    break;
                }
                state.step_progress -= len;
                if let Some(rot) = Rot4::from_delta(next.x - at.x, next.z - at.z) {
                    agents.rotation[i] = rot;
                }
                at = next;
                state.path.pop_front();
            }
            agents.position[i] = at;

            match state.path.front() {
                Some(&next) => {
                    let t = state.step_fraction(at);
                    agents.draw_pos[i] = at.center().lerp(next.center(), t);
                    agents.moving[i] = true;
                }
                None => {
                    agents.draw_pos[i] = at.center();
                    agents.moving[i] = false;
                    state.goal = None;
                    state.step_progress = 0.0;
                    arrived.push(agent);
                }
            }
        }
        arrived
    }
}

impl<R: Router> Travel for MobilityEngine<R> {
    fn request(&mut self, agent: AgentId, from: Cell, goal: TravelGoal, map: &GridMap) -> TravelStatus {
        if goal.reached_from(from) {
            if self.store.in_transit(agent) {
                self.store.stop(agent);
            }
            return TravelStatus::Arrived;
        }
        if self.store.goal(agent) == Some(goal) {
            return TravelStatus::Traveling;
        }
        match self.begin_travel(agent, from, goal, map) {
            Ok(()) => TravelStatus::Traveling,
            Err(err) => {
                debug!(%agent, goal = %goal.cell, %err, "travel unreachable");
                self.store.stop(agent);
                TravelStatus::Unreachable
            }
        }
    }

    fn cancel(&mut self, agent: AgentId) {
        if agent.index() < self.store.states.len() {
            self.store.stop(agent);
        }
    }

    fn can_reach(&self, map: &GridMap, from: Cell, goal: TravelGoal) -> bool {
        self.router.route(map, from, goal.cell, goal.end).is_ok()
    }
}
