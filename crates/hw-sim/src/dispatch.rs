//! Who gets which job.
//!
//! The sim asks its [`Dispatcher`] once per tick for every idle agent.
//! Dispatchers only read the world; claiming happens when the returned
//! [`JobOrder`] is started.

use std::collections::{BTreeMap, VecDeque};

use hw_agent::AgentStore;
use hw_core::{AgentId, ItemId, Target, Tick, VehicleId};
use hw_haul::{CarrierRef, HaulOrder, JobOrder};
use hw_reserve::ReservationManager;
use hw_spatial::{GridMap, GroundItems};
use hw_vehicle::{Vehicle, VehicleStore};
use tracing::debug;

/// Read-only world view handed to a dispatcher.
pub struct DispatchContext<'a> {
    pub now: Tick,
    pub agents: &'a AgentStore,
    pub vehicles: &'a VehicleStore,
    pub ground: &'a GroundItems,
    pub map: &'a GridMap,
    pub reservations: &'a ReservationManager,
}

pub trait Dispatcher {
    /// A job for idle `agent`, or `None` to leave it idle this tick.
    fn next_job(&mut self, agent: AgentId, ctx: &DispatchContext<'_>) -> Option<JobOrder>;
}

/// Tries `A` first, then `B`.
impl<A: Dispatcher, B: Dispatcher> Dispatcher for (A, B) {
    fn next_job(&mut self, agent: AgentId, ctx: &DispatchContext<'_>) -> Option<JobOrder> {
        self.0.next_job(agent, ctx).or_else(|| self.1.next_job(agent, ctx))
    }
}

/// Never hands out work.  Jobs come from [`Sim::assign`](crate::Sim::assign) only.
pub struct NoopDispatcher;

impl Dispatcher for NoopDispatcher {
    fn next_job(&mut self, _agent: AgentId, _ctx: &DispatchContext<'_>) -> Option<JobOrder> {
        None
    }
}

// ── Scripted ─────────────────────────────────────────────────────────────────

/// Hands out pre-queued orders per agent, in push order.
#[derive(Default)]
pub struct ScriptedDispatcher {
    queued: BTreeMap<AgentId, VecDeque<JobOrder>>,
}

impl ScriptedDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, agent: AgentId, order: JobOrder) -> &mut Self {
        self.queued.entry(agent).or_default().push_back(order);
        self
    }

    pub fn pending(&self, agent: AgentId) -> usize {
        self.queued.get(&agent).map_or(0, VecDeque::len)
    }
}

impl Dispatcher for ScriptedDispatcher {
    fn next_job(&mut self, agent: AgentId, _ctx: &DispatchContext<'_>) -> Option<JobOrder> {
        self.queued.get_mut(&agent)?.pop_front()
    }
}

// ── Return to parking ────────────────────────────────────────────────────────

/// Sends idle agents to drive their faction's stray vehicles back to the
/// parking area.
///
/// A candidate is of the agent's faction, not forbidden, not mounted, not
/// already standing on a parking cell and claimable by the agent.  Nearest
/// first.  Vehicles with an empty tank are skipped; the last skip reason is
/// kept in [`last_refusal`](Self::last_refusal).
#[derive(Default)]
pub struct ReturnVehicleDispatcher {
    pub last_refusal: Option<(VehicleId, &'static str)>,
}

impl ReturnVehicleDispatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dispatcher for ReturnVehicleDispatcher {
    fn next_job(&mut self, agent: AgentId, ctx: &DispatchContext<'_>) -> Option<JobOrder> {
        if ctx.vehicles.is_driving(agent) || ctx.map.parking_cells().next().is_none() {
            return None;
        }
        if ctx.agents.drive_eligibility(agent).is_err() {
            return None;
        }
        let i = agent.index();
        let from = ctx.agents.position[i];
        let faction = ctx.agents.faction[i];

        let mut candidates: Vec<&Vehicle> = ctx
            .vehicles
            .iter()
            .filter(|v| {
                v.faction == faction
                    && !v.forbidden
                    && !v.is_mounted()
                    && !ctx.map.is_parking(v.cell())
                    && ctx.reservations.can_reserve(agent, Target::Vehicle(v.id))
            })
            .collect();
        candidates.sort_by_key(|v| (from.distance_sq(v.cell()), v.id));

        for v in candidates {
            if v.is_out_of_fuel() {
                debug!(%agent, vehicle = %v.id, "return skipped: empty tank");
                self.last_refusal = Some((v.id, "empty tank"));
                continue;
            }
            return Some(JobOrder::Park { vehicle: v.id });
        }
        None
    }
}

// ── Designated hauling ───────────────────────────────────────────────────────

/// Batches designated ground items into haul orders.
///
/// The agent's worn container is used when it has one; otherwise the nearest
/// free vehicle of its faction that it may drive.  Up to `batch` designated
/// items are taken, nearest first.
pub struct DesignationDispatcher {
    pub batch: usize,
}

impl Default for DesignationDispatcher {
    fn default() -> Self {
        DesignationDispatcher { batch: 4 }
    }
}

impl DesignationDispatcher {
    pub fn new(batch: usize) -> Self {
        DesignationDispatcher { batch: batch.max(1) }
    }

    fn pick_carrier(&self, agent: AgentId, ctx: &DispatchContext<'_>) -> Option<CarrierRef> {
        if ctx.agents.worn(agent).is_some() {
            return Some(CarrierRef::Worn);
        }
        if ctx.agents.drive_eligibility(agent).is_err() {
            return None;
        }
        let i = agent.index();
        let from = ctx.agents.position[i];
        ctx.vehicles
            .iter()
            .filter(|v| {
                v.faction == ctx.agents.faction[i]
                    && !v.forbidden
                    && !v.is_mounted()
                    && !v.is_out_of_fuel()
                    && ctx.reservations.can_reserve(agent, Target::Vehicle(v.id))
            })
            .min_by_key(|v| (from.distance_sq(v.cell()), v.id))
            .map(|v| CarrierRef::Vehicle(v.id))
    }
}

impl Dispatcher for DesignationDispatcher {
    fn next_job(&mut self, agent: AgentId, ctx: &DispatchContext<'_>) -> Option<JobOrder> {
        let from = ctx.agents.position[agent.index()];
        let mut targets: Vec<(i64, ItemId)> = ctx
            .ground
            .ids()
            .into_iter()
            .filter_map(|id| {
                let item = ctx.ground.get(id)?;
                let open = item.designated
                    && !item.burning
                    && ctx.reservations.can_reserve(agent, Target::Item(id));
                open.then(|| (from.distance_sq(item.cell), id))
            })
            .collect();
        if targets.is_empty() {
            return None;
        }
        let carrier = self.pick_carrier(agent, ctx)?;
        targets.sort_unstable();
        targets.truncate(self.batch);
        let ids: Vec<ItemId> = targets.into_iter().map(|(_, id)| id).collect();
        debug!(%agent, ?carrier, items = ids.len(), "haul batch dispatched");
        Some(JobOrder::Haul(HaulOrder::new(carrier, ids)))
    }
}
