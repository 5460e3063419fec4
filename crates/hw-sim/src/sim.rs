//! The `Sim` struct and its tick loop.

use std::collections::BTreeMap;

use hw_agent::AgentStore;
use hw_core::{AgentId, SimClock, SimConfig, Target, Tick, Tuning, VehicleId};
use hw_haul::{Job, JobContext, JobOrder};
use hw_mobility::{MobilityEngine, Travel};
use hw_reserve::ReservationManager;
use hw_spatial::{GridMap, GroundItems, Router, StorageZones};
use hw_task::TaskEnd;
use hw_vehicle::{DestroyReport, VehicleEvent, VehicleStore, VehicleWorld};
use tracing::{debug, info};

use crate::{
    DispatchContext, Dispatcher, SimError, SimEvent, SimObserver, SimResult, TickStats,
    WorldSummary,
};

/// The main simulation runner.
///
/// `Sim<D, R>` owns the whole world and drives the fixed-phase tick
/// described in the crate docs.  Every store is a public field so tests
/// and tools can inspect or seed state between ticks.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<D: Dispatcher, R: Router> {
    pub config: SimConfig,
    pub clock: SimClock,
    pub tuning: Tuning,

    pub agents: AgentStore,
    pub vehicles: VehicleStore,
    pub ground: GroundItems,
    pub map: GridMap,
    pub zones: StorageZones,
    pub reservations: ReservationManager,
    pub mobility: MobilityEngine<R>,
    pub dispatcher: D,

    /// Running jobs keyed by agent.  Ticked in ascending `AgentId` order.
    pub jobs: BTreeMap<AgentId, Job>,

    /// Events raised between ticks (by `assign`, `cancel_task`,
    /// `destroy_vehicle`).  Reported at the start of the next tick.
    pub(crate) pending: Vec<SimEvent>,
}

impl<D: Dispatcher, R: Router> Sim<D, R> {
    // ── Running ───────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.  Does not call
    /// `on_sim_end`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Orders from outside the tick ──────────────────────────────────────

    /// Start `order` for `agent` right away, bypassing the dispatcher.
    ///
    /// # Errors
    ///
    /// - [`SimError::Core`] for an unknown agent.
    /// - [`SimError::Busy`] if the agent already runs a job.
    /// - [`SimError::Job`] if the job's claims could not be made.
    pub fn assign(&mut self, agent: AgentId, order: JobOrder) -> SimResult<()> {
        self.agents.check(agent)?;
        if self.jobs.contains_key(&agent) {
            return Err(SimError::Busy(agent));
        }
        let job = order.start(agent, &self.agents, &self.vehicles, &mut self.reservations)?;
        let mut events = std::mem::take(&mut self.pending);
        self.begin(agent, job, &mut events);
        self.pending = events;
        Ok(())
    }

    /// Stop `agent`'s job as cancelled.  Returns the end it was given, or
    /// `None` if the agent had no job.
    pub fn cancel_task(&mut self, agent: AgentId) -> Option<TaskEnd> {
        let job = self.jobs.get_mut(&agent)?;
        job.cancel();
        let end = TaskEnd::cancelled();
        let mut events = std::mem::take(&mut self.pending);
        self.finish(agent, end, &mut events);
        self.pending = events;
        Some(end)
    }

    /// Take a claim away from whoever holds it.  Their job notices on its
    /// next step.
    pub fn force_release(&mut self, target: Target) -> Option<AgentId> {
        self.reservations.force_release(target)
    }

    /// Destroy a vehicle: passengers out, driver out, cargo on the ground,
    /// then removal.
    pub fn destroy_vehicle(&mut self, vehicle: VehicleId) -> Option<DestroyReport> {
        let report = self.vehicles.destroy(
            vehicle,
            &mut self.map,
            &mut self.ground,
            &mut self.reservations,
        )?;
        self.pending.push(SimEvent::Vehicle(VehicleEvent::Despawned {
            vehicle,
            report: report.clone(),
        }));
        Some(report)
    }

    #[inline]
    pub fn job(&self, agent: AgentId) -> Option<&Job> {
        self.jobs.get(&agent)
    }

    /// Whole-world counts at the current tick.
    pub fn summary(&self) -> WorldSummary {
        let stored_items = self
            .ground
            .ids()
            .into_iter()
            .filter_map(|id| self.ground.get(id))
            .filter(|item| self.zones.zone_at(item.cell).is_some())
            .count();
        let worn: usize = self.agents.worn.iter().flatten().map(|c| c.item_slots()).sum();
        let loaded: usize = self.vehicles.iter().map(|v| v.storage.item_slots()).sum();

        WorldSummary {
            tick: self.clock.current_tick,
            active_jobs: self.jobs.len(),
            vehicles: self.vehicles.len(),
            driving: self.vehicles.iter().filter(|v| v.is_mounted()).count(),
            ground_items: self.ground.len(),
            stored_items,
            carried_stacks: worn + loaded,
            reservations: self.reservations.len(),
            contamination: self.map.total_contamination(),
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let mut events = std::mem::take(&mut self.pending);
        let dispatched = self.dispatch_phase(now, &mut events);
        let ended = self.job_phase(now, &mut events);
        self.movement_phase(&mut events);
        self.vehicle_phase(now, &mut events);

        for event in &events {
            observer.on_event(now, event);
        }
        let stats = TickStats { dispatched, ended, events: events.len() };
        observer.on_tick_end(now, &stats);

        if now.is_multiple_of(self.config.summary_interval_ticks) {
            observer.on_summary(&self.summary());
        }
        self.clock.advance();
    }

    /// ① Offer every idle, able, non-passenger agent a job.
    fn dispatch_phase(&mut self, now: Tick, events: &mut Vec<SimEvent>) -> usize {
        let idle: Vec<AgentId> = self
            .agents
            .agent_ids()
            .filter(|&a| {
                !self.jobs.contains_key(&a)
                    && !self.agents.is_incapacitated(a)
                    && self.vehicles.vehicle_of_passenger(a).is_none()
            })
            .collect();

        let mut started = 0;
        for agent in idle {
            let ctx = DispatchContext {
                now,
                agents: &self.agents,
                vehicles: &self.vehicles,
                ground: &self.ground,
                map: &self.map,
                reservations: &self.reservations,
            };
            let Some(order) = self.dispatcher.next_job(agent, &ctx) else {
                continue;
            };
            let kind = order.kind();
            match order.start(agent, &self.agents, &self.vehicles, &mut self.reservations) {
                Ok(job) => {
                    self.begin(agent, job, events);
                    started += 1;
                }
                Err(err) => debug!(%agent, job = %kind, %err, "dispatched job refused"),
            }
        }
        started
    }

    /// ② Step every running job.
    fn job_phase(&mut self, now: Tick, events: &mut Vec<SimEvent>) -> usize {
        let mut finished: Vec<(AgentId, TaskEnd)> = Vec::new();

        for (&agent, job) in self.jobs.iter_mut() {
            if self.agents.is_incapacitated(agent) {
                job.cancel();
                finished.push((agent, TaskEnd::incompletable("incapacitated")));
                continue;
            }
            let mut ctx = JobContext {
                agent,
                now,
                agents: &mut self.agents,
                vehicles: &mut self.vehicles,
                ground: &mut self.ground,
                map: &self.map,
                reservations: &mut self.reservations,
                storage: &self.zones,
                travel: &mut self.mobility,
                tuning: &self.tuning,
            };
            if let Some(end) = job.tick(&mut ctx) {
                finished.push((agent, end));
            }
        }

        let ended = finished.len();
        for (agent, end) in finished {
            self.finish(agent, end, events);
        }
        ended
    }

    /// ③ Advance travelling agents.
    fn movement_phase(&mut self, events: &mut Vec<SimEvent>) {
        let speeds: Vec<f32> = self
            .agents
            .agent_ids()
            .map(|a| {
                match self.vehicles.vehicle_of_driver(a).and_then(|v| self.vehicles.get(v)) {
                    Some(v) => v.current_speed,
                    None => self.agents.base_speed[a.index()],
                }
            })
            .collect();
        let arrived = self.mobility.advance(&mut self.agents, |a| speeds[a.index()]);
        for agent in arrived {
            let cell = self.agents.position[agent.index()];
            events.push(SimEvent::Arrived { agent, cell });
        }
    }

    /// ④ Per-vehicle update.
    fn vehicle_phase(&mut self, now: Tick, events: &mut Vec<SimEvent>) {
        let mut world = VehicleWorld {
            agents: &mut self.agents,
            map: &mut self.map,
            ground: &mut self.ground,
            reservations: &mut self.reservations,
            mount_tuning: &self.tuning.mount,
            vehicle_tuning: &self.tuning.vehicle,
        };
        events.extend(self.vehicles.tick(now, &mut world).into_iter().map(SimEvent::Vehicle));
    }

    // ── Job bookkeeping ───────────────────────────────────────────────────

    fn begin(&mut self, agent: AgentId, job: Job, events: &mut Vec<SimEvent>) {
        let kind = job.kind();
        self.agents.job[agent.index()] = Some(kind);
        debug!(%agent, job = %kind, "job started");
        self.jobs.insert(agent, job);
        events.push(SimEvent::JobStarted { agent, kind });
    }

    /// Tear down a job that ended.  Every claim of the agent goes, travel
    /// stops, and any vehicle it drives is left where it stands.
    fn finish(&mut self, agent: AgentId, end: TaskEnd, events: &mut Vec<SimEvent>) {
        let Some(job) = self.jobs.remove(&agent) else { return };
        let kind = job.kind();
        let i = agent.index();

        self.agents.job[i] = None;
        self.mobility.cancel(agent);
        self.agents.moving[i] = false;
        self.agents.draw_pos[i] = self.agents.position[i].center();
        // An incapacitated driver is thrown out by the vehicle phase instead.
        let driving = self.vehicles.vehicle_of_driver(agent);
        if let Some(vehicle) = driving.filter(|_| !self.agents.is_incapacitated(agent)) {
            self.vehicles.dismount(vehicle, &mut self.reservations);
        }
        let released = self.reservations.release_all_for_agent(agent);

        info!(
            %agent,
            job = %kind,
            status = %end.status,
            reason = end.reason.unwrap_or(""),
            released,
            "task ended"
        );
        events.push(SimEvent::TaskEnded { agent, kind, end });
    }
}
