//! Any running job, and orders that start one.

use hw_agent::AgentStore;
use hw_core::{AgentId, JobKind, VehicleId};
use hw_reserve::ReservationManager;
use hw_task::TaskEnd;
use hw_vehicle::VehicleStore;

use crate::{HaulJob, HaulOrder, HaulResult, JobContext, ParkJob};

/// A job not yet started, as handed out by a dispatcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobOrder {
    Haul(HaulOrder),
    Park { vehicle: VehicleId },
}

impl JobOrder {
    pub fn kind(&self) -> JobKind {
        match self {
            JobOrder::Haul(_) => JobKind::Haul,
            JobOrder::Park { .. } => JobKind::Park,
        }
    }

    /// Claim what the job needs and build it.  Nothing stays claimed on
    /// failure.
    pub fn start(
        self,
        agent: AgentId,
        agents: &AgentStore,
        vehicles: &VehicleStore,
        reservations: &mut ReservationManager,
    ) -> HaulResult<Job> {
        match self {
            JobOrder::Haul(order) => HaulJob::assign(agent, order, reservations).map(Job::Haul),
            JobOrder::Park { vehicle } => {
                ParkJob::assign(agent, vehicle, agents, vehicles, reservations).map(Job::Park)
            }
        }
    }
}

pub enum Job {
    Haul(HaulJob),
    Park(ParkJob),
}

impl Job {
    pub fn kind(&self) -> JobKind {
        match self {
            Job::Haul(_) => JobKind::Haul,
            Job::Park(_) => JobKind::Park,
        }
    }

    pub fn tick(&mut self, ctx: &mut JobContext<'_>) -> Option<TaskEnd> {
        match self {
            Job::Haul(job) => job.tick(ctx),
            Job::Park(job) => job.tick(ctx),
        }
    }

    pub fn cancel(&mut self) {
        match self {
            Job::Haul(job) => job.cancel(),
            Job::Park(job) => job.cancel(),
        }
    }

    /// The vehicle this job drives, if any.
    pub fn vehicle(&self) -> Option<VehicleId> {
        match self {
            Job::Haul(job) => job.carrier().vehicle(),
            Job::Park(job) => Some(job.vehicle()),
        }
    }
}
