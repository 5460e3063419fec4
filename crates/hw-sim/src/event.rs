//! What the sim reports to observers.

use std::fmt;

use hw_core::{AgentId, Cell, JobKind, Tick, VehicleId};
use hw_task::TaskEnd;
use hw_vehicle::VehicleEvent;

/// One thing that happened during a tick.  Presentation (letters, UI) is
/// the observer's business.
#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    JobStarted { agent: AgentId, kind: JobKind },
    TaskEnded { agent: AgentId, kind: JobKind, end: TaskEnd },
    Arrived { agent: AgentId, cell: Cell },
    Vehicle(VehicleEvent),
}

impl SimEvent {
    /// Short event name for logs and output rows.
    pub fn kind(&self) -> &'static str {
        match self {
            SimEvent::JobStarted { .. } => "job_started",
            SimEvent::TaskEnded { .. } => "task_ended",
            SimEvent::Arrived { .. } => "arrived",
            SimEvent::Vehicle(e) => e.kind(),
        }
    }

    pub fn agent(&self) -> Option<AgentId> {
        match self {
            SimEvent::JobStarted { agent, .. }
            | SimEvent::TaskEnded { agent, .. }
            | SimEvent::Arrived { agent, .. } => Some(*agent),
            SimEvent::Vehicle(VehicleEvent::ForcedDismount { driver, .. }) => Some(*driver),
            SimEvent::Vehicle(VehicleEvent::DoorOpened { by, .. })
            | SimEvent::Vehicle(VehicleEvent::DoorClosed { by, .. }) => Some(*by),
            SimEvent::Vehicle(VehicleEvent::PassengerUnboarded { agent, .. }) => Some(*agent),
            SimEvent::Vehicle(_) => None,
        }
    }

    pub fn vehicle(&self) -> Option<VehicleId> {
        match self {
            SimEvent::Vehicle(e) => Some(e.vehicle()),
            _ => None,
        }
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::JobStarted { kind, .. } => write!(f, "{kind}"),
            SimEvent::TaskEnded { kind, end, .. } => write!(f, "{kind} {end}"),
            SimEvent::Arrived { cell, .. } => write!(f, "{cell}"),
            SimEvent::Vehicle(VehicleEvent::ForcedDismount { reason, .. }) => write!(f, "{reason}"),
            SimEvent::Vehicle(VehicleEvent::DoorOpened { door, .. })
            | SimEvent::Vehicle(VehicleEvent::DoorClosed { door, .. }) => write!(f, "{door}"),
            SimEvent::Vehicle(VehicleEvent::FuelLeaked { cell, amount, .. }) => {
                write!(f, "{amount:.2} at {cell}")
            }
            SimEvent::Vehicle(VehicleEvent::Despawned { report, .. }) => {
                write!(f, "dropped {} lost {}", report.dropped.len(), report.lost.len())
            }
            SimEvent::Vehicle(_) => Ok(()),
        }
    }
}

/// Per-tick counters handed to [`SimObserver::on_tick_end`](crate::SimObserver::on_tick_end).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub dispatched: usize,
    pub ended: usize,
    pub events: usize,
}

/// Whole-world counts, reported every `summary_interval_ticks`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldSummary {
    pub tick: Tick,
    pub active_jobs: usize,
    pub vehicles: usize,
    pub driving: usize,
    pub ground_items: usize,
    pub stored_items: usize,
    pub carried_stacks: usize,
    pub reservations: usize,
    pub contamination: u64,
}
