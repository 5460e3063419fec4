//! Things that happen to vehicles during a tick.

use std::fmt;

use hw_core::{AgentId, Cell, DoorId, ItemId, JobKind, VehicleId};

/// Why a ride was ended without the driver asking.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DismountReason {
    Incapacitated,
    Forbidden,
    IncompatibleActivity(JobKind),
    Despawned,
}

impl fmt::Display for DismountReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DismountReason::Incapacitated => f.write_str("driver incapacitated"),
            DismountReason::Forbidden => f.write_str("vehicle forbidden"),
            DismountReason::IncompatibleActivity(job) => write!(f, "incompatible activity {job}"),
            DismountReason::Despawned => f.write_str("vehicle despawned"),
        }
    }
}

/// What `VehicleStore::destroy` did, in the order it did it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DestroyReport {
    pub passengers: Vec<AgentId>,
    pub driver: Option<AgentId>,
    /// Cargo dropped on the ground and where it landed.
    pub dropped: Vec<(ItemId, Cell)>,
    /// Cargo that found no free cell.
    pub lost: Vec<ItemId>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum VehicleEvent {
    ForcedDismount { vehicle: VehicleId, driver: AgentId, reason: DismountReason },
    DoorOpened { vehicle: VehicleId, door: DoorId, by: AgentId },
    DoorClosed { vehicle: VehicleId, door: DoorId, by: AgentId },
    FuelLeaked { vehicle: VehicleId, cell: Cell, amount: f32 },
    AiRefueled { vehicle: VehicleId },
    PassengerUnboarded { vehicle: VehicleId, agent: AgentId },
    Despawned { vehicle: VehicleId, report: DestroyReport },
}

impl VehicleEvent {
    pub fn vehicle(&self) -> VehicleId {
        match self {
            VehicleEvent::ForcedDismount { vehicle, .. }
            | VehicleEvent::DoorOpened { vehicle, .. }
            | VehicleEvent::DoorClosed { vehicle, .. }
            | VehicleEvent::FuelLeaked { vehicle, .. }
            | VehicleEvent::AiRefueled { vehicle }
            | VehicleEvent::PassengerUnboarded { vehicle, .. }
            | VehicleEvent::Despawned { vehicle, .. } => *vehicle,
        }
    }

    /// Short event name for logs and output rows.
    pub fn kind(&self) -> &'static str {
        match self {
            VehicleEvent::ForcedDismount { .. } => "forced_dismount",
            VehicleEvent::DoorOpened { .. } => "door_opened",
            VehicleEvent::DoorClosed { .. } => "door_closed",
            VehicleEvent::FuelLeaked { .. } => "fuel_leaked",
            VehicleEvent::AiRefueled { .. } => "ai_refueled",
            VehicleEvent::PassengerUnboarded { .. } => "passenger_unboarded",
            VehicleEvent::Despawned { .. } => "despawned",
        }
    }
}
