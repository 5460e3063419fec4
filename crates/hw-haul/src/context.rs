//! What a job step may touch.

use hw_agent::AgentStore;
use hw_core::{AgentId, Cell, Tick, Tuning, VehicleId};
use hw_mobility::{Travel, TravelGoal, TravelStatus};
use hw_reserve::ReservationManager;
use hw_spatial::{GridMap, GroundItems, StoragePolicy};
use hw_storage::CarrierCapacity;
use hw_vehicle::VehicleStore;

/// Mutable view of the world for one agent's step.  Built by the sim each
/// tick from disjoint borrows of its stores.
pub struct JobContext<'a> {
    pub agent: AgentId,
    pub now: Tick,
    pub agents: &'a mut AgentStore,
    pub vehicles: &'a mut VehicleStore,
    pub ground: &'a mut GroundItems,
    pub map: &'a GridMap,
    pub reservations: &'a mut ReservationManager,
    pub storage: &'a dyn StoragePolicy,
    pub travel: &'a mut dyn Travel,
    pub tuning: &'a Tuning,
}

impl JobContext<'_> {
    #[inline]
    pub fn position(&self) -> Cell {
        self.agents.position[self.agent.index()]
    }

    /// Keep the agent travelling toward `goal`.
    pub fn travel_to(&mut self, goal: TravelGoal) -> TravelStatus {
        let from = self.position();
        self.travel.request(self.agent, from, goal, self.map)
    }

    #[inline]
    pub fn is_driving(&self, vehicle: VehicleId) -> bool {
        self.vehicles.vehicle_of_driver(self.agent) == Some(vehicle)
    }
}

/// Which carrier a haul loads into.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CarrierRef {
    Vehicle(VehicleId),
    /// The hauling agent's own worn container.
    Worn,
}

impl CarrierRef {
    #[inline]
    pub fn vehicle(self) -> Option<VehicleId> {
        match self {
            CarrierRef::Vehicle(id) => Some(id),
            CarrierRef::Worn => None,
        }
    }
}

/// Look the carrier up.  `None` if the vehicle is gone or the agent wears
/// no container.
pub fn resolve_carrier<'c>(
    carrier: CarrierRef,
    agent: AgentId,
    agents: &'c mut AgentStore,
    vehicles: &'c mut VehicleStore,
) -> Option<&'c mut dyn CarrierCapacity> {
    match carrier {
        CarrierRef::Vehicle(id) => vehicles.get_mut(id).map(|v| v as &mut dyn CarrierCapacity),
        CarrierRef::Worn => agents.worn_mut(agent).map(|c| c as &mut dyn CarrierCapacity),
    }
}
