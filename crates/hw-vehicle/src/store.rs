//! Vehicle storage, spawn and destroy.

use hw_core::{AgentId, Cell, Target, VehicleId};
use hw_reserve::ReservationManager;
use hw_spatial::{DoorControl, GridMap, GroundItems};
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::{DestroyReport, DismountReason, Vehicle, VehicleSpec};

/// All vehicles, by slot.
///
/// Slots are never reused, so a `VehicleId` that outlives its vehicle
/// resolves to `None` instead of to a stranger.
pub struct VehicleStore {
    pub(crate) slots: Vec<Option<Vehicle>>,
    /// driver → vehicle.  Mirrors every `MountState::Mounted`.
    pub(crate) driver_index: FxHashMap<AgentId, VehicleId>,
    /// passenger → vehicle.
    pub(crate) passenger_index: FxHashMap<AgentId, VehicleId>,
    seed: u64,
}

impl VehicleStore {
    /// `seed` seeds each vehicle's private RNG stream.
    pub fn new(seed: u64) -> Self {
        VehicleStore {
            slots: Vec::new(),
            driver_index: FxHashMap::default(),
            passenger_index: FxHashMap::default(),
            seed,
        }
    }

    /// Create a vehicle at `cell`.
    pub fn spawn(&mut self, spec: VehicleSpec, cell: Cell) -> VehicleId {
        let id = VehicleId(self.slots.len() as u32);
        self.slots.push(Some(Vehicle::from_spec(id, spec, cell, self.seed)));
        id
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.slots.get(id.index())?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    #[inline]
    pub fn is_spawned(&self, id: VehicleId) -> bool {
        self.get(id).is_some()
    }

    /// Live vehicle ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| VehicleId(i as u32))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.slots.iter().flatten()
    }

    /// Number of live vehicles.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The vehicle `agent` is driving, if any.
    #[inline]
    pub fn vehicle_of_driver(&self, agent: AgentId) -> Option<VehicleId> {
        self.driver_index.get(&agent).copied()
    }

    #[inline]
    pub fn is_driving(&self, agent: AgentId) -> bool {
        self.driver_index.contains_key(&agent)
    }

    /// The vehicle `agent` is riding in as a passenger, if any.
    #[inline]
    pub fn vehicle_of_passenger(&self, agent: AgentId) -> Option<VehicleId> {
        self.passenger_index.get(&agent).copied()
    }

    // ── Destroy ───────────────────────────────────────────────────────────

    /// Remove a vehicle from the world.
    ///
    /// Order is fixed: passengers are unboarded, the driver is dismounted,
    /// the cargo is dropped around the vehicle's cell, any held door is let
    /// go, and only then is the vehicle removed.  Returns `None` if the
    /// vehicle was already gone.
    pub fn destroy(
        &mut self,
        id: VehicleId,
        map: &mut GridMap,
        ground: &mut GroundItems,
        reservations: &mut ReservationManager,
    ) -> Option<DestroyReport> {
        if !self.is_spawned(id) {
            return None;
        }
        let mut report = DestroyReport {
            passengers: self.unboard_all(id),
            ..DestroyReport::default()
        };
        report.driver = self.forced_dismount(id, DismountReason::Despawned, reservations);

        let vehicle = self.get_mut(id)?;
        let cell = vehicle.cell();
        let cargo = vehicle.storage.drain_all();
        let door = vehicle.last_door.take();

        for stack in cargo {
            let item = stack.id;
            match ground.place_near(map, stack, cell) {
                Ok(at) => report.dropped.push((item, at)),
                Err(_) => {
                    warn!(vehicle = %id, %item, "no free cell for cargo of destroyed vehicle");
                    report.lost.push(item);
                }
            }
        }
        if let Some(d) = door {
            map.start_manual_close_by(d.door, d.opened_by);
        }

        debug_assert!(!self.driver_index.values().any(|&v| v == id));
        reservations.force_release(Target::Vehicle(id));
        self.slots[id.index()] = None;
        info!(vehicle = %id, dropped = report.dropped.len(), "vehicle destroyed");
        Some(report)
    }
}
