//! The mount state machine and boarding.
//!
//! `Unmounted → Mounted` only through [`VehicleStore::mount`].  Every way
//! back (`dismount`, `dismount_at`, `forced_dismount`) funnels into one
//! private routine that clears the binding, the driver index, the vehicle's
//! reservation and its passengers together.

use hw_agent::AgentStore;
use hw_core::{AgentId, Cell, MountTuning, Target, Tick, VehicleId, VehicleTuning};
use hw_reserve::ReservationManager;
use hw_spatial::GridMap;
use tracing::{debug, info, warn};

use crate::{DismountReason, MountRejection, MountState, VehicleStore};

impl VehicleStore {
    // ── Ordering a driver ─────────────────────────────────────────────────

    /// Whether `agent` may be ordered to drive `vehicle`.  A vehicle someone
    /// else is driving must be dismounted first.
    pub fn can_order_mount(
        &self,
        vehicle: VehicleId,
        agent: AgentId,
        agents: &AgentStore,
    ) -> Result<(), MountRejection> {
        let Some(v) = self.get(vehicle) else {
            return Err(MountRejection::Despawned);
        };
        if let Some(driver) = v.driver().filter(|&d| d != agent) {
            return Err(MountRejection::Occupied { driver });
        }
        agents.drive_eligibility(agent).map_err(MountRejection::CannotDrive)?;
        match self.vehicle_of_driver(agent) {
            Some(other) if other != vehicle => Err(MountRejection::AlreadyDriving(other)),
            _ => Ok(()),
        }
    }

    /// Hand `vehicle` to `agent`: any existing claim on the vehicle is
    /// force-released, then `agent` reserves it.  Returns whoever held the
    /// claim before, whose task must now re-validate.
    pub fn order_mount(
        &self,
        vehicle: VehicleId,
        agent: AgentId,
        agents: &AgentStore,
        reservations: &mut ReservationManager,
    ) -> Result<Option<AgentId>, MountRejection> {
        self.can_order_mount(vehicle, agent, agents)?;
        let target = Target::Vehicle(vehicle);
        let previous = reservations.force_release(target).filter(|&p| p != agent);
        if let Err(conflict) = reservations.reserve(agent, target) {
            // Unreachable right after force_release.
            warn!(%conflict, "order_mount could not reserve");
        }
        debug!(%vehicle, %agent, ?previous, "mount ordered");
        Ok(previous)
    }

    // ── Mount ─────────────────────────────────────────────────────────────

    /// Bind `agent` as driver.  Refused with no state change if someone else
    /// is driving, if the vehicle is faction-locked to another faction, or if
    /// `agent` is already driving a different vehicle.  Mounting your own
    /// vehicle again is a no-op.
    pub fn mount(
        &mut self,
        vehicle: VehicleId,
        agent: AgentId,
        agents: &AgentStore,
        now: Tick,
        tuning: &MountTuning,
    ) -> Result<(), MountRejection> {
        let v = self.get(vehicle).ok_or(MountRejection::Despawned)?;
        match v.mount {
            MountState::Mounted { driver, .. } if driver == agent => return Ok(()),
            MountState::Mounted { driver, .. } => return Err(MountRejection::Occupied { driver }),
            MountState::Unmounted => {}
        }
        if v.faction_locked && v.faction != agents.faction[agent.index()] {
            return Err(MountRejection::FactionMismatch);
        }
        if let Some(other) = self.vehicle_of_driver(agent) {
            return Err(MountRejection::AlreadyDriving(other));
        }
        if let Some(riding) = self.vehicle_of_passenger(agent) {
            self.unboard(riding, agent);
        }

        let v = self.get_mut(vehicle).ok_or(MountRejection::Despawned)?;
        v.mount = MountState::Mounted { driver: agent, since: now };
        v.next_activity_check = now + tuning.activity_recheck_initial;
        self.driver_index.insert(agent, vehicle);
        debug!(%vehicle, %agent, tick = now.0, "mounted");
        Ok(())
    }

    // ── Dismount ──────────────────────────────────────────────────────────

    /// Voluntary dismount where the vehicle stands.  Returns the former
    /// driver, or `None` if nobody was driving.
    pub fn dismount(
        &mut self,
        vehicle: VehicleId,
        reservations: &mut ReservationManager,
    ) -> Option<AgentId> {
        let driver = self.unbind(vehicle, reservations)?;
        debug!(%vehicle, %driver, "dismounted");
        Some(driver)
    }

    /// Move the vehicle to `cell`, then dismount.  An out-of-bounds or
    /// impassable cell is ignored and the vehicle stays where it is; the
    /// dismount itself always happens.
    pub fn dismount_at(
        &mut self,
        vehicle: VehicleId,
        cell: Cell,
        map: &GridMap,
        reservations: &mut ReservationManager,
    ) -> Option<AgentId> {
        let v = self.get_mut(vehicle)?;
        if !v.is_mounted() {
            return None;
        }
        if map.is_passable(cell) {
            v.position = cell.center();
        } else {
            warn!(%vehicle, %cell, "dismount cell rejected, dismounting in place");
        }
        self.dismount(vehicle, reservations)
    }

    /// Unconditional dismount in place.  A no-op on an unmounted or missing
    /// vehicle.
    pub fn forced_dismount(
        &mut self,
        vehicle: VehicleId,
        reason: DismountReason,
        reservations: &mut ReservationManager,
    ) -> Option<AgentId> {
        let driver = self.unbind(vehicle, reservations)?;
        info!(%vehicle, %driver, %reason, "forced dismount");
        Some(driver)
    }

    fn unbind(&mut self, vehicle: VehicleId, reservations: &mut ReservationManager) -> Option<AgentId> {
        let v = self.get_mut(vehicle)?;
        let driver = v.driver()?;
        v.mount = MountState::Unmounted;
        self.driver_index.remove(&driver);
        reservations.force_release(Target::Vehicle(vehicle));
        self.unboard_all(vehicle);
        Some(driver)
    }

    // ── Passengers ────────────────────────────────────────────────────────

    /// Seat `agent` as a passenger.  The vehicle must be mounted and have a
    /// free seat; the agent must share the vehicle's faction, must not be
    /// starving or exhausted, and must not be driving or riding already.
    pub fn board(
        &mut self,
        vehicle: VehicleId,
        agent: AgentId,
        agents: &AgentStore,
        tuning: &VehicleTuning,
    ) -> Result<(), MountRejection> {
        let v = self.get(vehicle).ok_or(MountRejection::Despawned)?;
        if !v.is_mounted() {
            return Err(MountRejection::NotMounted);
        }
        if let Some(other) = self.vehicle_of_driver(agent) {
            return Err(MountRejection::AlreadyDriving(other));
        }
        if self.passenger_index.contains_key(&agent) || v.passengers.len() >= tuning.max_passengers {
            return Err(MountRejection::SeatsFull);
        }
        let i = agent.index();
        if agents.faction[i] != v.faction {
            return Err(MountRejection::FactionMismatch);
        }
        if agents.starving[i] || agents.exhausted[i] {
            return Err(MountRejection::Unfit);
        }
        if let Some(v) = self.get_mut(vehicle) {
            v.passengers.push(agent);
        }
        self.passenger_index.insert(agent, vehicle);
        debug!(%vehicle, %agent, "boarded");
        Ok(())
    }

    pub fn unboard(&mut self, vehicle: VehicleId, agent: AgentId) -> bool {
        let Some(v) = self.get_mut(vehicle) else {
            return false;
        };
        let before = v.passengers.len();
        v.passengers.retain(|&p| p != agent);
        let removed = v.passengers.len() != before;
        if removed {
            self.passenger_index.remove(&agent);
        }
        removed
    }

    /// Unboard every passenger, returning them in boarding order.
    pub fn unboard_all(&mut self, vehicle: VehicleId) -> Vec<AgentId> {
        let Some(v) = self.get_mut(vehicle) else {
            return Vec::new();
        };
        let out = std::mem::take(&mut v.passengers);
        for p in &out {
            self.passenger_index.remove(p);
        }
        out
    }
}
