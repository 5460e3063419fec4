//! The per-tick vehicle update.

use hw_agent::{AgentStore, MentalState, Vitals};
use hw_core::{AgentId, MountTuning, Tick, VehicleId, VehicleTuning};
use hw_reserve::ReservationManager;
use hw_spatial::{DoorControl, GridMap, GroundItems};
use tracing::{debug, info};

use crate::resource::{
    advance_axles, ai_refuel, consume_fuel, recompute_speed, should_despawn_at_edge, tick_leak,
};
use crate::{DismountReason, DoorRef, VehicleEvent, VehicleStore};

/// Everything outside the vehicle store that a vehicle tick reads or writes.
pub struct VehicleWorld<'a> {
    pub agents: &'a mut AgentStore,
    pub map: &'a mut GridMap,
    pub ground: &'a mut GroundItems,
    pub reservations: &'a mut ReservationManager,
    pub mount_tuning: &'a MountTuning,
    pub vehicle_tuning: &'a VehicleTuning,
}

impl VehicleStore {
    /// Run one tick for every live vehicle, in id order.
    pub fn tick(&mut self, now: Tick, world: &mut VehicleWorld<'_>) -> Vec<VehicleEvent> {
        let mut events = Vec::new();
        let ids: Vec<VehicleId> = self.ids().collect();
        for id in ids {
            self.tick_one(id, now, world, &mut events);
        }
        events
    }

    fn tick_one(
        &mut self,
        id: VehicleId,
        now: Tick,
        w: &mut VehicleWorld<'_>,
        events: &mut Vec<VehicleEvent>,
    ) {
        let Some(driver) = self.get(id).and_then(|v| v.driver()) else {
            self.tick_unmounted(id, w, events);
            return;
        };

        // ── 1. forced dismount ────────────────────────────────────────────
        if let Some(reason) = self.forced_dismount_check(id, driver, now, w) {
            events.push(VehicleEvent::ForcedDismount { vehicle: id, driver, reason });
            self.release_door(id, w.map, events);
            return;
        }

        let d = driver.index();
        let driver_cell = w.agents.position[d];
        let driver_draw = w.agents.draw_pos[d];
        let driver_rot = w.agents.rotation[d];
        let driver_moving = w.agents.moving[d];
        let driver_busy = w.agents.full_body_busy[d];
        let driver_friendly = w.agents.is_player(driver);
        let driver_fleeing = w.agents.mental[d] == MentalState::PanicFlee;

        // ── 2. doors ──────────────────────────────────────────────────────
        if now.is_multiple_of(w.mount_tuning.door_check_interval) {
            self.door_check(id, driver, driver_cell, w.map, events);
        }

        let Some(v) = self.get_mut(id) else { return };

        // ── 3. resource model ─────────────────────────────────────────────
        if ai_refuel(v, driver_friendly, w.vehicle_tuning) {
            debug!(vehicle = %id, "AI refuelled");
            events.push(VehicleEvent::AiRefueled { vehicle: id });
        }
        consume_fuel(v, driver_moving, driver_busy);
        let speed = recompute_speed(v, w.vehicle_tuning);
        let spilled = tick_leak(v, now, w.map, w.vehicle_tuning);
        if spilled > 0.0 {
            events.push(VehicleEvent::FuelLeaked { vehicle: id, cell: v.cell(), amount: spilled });
        }
        if driver_moving {
            if let Some(axles) = v.axles.as_mut() {
                advance_axles(axles, speed);
            }
        }

        // ── 4. position sync ──────────────────────────────────────────────
        let scaled = v.world_offset(driver_rot) * w.mount_tuning.offset_scale;
        let derived = driver_draw - scaled;
        v.position = if w.map.in_bounds(derived.to_cell()) { derived } else { driver_draw };
        v.rotation = driver_rot;
        let vehicle_cell = v.cell();
        let vehicle_pos = v.position;

        // ── 5. passengers ─────────────────────────────────────────────────
        let riders = v.passengers.clone();
        for p in riders {
            let i = p.index();
            if matches!(w.agents.vitals[i], Vitals::Downed | Vitals::Dead) {
                self.unboard(id, p);
                events.push(VehicleEvent::PassengerUnboarded { vehicle: id, agent: p });
                continue;
            }
            w.agents.position[i] = vehicle_cell;
            w.agents.draw_pos[i] = vehicle_pos;
            w.agents.rotation[i] = driver_rot;
        }

        // ── 6. edge despawn ───────────────────────────────────────────────
        let leave = self
            .get(id)
            .is_some_and(|v| should_despawn_at_edge(v, vehicle_cell, w.map, driver_friendly, driver_fleeing));
        if leave {
            if let Some(report) = self.destroy(id, w.map, w.ground, w.reservations) {
                info!(vehicle = %id, %driver, "vehicle left the map at the edge");
                events.push(VehicleEvent::Despawned { vehicle: id, report });
            }
        }
    }

    /// Priority-ordered forced-dismount rules.  Returns the reason if the
    /// driver was dismounted.
    fn forced_dismount_check(
        &mut self,
        id: VehicleId,
        driver: AgentId,
        now: Tick,
        w: &mut VehicleWorld<'_>,
    ) -> Option<DismountReason> {
        if w.agents.is_incapacitated(driver) {
            self.forced_dismount(id, DismountReason::Incapacitated, w.reservations);
            return Some(DismountReason::Incapacitated);
        }

        let v = self.get_mut(id)?;
        if v.forbidden && w.agents.is_player(driver) {
            self.forced_dismount(id, DismountReason::Forbidden, w.reservations);
            return Some(DismountReason::Forbidden);
        }

        if now < v.next_activity_check {
            return None;
        }
        let t = w.mount_tuning;
        let wait = v.rng.range_inclusive(t.activity_recheck_min, t.activity_recheck_max);
        v.next_activity_check = now + wait;

        let d = driver.index();
        let job = w.agents.job[d].filter(|&j| t.is_incompatible(j))?;
        let driver_cell = w.agents.position[d];
        if !w.map.is_roofed(driver_cell) {
            return None;
        }
        let at = (w.agents.draw_pos[d] - v.world_offset(w.agents.rotation[d])).to_cell();
        self.dismount_at(id, at, w.map, w.reservations);
        let reason = DismountReason::IncompatibleActivity(job);
        info!(vehicle = %id, %driver, %reason, "forced dismount");
        Some(reason)
    }

    /// Open the door under the driver or vehicle; let go of the previous one
    /// once it is left behind.
    fn door_check(
        &mut self,
        id: VehicleId,
        driver: AgentId,
        driver_cell: hw_core::Cell,
        map: &mut GridMap,
        events: &mut Vec<VehicleEvent>,
    ) {
        let Some(v) = self.get_mut(id) else { return };
        let here = map.door_at(driver_cell).or_else(|| map.door_at(v.cell()));
        match (here, v.last_door) {
            (Some(door), Some(prev)) if prev.door == door => {}
            (Some(door), prev) => {
                if let Some(prev) = prev {
                    map.start_manual_close_by(prev.door, prev.opened_by);
                    events.push(VehicleEvent::DoorClosed { vehicle: id, door: prev.door, by: prev.opened_by });
                }
                map.start_manual_open_by(door, driver);
                v.last_door = Some(DoorRef { door, opened_by: driver });
                events.push(VehicleEvent::DoorOpened { vehicle: id, door, by: driver });
            }
            (None, Some(prev)) => {
                map.start_manual_close_by(prev.door, prev.opened_by);
                v.last_door = None;
                events.push(VehicleEvent::DoorClosed { vehicle: id, door: prev.door, by: prev.opened_by });
            }
            (None, None) => {}
        }
    }

    fn tick_unmounted(&mut self, id: VehicleId, w: &mut VehicleWorld<'_>, events: &mut Vec<VehicleEvent>) {
        self.release_door(id, w.map, events);
        if let Some(v) = self.get_mut(id) {
            recompute_speed(v, w.vehicle_tuning);
        }
    }

    fn release_door(&mut self, id: VehicleId, map: &mut GridMap, events: &mut Vec<VehicleEvent>) {
        let Some(prev) = self.get_mut(id).and_then(|v| v.last_door.take()) else {
            return;
        };
        map.start_manual_close_by(prev.door, prev.opened_by);
        events.push(VehicleEvent::DoorClosed { vehicle: id, door: prev.door, by: prev.opened_by });
    }
}
