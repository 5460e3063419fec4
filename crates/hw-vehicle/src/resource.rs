//! Per-tick vehicle resource model.
//!
//! Free functions over a single `Vehicle` so each rule can be tested alone.
//! The tick loop in [`crate::tick`] calls them in a fixed order.

use hw_core::{Cell, Tick, VehicleTuning};
use hw_spatial::GridMap;

use crate::{Axles, Vehicle};

/// Effective speed: the base stat, or the flat penalty value while broken
/// down or out of fuel.
pub fn recompute_speed(vehicle: &mut Vehicle, tuning: &VehicleTuning) -> f32 {
    vehicle.current_speed = if vehicle.broken_down || vehicle.is_out_of_fuel() {
        tuning.penalty_speed
    } else {
        vehicle.base_speed
    };
    vehicle.current_speed
}

/// Burn one tick's worth of fuel if the driver is moving and not busy with
/// a whole-body action.  Returns the fuel burnt.
pub fn consume_fuel(vehicle: &mut Vehicle, driver_moving: bool, driver_busy: bool) -> f32 {
    if !driver_moving || driver_busy {
        return 0.0;
    }
    match vehicle.fuel.as_mut() {
        Some(tank) => {
            let rate = tank.use_per_tick;
            tank.consume(rate)
        }
        None => 0.0,
    }
}

/// Spill fuel from a leaking tank on the leak cadence, contaminating the
/// vehicle's cell.  Stops once the tank is dry or has drained to its leak
/// threshold.  Returns the amount spilled.
pub fn tick_leak(vehicle: &mut Vehicle, now: Tick, map: &mut GridMap, tuning: &VehicleTuning) -> f32 {
    let cell = vehicle.cell();
    let Some(tank) = vehicle.fuel.as_mut() else {
        return 0.0;
    };
    if !tank.leaking || !now.is_multiple_of(tuning.leak_interval) {
        return 0.0;
    }
    if tank.is_empty() || tank.fraction() <= tank.leak_threshold {
        return 0.0;
    }
    let spilled = tank.consume(tuning.leak_amount);
    if spilled > 0.0 {
        map.contaminate(cell, 1);
    }
    spilled
}

/// Advance the cosmetic wheel rotation and shake phase.
pub fn advance_axles(axles: &mut Axles, speed: f32) {
    axles.wheel_rotation += speed / 3.0;
    axles.phase += 0.01 * speed / 5.0;
    let s = axles.phase.sin();
    axles.shake = (s + s.abs()) / 40.0;
}

/// A mounted vehicle in the no-build edge band, configured to leave there,
/// whose driver is not friendly or is fleeing.
pub fn should_despawn_at_edge(
    vehicle: &Vehicle,
    cell: Cell,
    map: &GridMap,
    driver_friendly: bool,
    driver_fleeing: bool,
) -> bool {
    vehicle.is_mounted()
        && vehicle.despawn_at_edge
        && map.in_no_build_edge(cell)
        && (!driver_friendly || driver_fleeing)
}

/// One-time top-up for a vehicle driven by a non-player agent running low.
/// Returns `true` if it refuelled.
pub fn ai_refuel(vehicle: &mut Vehicle, driver_friendly: bool, tuning: &VehicleTuning) -> bool {
    if driver_friendly || vehicle.fueled_by_ai {
        return false;
    }
    match vehicle.fuel.as_mut() {
        Some(tank) if tank.fraction() < tuning.ai_refuel_threshold => {
            tank.refill();
            vehicle.fueled_by_ai = true;
            true
        }
        _ => false,
    }
}
