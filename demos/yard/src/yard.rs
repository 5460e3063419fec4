//! The stock yard: a roofed warehouse with one door, a parking lot, and
//! stacks scattered in the open.
//!
//! ```text
//!  z
//!  0 ┌──────────────────────────────────────────────────────────┐
//!    │  porters/drivers                                          │
//!    │      carts  trucks       ░ scattered designated stacks ░  │
//! 10 │   ┌───────────┐                                           │
//!    │   │ warehouse  D  (storage zone inside, roofed)           │
//! 20 │   └───────────┘                          ┌──parking──┐    │
//!    │                                          └───────────┘    │
//! 39 └──────────────────────────────────────────────────────────┘
//!    x 0                                                     59
//! ```

use hw_agent::{AgentSpec, AgentStore, AgentStoreBuilder};
use hw_core::{Cell, EntityRng, FactionId, ItemDefId};
use hw_spatial::{GridMap, GridMapBuilder, GroundItems, StorageFilter, StorageZones};
use hw_storage::CapacityContainer;
use hw_vehicle::VehicleSpec;

use crate::config::YardConfig;

pub const WIDTH: i32 = 60;
pub const HEIGHT: i32 = 40;

/// Item types in the yard.
pub const DEFS: [ItemDefId; 3] = [ItemDefId(1), ItemDefId(2), ItemDefId(3)];

pub fn map() -> GridMap {
    GridMapBuilder::new(WIDTH, HEIGHT)
        .edge_margin(2)
        // Warehouse walls, door on the east wall.
        .wall(Cell::new(4, 10), Cell::new(16, 10))
        .wall(Cell::new(4, 20), Cell::new(16, 20))
        .wall(Cell::new(4, 10), Cell::new(4, 20))
        .wall(Cell::new(16, 10), Cell::new(16, 20))
        .door(Cell::new(16, 15))
        .roof(Cell::new(5, 11), Cell::new(15, 19))
        .parking(Cell::new(44, 22), Cell::new(52, 26))
        .build()
}

pub fn zones() -> StorageZones {
    let mut zones = StorageZones::new();
    zones.add_rect(Cell::new(6, 12), Cell::new(14, 18), StorageFilter::Any);
    zones
}

pub fn agents(cfg: &YardConfig) -> AgentStore {
    let mut builder = AgentStoreBuilder::new();
    for i in 0..cfg.porters {
        let at = Cell::new(6 + i as i32, 4);
        builder = builder.agent(AgentSpec::humanlike(at).worn(CapacityContainer::new(2, 150)));
    }
    for i in 0..cfg.drivers {
        builder = builder.agent(AgentSpec::humanlike(Cell::new(6 + i as i32, 6)));
    }
    builder.build()
}

/// Vehicle spawn list: carts first, then trucks, in a row north of the
/// warehouse.
pub fn vehicles(cfg: &YardConfig) -> Vec<(VehicleSpec, Cell)> {
    let carts = (0..cfg.carts).map(|_| VehicleSpec::cart(FactionId::PLAYER));
    let trucks = (0..cfg.trucks).map(|_| VehicleSpec::truck(FactionId::PLAYER));
    carts
        .chain(trucks)
        .enumerate()
        .map(|(i, spec)| (spec, Cell::new(20 + 2 * i as i32, 5)))
        .collect()
}

/// Scatter up to `cfg.items` designated stacks east of the warehouse.
pub fn scatter(cfg: &YardConfig, map: &GridMap) -> GroundItems {
    let mut ground = GroundItems::new();
    let mut rng = EntityRng::new(cfg.sim.seed, u64::MAX);
    let mut placed = 0;
    for _ in 0..cfg.items * 50 {
        if placed == cfg.items {
            break;
        }
        let cell = Cell::new(
            rng.range_inclusive(22, (WIDTH - 4) as u64) as i32,
            rng.range_inclusive(3, (HEIGHT - 4) as u64) as i32,
        );
        if map.is_parking(cell) || !ground.is_free(cell) {
            continue;
        }
        let def = DEFS[rng.range_inclusive(0, DEFS.len() as u64 - 1) as usize];
        let count = rng.range_inclusive(5, 60) as u32;
        if let Ok(id) = ground.spawn(map, cell, def, count, 75) {
            let _ = ground.set_designated(id, true);
            placed += 1;
        }
    }
    ground
}
