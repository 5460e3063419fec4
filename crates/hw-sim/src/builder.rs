//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeMap;

use hw_agent::AgentStore;
use hw_core::{Cell, SimConfig, Tuning};
use hw_mobility::MobilityEngine;
use hw_reserve::ReservationManager;
use hw_spatial::{GridMap, GroundItems, Router, StorageZones};
use hw_vehicle::{VehicleSpec, VehicleStore};

use crate::{Dispatcher, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<D, R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, summary interval
/// - [`AgentStore`]: from [`hw_agent::AgentStoreBuilder`]
/// - [`GridMap`]: from [`hw_spatial::GridMapBuilder`]
/// - `D: Dispatcher`: who gets which job
/// - `R: Router`: the routing algorithm (e.g. [`hw_spatial::DijkstraRouter`])
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                  |
/// |----------------------|--------------------------|
/// | `.tuning(t)`         | `Tuning::default()`      |
/// | `.zones(z)`          | no storage zones         |
/// | `.ground(g)`         | no items on the ground   |
/// | `.vehicle(spec, c)`  | no vehicles              |
pub struct SimBuilder<D: Dispatcher, R: Router> {
    config:     SimConfig,
    agents:     AgentStore,
    map:        GridMap,
    dispatcher: D,
    router:     R,
    tuning:     Option<Tuning>,
    zones:      Option<StorageZones>,
    ground:     Option<GroundItems>,
    vehicles:   Vec<(VehicleSpec, Cell)>,
}

impl<D: Dispatcher, R: Router> SimBuilder<D, R> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:     SimConfig,
        agents:     AgentStore,
        map:        GridMap,
        dispatcher: D,
        router:     R,
    ) -> Self {
        Self {
            config,
            agents,
            map,
            dispatcher,
            router,
            tuning: None,
            zones: None,
            ground: None,
            vehicles: Vec::new(),
        }
    }

    pub fn tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = Some(tuning);
        self
    }

    pub fn zones(mut self, zones: StorageZones) -> Self {
        self.zones = Some(zones);
        self
    }

    /// Items already on the ground.  They must have been spawned against the
    /// same map passed to [`new`](Self::new).
    pub fn ground(mut self, ground: GroundItems) -> Self {
        self.ground = Some(ground);
        self
    }

    /// Spawn a vehicle at `cell`.  Vehicle ids follow call order.
    pub fn vehicle(mut self, spec: VehicleSpec, cell: Cell) -> Self {
        self.vehicles.push((spec, cell));
        self
    }

    /// Validate inputs and construct the [`Sim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`] if an agent or vehicle starts off the map or
    ///   on an impassable cell, or a tuning value makes no sense.
    pub fn build(self) -> SimResult<Sim<D, R>> {
        for agent in self.agents.agent_ids() {
            let cell = self.agents.position[agent.index()];
            if !self.map.is_passable(cell) {
                return Err(SimError::Config(format!(
                    "agent {agent} starts on {cell}, which is off the map or impassable"
                )));
            }
        }
        for (_, cell) in &self.vehicles {
            if !self.map.is_passable(*cell) {
                return Err(SimError::Config(format!(
                    "vehicle spawn cell {cell} is off the map or impassable"
                )));
            }
        }

        let tuning = self.tuning.unwrap_or_default();
        let walk = tuning.mobility.walk_cells_per_tick;
        if walk.is_nan() || walk <= 0.0 {
            return Err(SimError::Config(format!(
                "walk_cells_per_tick must be positive, got {walk}"
            )));
        }
        if tuning.mount.activity_recheck_min > tuning.mount.activity_recheck_max {
            return Err(SimError::Config(format!(
                "activity recheck range [{}, {}] is empty",
                tuning.mount.activity_recheck_min, tuning.mount.activity_recheck_max
            )));
        }
        if tuning.mount.door_check_interval == 0 || tuning.vehicle.leak_interval == 0 {
            return Err(SimError::Config(
                "door_check_interval and leak_interval must be non-zero".into(),
            ));
        }

        let mut vehicles = VehicleStore::new(self.config.seed);
        for (spec, cell) in self.vehicles {
            vehicles.spawn(spec, cell);
        }

        let mobility = MobilityEngine::new(
            self.router,
            self.agents.count,
            tuning.mobility.walk_cells_per_tick,
        );
        let clock = self.config.make_clock();

        Ok(Sim {
            config: self.config,
            clock,
            tuning,
            agents: self.agents,
            vehicles,
            ground: self.ground.unwrap_or_default(),
            map: self.map,
            zones: self.zones.unwrap_or_default(),
            reservations: ReservationManager::new(),
            mobility,
            dispatcher: self.dispatcher,
            jobs: BTreeMap::new(),
            pending: Vec::new(),
        })
    }
}
