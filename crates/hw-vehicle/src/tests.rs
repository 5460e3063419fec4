//! Unit tests for hw-vehicle.

#[cfg(test)]
mod helpers {
    use hw_agent::{AgentSpec, AgentStore, AgentStoreBuilder};
    use hw_core::{Cell, FactionId, MountTuning, Tick, VehicleTuning};
    use hw_reserve::ReservationManager;
    use hw_spatial::{GridMap, GroundItems};

    use crate::{VehicleEvent, VehicleStore, VehicleWorld};

    pub struct World {
        pub agents: AgentStore,
        pub map: GridMap,
        pub ground: GroundItems,
        pub reservations: ReservationManager,
        pub mount: MountTuning,
        pub vehicle: VehicleTuning,
    }

    impl World {
        pub fn new(map: GridMap, agent_cells: &[Cell]) -> Self {
            let mut b = AgentStoreBuilder::new();
            for &c in agent_cells {
                b = b.agent(AgentSpec::humanlike(c).faction(FactionId::PLAYER));
            }
            World {
                agents: b.build(),
                map,
                ground: GroundItems::new(),
                reservations: ReservationManager::new(),
                mount: MountTuning::default(),
                vehicle: VehicleTuning::default(),
            }
        }

        pub fn tick(&mut self, vehicles: &mut VehicleStore, now: u64) -> Vec<VehicleEvent> {
            let mut w = VehicleWorld {
                agents: &mut self.agents,
                map: &mut self.map,
                ground: &mut self.ground,
                reservations: &mut self.reservations,
                mount_tuning: &self.mount,
                vehicle_tuning: &self.vehicle,
            };
            vehicles.tick(Tick(now), &mut w)
        }
    }
}

#[cfg(test)]
mod mount {
    use hw_core::{AgentId, Cell, FactionId, Target, Tick};
    use hw_spatial::GridMap;

    use super::helpers::World;
    use crate::{DismountReason, MountRejection, VehicleSpec, VehicleStore};

    const X: AgentId = AgentId(0);
    const Y: AgentId = AgentId(1);

    fn setup() -> (World, VehicleStore, hw_core::VehicleId) {
        let w = World::new(GridMap::open(40, 40), &[Cell::new(20, 20), Cell::new(21, 20)]);
        let mut vs = VehicleStore::new(1);
        let v = vs.spawn(VehicleSpec::cart(FactionId::PLAYER), Cell::new(20, 21));
        (w, vs, v)
    }

    #[test]
    fn occupied_vehicle_rejects_second_driver() {
        let (mut w, mut vs, v) = setup();
        vs.mount(v, X, &w.agents, Tick(0), &w.mount).unwrap();
        assert_eq!(vs.get(v).unwrap().driver(), Some(X));

        assert_eq!(
            vs.mount(v, Y, &w.agents, Tick(0), &w.mount),
            Err(MountRejection::Occupied { driver: X })
        );
        assert_eq!(vs.get(v).unwrap().driver(), Some(X));

        assert_eq!(vs.dismount(v, &mut w.reservations), Some(X));
        vs.mount(v, Y, &w.agents, Tick(1), &w.mount).unwrap();
        assert_eq!(vs.get(v).unwrap().driver(), Some(Y));
        assert!(!vs.is_driving(X));
        assert_eq!(vs.vehicle_of_driver(Y), Some(v));
    }

    #[test]
    fn agent_drives_at_most_one_vehicle() {
        let (w, mut vs, v) = setup();
        let v2 = vs.spawn(VehicleSpec::cart(FactionId::PLAYER), Cell::new(25, 25));
        vs.mount(v, X, &w.agents, Tick(0), &w.mount).unwrap();
        assert_eq!(
            vs.mount(v2, X, &w.agents, Tick(0), &w.mount),
            Err(MountRejection::AlreadyDriving(v))
        );
        // Re-mounting your own vehicle is fine.
        assert!(vs.mount(v, X, &w.agents, Tick(0), &w.mount).is_ok());
    }

    #[test]
    fn faction_lock() {
        let (mut w, mut vs, _) = setup();
        let truck = vs.spawn(VehicleSpec::truck(FactionId(5)), Cell::new(30, 30));
        w.agents.faction[1] = FactionId(5);
        assert_eq!(
            vs.mount(truck, X, &w.agents, Tick(0), &w.mount),
            Err(MountRejection::FactionMismatch)
        );
        assert!(vs.mount(truck, Y, &w.agents, Tick(0), &w.mount).is_ok());
    }

    #[test]
    fn dismount_releases_vehicle_reservation() {
        let (mut w, mut vs, v) = setup();
        w.reservations.reserve(X, Target::Vehicle(v)).unwrap();
        vs.mount(v, X, &w.agents, Tick(0), &w.mount).unwrap();
        vs.dismount(v, &mut w.reservations);
        assert!(!w.reservations.is_reserved(Target::Vehicle(v)));
    }

    #[test]
    fn forced_dismount_is_idempotent() {
        let (mut w, mut vs, v) = setup();
        assert_eq!(vs.forced_dismount(v, DismountReason::Forbidden, &mut w.reservations), None);
        vs.mount(v, X, &w.agents, Tick(0), &w.mount).unwrap();
        assert_eq!(vs.forced_dismount(v, DismountReason::Forbidden, &mut w.reservations), Some(X));
        let pos = vs.get(v).unwrap().position;
        assert_eq!(vs.forced_dismount(v, DismountReason::Forbidden, &mut w.reservations), None);
        assert_eq!(vs.get(v).unwrap().position, pos);
        assert!(!vs.is_driving(X));
    }

    #[test]
    fn dismount_at_invalid_cell_stays_put() {
        let (mut w, mut vs, v) = setup();
        vs.mount(v, X, &w.agents, Tick(0), &w.mount).unwrap();
        let before = vs.get(v).unwrap().position;
        assert_eq!(vs.dismount_at(v, Cell::new(-5, 3), &w.map, &mut w.reservations), Some(X));
        assert_eq!(vs.get(v).unwrap().position, before);

        vs.mount(v, X, &w.agents, Tick(0), &w.mount).unwrap();
        vs.dismount_at(v, Cell::new(3, 3), &w.map, &mut w.reservations);
        assert_eq!(vs.get(v).unwrap().cell(), Cell::new(3, 3));
    }

    #[test]
    fn order_mount_overrides_previous_claim() {
        let (mut w, vs, v) = setup();
        assert_eq!(vs.order_mount(v, X, &w.agents, &mut w.reservations), Ok(None));
        assert_eq!(vs.order_mount(v, Y, &w.agents, &mut w.reservations), Ok(Some(X)));
        assert_eq!(w.reservations.holder(Target::Vehicle(v)), Some(Y));
        assert_eq!(w.reservations.reservations_of(X).count(), 0);
    }

    #[test]
    fn order_mount_refuses_vehicle_driven_by_someone_else() {
        let (mut w, mut vs, v) = setup();
        assert_eq!(vs.order_mount(v, X, &w.agents, &mut w.reservations), Ok(None));
        vs.mount(v, X, &w.agents, Tick(0), &w.mount).unwrap();

        assert_eq!(
            vs.order_mount(v, Y, &w.agents, &mut w.reservations),
            Err(MountRejection::Occupied { driver: X })
        );
        assert_eq!(w.reservations.holder(Target::Vehicle(v)), Some(X));
        assert_eq!(vs.order_mount(v, X, &w.agents, &mut w.reservations), Ok(None));
    }

    #[test]
    fn order_mount_eligibility() {
        use hw_agent::{AgentKind, Ineligible};
        let (mut w, mut vs, v) = setup();
        w.agents.kind[1] = AgentKind::Animal { trained: true, body_size: 0.4 };
        assert_eq!(
            vs.order_mount(v, Y, &w.agents, &mut w.reservations),
            Err(MountRejection::CannotDrive(Ineligible::TooSmall))
        );
        assert_eq!(
            MountRejection::CannotDrive(Ineligible::TooSmall).to_string(),
            "too small animal"
        );

        let v2 = vs.spawn(VehicleSpec::cart(FactionId::PLAYER), Cell::new(10, 10));
        vs.mount(v2, X, &w.agents, Tick(0), &w.mount).unwrap();
        assert_eq!(
            vs.order_mount(v, X, &w.agents, &mut w.reservations),
            Err(MountRejection::AlreadyDriving(v2))
        );
        assert!(!w.reservations.is_reserved(Target::Vehicle(v)));
    }
}

#[cfg(test)]
mod tick {
    use hw_agent::{MentalState, Vitals};
    use hw_core::{AgentId, Cell, FactionId, JobKind, Rot4, Target, Tick, Vec3};
    use hw_spatial::{GridMap, GridMapBuilder};

    use super::helpers::World;
    use crate::{DismountReason, VehicleEvent, VehicleSpec, VehicleStore};

    const X: AgentId = AgentId(0);

    fn mounted(map: GridMap, at: Cell, spec: VehicleSpec) -> (World, VehicleStore, hw_core::VehicleId) {
        let mut w = World::new(map, &[at]);
        w.agents.faction[0] = spec.faction;
        let mut vs = VehicleStore::new(7);
        let v = vs.spawn(spec, at);
        vs.mount(v, X, &w.agents, Tick(0), &w.mount).unwrap();
        (w, vs, v)
    }

    #[test]
    fn position_follows_driver_minus_scaled_offset() {
        let (mut w, mut vs, v) = mounted(GridMap::open(40, 40), Cell::new(20, 20), VehicleSpec::cart(FactionId::PLAYER));
        w.agents.rotation[0] = Rot4::North;
        w.tick(&mut vs, 1);
        let veh = vs.get(v).unwrap();
        let expected = Cell::new(20, 20).center() - Vec3::new(0.0, 0.0, 1.3);
        assert!((veh.position.z - expected.z).abs() < 1e-5);
        assert_eq!(veh.rotation, Rot4::North);

        w.agents.rotation[0] = Rot4::East;
        w.tick(&mut vs, 2);
        let veh = vs.get(v).unwrap();
        assert!((veh.position.x - (20.5 - 1.3)).abs() < 1e-5);
        assert_eq!(veh.rotation, Rot4::East);
    }

    #[test]
    fn out_of_bounds_offset_falls_back_to_driver() {
        let (mut w, mut vs, v) = mounted(GridMap::open(40, 40), Cell::new(5, 0), VehicleSpec::cart(FactionId::PLAYER));
        w.agents.rotation[0] = Rot4::North;
        w.tick(&mut vs, 1);
        assert_eq!(vs.get(v).unwrap().position, w.agents.draw_pos[0]);
    }

    #[test]
    fn incapacitated_driver_dismounted_before_sync() {
        let (mut w, mut vs, v) = mounted(GridMap::open(40, 40), Cell::new(20, 20), VehicleSpec::cart(FactionId::PLAYER));
        w.reservations.reserve(X, Target::Vehicle(v)).unwrap();
        w.tick(&mut vs, 1);
        let synced = vs.get(v).unwrap().position;

        // Driver moves and is downed in the same tick.
        w.agents.teleport(X, Cell::new(25, 25));
        w.agents.vitals[0] = Vitals::Downed;
        let events = w.tick(&mut vs, 2);

        assert!(events.contains(&VehicleEvent::ForcedDismount {
            vehicle: v,
            driver: X,
            reason: DismountReason::Incapacitated,
        }));
        let veh = vs.get(v).unwrap();
        assert_eq!(veh.driver(), None);
        assert_eq!(veh.position, synced);
        assert!(!w.reservations.is_reserved(Target::Vehicle(v)));
        assert!(!vs.is_driving(X));
    }

    #[test]
    fn uncontrolled_mental_state_dismounts() {
        let (mut w, mut vs, v) = mounted(GridMap::open(40, 40), Cell::new(20, 20), VehicleSpec::cart(FactionId::PLAYER));
        w.agents.mental[0] = MentalState::Berserk;
        w.tick(&mut vs, 1);
        assert!(!vs.get(v).unwrap().is_mounted());
    }

    #[test]
    fn forbidden_vehicle_dismounts_player_driver() {
        let (mut w, mut vs, v) = mounted(GridMap::open(40, 40), Cell::new(20, 20), VehicleSpec::cart(FactionId::PLAYER));
        vs.get_mut(v).unwrap().forbidden = true;
        let events = w.tick(&mut vs, 1);
        assert_eq!(events[0].kind(), "forced_dismount");
        assert!(!vs.get(v).unwrap().is_mounted());
    }

    #[test]
    fn incompatible_activity_needs_roof_and_cadence() {
        let map = GridMapBuilder::new(40, 40).roof(Cell::new(15, 15), Cell::new(25, 25)).build();
        let (mut w, mut vs, v) = mounted(map, Cell::new(30, 30), VehicleSpec::cart(FactionId::PLAYER));
        w.agents.job[0] = Some(JobKind::Research);

        // Unroofed: nothing happens at the first check.
        w.tick(&mut vs, 60);
        assert!(vs.get(v).unwrap().is_mounted());
        let next = vs.get(v).unwrap().next_activity_check;
        assert!(next >= Tick(120) && next <= Tick(240));

        // Roofed, but before the next check.
        w.agents.teleport(X, Cell::new(20, 20));
        w.tick(&mut vs, 61);
        assert!(vs.get(v).unwrap().is_mounted());

        let events = w.tick(&mut vs, next.0);
        assert!(events.iter().any(|e| matches!(
            e,
            VehicleEvent::ForcedDismount { reason: DismountReason::IncompatibleActivity(JobKind::Research), .. }
        )));
        assert!(!vs.get(v).unwrap().is_mounted());
    }

    #[test]
    fn compatible_job_under_roof_keeps_driving() {
        let map = GridMapBuilder::new(40, 40).roof(Cell::new(0, 0), Cell::new(39, 39)).build();
        let (mut w, mut vs, v) = mounted(map, Cell::new(20, 20), VehicleSpec::cart(FactionId::PLAYER));
        w.agents.job[0] = Some(JobKind::Haul);
        for t in 1..400 {
            w.tick(&mut vs, t);
        }
        assert!(vs.get(v).unwrap().is_mounted());
    }

    #[test]
    fn door_opened_then_closed_on_cadence() {
        let map = GridMapBuilder::new(40, 40).door(Cell::new(20, 20)).build();
        let (mut w, mut vs, v) = mounted(map, Cell::new(20, 20), VehicleSpec::cart(FactionId::PLAYER));
        let door = w.map.door_at(Cell::new(20, 20)).unwrap();

        assert!(w.tick(&mut vs, 95).is_empty());
        let events = w.tick(&mut vs, 96);
        assert!(events.contains(&VehicleEvent::DoorOpened { vehicle: v, door, by: X }));
        assert!(w.map.door(door).unwrap().is_open());

        w.agents.teleport(X, Cell::new(22, 20));
        w.tick(&mut vs, 100);
        assert!(w.map.door(door).unwrap().is_open());
        let events = w.tick(&mut vs, 192);
        assert!(events.contains(&VehicleEvent::DoorClosed { vehicle: v, door, by: X }));
        assert!(!w.map.door(door).unwrap().is_open());
        assert_eq!(vs.get(v).unwrap().last_door, None);
    }

    #[test]
    fn fuel_burns_only_while_moving_and_not_busy() {
        let (mut w, mut vs, v) = mounted(GridMap::open(40, 40), Cell::new(20, 20), VehicleSpec::truck(FactionId::PLAYER));
        let full = vs.get(v).unwrap().fuel.as_ref().unwrap().fuel;
        w.tick(&mut vs, 1);
        assert_eq!(vs.get(v).unwrap().fuel.as_ref().unwrap().fuel, full);

        w.agents.moving[0] = true;
        w.tick(&mut vs, 2);
        let after = vs.get(v).unwrap().fuel.as_ref().unwrap().fuel;
        assert!(after < full);

        w.agents.full_body_busy[0] = true;
        w.tick(&mut vs, 3);
        assert_eq!(vs.get(v).unwrap().fuel.as_ref().unwrap().fuel, after);
    }

    #[test]
    fn empty_tank_or_breakdown_gives_penalty_speed() {
        let (mut w, mut vs, v) = mounted(GridMap::open(40, 40), Cell::new(20, 20), VehicleSpec::truck(FactionId::PLAYER));
        w.tick(&mut vs, 1);
        assert_eq!(vs.get(v).unwrap().current_speed, 2.0);

        vs.get_mut(v).unwrap().fuel.as_mut().unwrap().fuel = 0.0;
        w.tick(&mut vs, 2);
        assert_eq!(vs.get(v).unwrap().current_speed, 0.75);

        let veh = vs.get_mut(v).unwrap();
        veh.fuel.as_mut().unwrap().refill();
        veh.broken_down = true;
        w.tick(&mut vs, 3);
        assert_eq!(vs.get(v).unwrap().current_speed, 0.75);
    }

    #[test]
    fn tankless_vehicle_never_starves() {
        let (mut w, mut vs, v) = mounted(GridMap::open(40, 40), Cell::new(20, 20), VehicleSpec::cart(FactionId::PLAYER));
        w.agents.moving[0] = true;
        for t in 1..50 {
            w.tick(&mut vs, t);
        }
        assert_eq!(vs.get(v).unwrap().current_speed, 1.6);
    }

    #[test]
    fn leak_spills_on_cadence_until_threshold() {
        let (mut w, mut vs, v) = mounted(GridMap::open(40, 40), Cell::new(20, 20), VehicleSpec::truck(FactionId::PLAYER));
        {
            let tank = vs.get_mut(v).unwrap().fuel.as_mut().unwrap();
            tank.leaking = true;
            tank.fuel = 1.0;
            tank.leak_threshold = 0.0;
        }
        let mut spills = 0;
        for t in 1..=200 {
            for e in w.tick(&mut vs, t) {
                if let VehicleEvent::FuelLeaked { amount, .. } = e {
                    assert!(t % 15 == 0);
                    assert!(amount <= 0.15 + 1e-6);
                    spills += 1;
                }
            }
        }
        // 1.0 fuel at 0.15 per spill empties in seven spills.
        assert_eq!(spills, 7);
        assert!(vs.get(v).unwrap().fuel.as_ref().unwrap().is_empty());
        assert!(w.map.total_contamination() >= 7);
    }

    #[test]
    fn ai_refuel_happens_once() {
        let (mut w, mut vs, v) = mounted(GridMap::open(40, 40), Cell::new(20, 20), VehicleSpec::cart(FactionId(3)));
        vs.get_mut(v).unwrap().fuel = Some(crate::FuelTank { fuel: 10.0, ..crate::FuelTank::full(100.0, 0.05) });
        let events = w.tick(&mut vs, 1);
        assert!(events.contains(&VehicleEvent::AiRefueled { vehicle: v }));
        vs.get_mut(v).unwrap().fuel.as_mut().unwrap().fuel = 10.0;
        assert!(!w.tick(&mut vs, 2).contains(&VehicleEvent::AiRefueled { vehicle: v }));
    }

    #[test]
    fn hostile_driver_despawns_at_edge_and_drops_cargo() {
        let (mut w, mut vs, v) = mounted(GridMap::open(40, 40), Cell::new(3, 20), VehicleSpec::truck(FactionId(4)));
        let item = hw_storage::ItemStack::new(hw_core::ItemId(50), hw_core::ItemDefId(1), 10, 75);
        vs.get_mut(v).unwrap().storage.try_add(item).unwrap();

        let events = w.tick(&mut vs, 1);
        let Some(VehicleEvent::Despawned { report, .. }) = events.last() else {
            panic!("expected despawn, got {events:?}");
        };
        assert_eq!(report.driver, Some(X));
        assert_eq!(report.dropped.len(), 1);
        assert!(!vs.is_spawned(v));
        assert!(!vs.is_driving(X));
        assert!(w.ground.contains(hw_core::ItemId(50)));
    }

    #[test]
    fn friendly_driver_stays_at_edge_unless_fleeing() {
        let (mut w, mut vs, v) = mounted(GridMap::open(40, 40), Cell::new(3, 20), VehicleSpec::truck(FactionId::PLAYER));
        w.tick(&mut vs, 1);
        assert!(vs.is_spawned(v));
        w.agents.mental[0] = MentalState::PanicFlee;
        w.tick(&mut vs, 2);
        assert!(!vs.is_spawned(v));
    }

    #[test]
    fn axles_are_deterministic() {
        let mut a = crate::Axles::default();
        let mut b = crate::Axles::default();
        for _ in 0..100 {
            crate::resource::advance_axles(&mut a, 2.0);
            crate::resource::advance_axles(&mut b, 2.0);
        }
        assert_eq!(a, b);
        assert!((a.wheel_rotation - 200.0 / 3.0).abs() < 1e-3);
        assert!(a.shake >= 0.0 && a.shake <= 0.05);
    }
}

#[cfg(test)]
mod lifecycle {
    use hw_agent::Vitals;
    use hw_core::{AgentId, Cell, FactionId, ItemDefId, ItemId, Target, Tick};
    use hw_spatial::GridMap;
    use hw_storage::ItemStack;

    use super::helpers::World;
    use crate::{MountRejection, VehicleEvent, VehicleSpec, VehicleStore};

    const X: AgentId = AgentId(0);
    const P: AgentId = AgentId(1);

    fn setup() -> (World, VehicleStore, hw_core::VehicleId) {
        let w = World::new(GridMap::open(40, 40), &[Cell::new(20, 20), Cell::new(21, 21)]);
        let mut vs = VehicleStore::new(3);
        let v = vs.spawn(VehicleSpec::cart(FactionId::PLAYER), Cell::new(20, 20));
        (w, vs, v)
    }

    #[test]
    fn destroy_occupied_vehicle_dismounts_then_drains() {
        let (mut w, mut vs, v) = setup();
        vs.mount(v, X, &w.agents, Tick(0), &w.mount).unwrap();
        vs.board(v, P, &w.agents, &w.vehicle).unwrap();
        w.reservations.reserve(X, Target::Vehicle(v)).unwrap();
        for i in 0..3 {
            let s = ItemStack::new(ItemId(100 + i), ItemDefId(1), 20, 75);
            vs.get_mut(v).unwrap().storage.try_add(s).unwrap();
        }

        let report = vs.destroy(v, &mut w.map, &mut w.ground, &mut w.reservations).unwrap();
        assert_eq!(report.passengers, vec![P]);
        assert_eq!(report.driver, Some(X));
        assert_eq!(report.dropped.len(), 3);
        assert!(report.lost.is_empty());
        assert!(!vs.is_spawned(v));
        assert!(!vs.is_driving(X));
        assert_eq!(vs.vehicle_of_passenger(P), None);
        assert!(!w.reservations.is_reserved(Target::Vehicle(v)));
        assert_eq!(w.ground.len(), 3);

        // Destroying twice is a no-op.
        assert!(vs.destroy(v, &mut w.map, &mut w.ground, &mut w.reservations).is_none());
        assert_eq!(vs.mount(v, X, &w.agents, Tick(1), &w.mount), Err(MountRejection::Despawned));
    }

    #[test]
    fn boarding_rules() {
        let (mut w, mut vs, v) = setup();
        assert_eq!(vs.board(v, P, &w.agents, &w.vehicle), Err(MountRejection::NotMounted));
        vs.mount(v, X, &w.agents, Tick(0), &w.mount).unwrap();

        w.agents.starving[1] = true;
        assert_eq!(vs.board(v, P, &w.agents, &w.vehicle), Err(MountRejection::Unfit));
        w.agents.starving[1] = false;
        w.agents.faction[1] = FactionId(9);
        assert_eq!(vs.board(v, P, &w.agents, &w.vehicle), Err(MountRejection::FactionMismatch));
        w.agents.faction[1] = FactionId::PLAYER;

        vs.board(v, P, &w.agents, &w.vehicle).unwrap();
        assert_eq!(vs.board(v, P, &w.agents, &w.vehicle), Err(MountRejection::SeatsFull));
        assert_eq!(vs.board(v, X, &w.agents, &w.vehicle), Err(MountRejection::AlreadyDriving(v)));
    }

    #[test]
    fn passengers_follow_and_unboard() {
        let (mut w, mut vs, v) = setup();
        vs.mount(v, X, &w.agents, Tick(0), &w.mount).unwrap();
        vs.board(v, P, &w.agents, &w.vehicle).unwrap();
        w.tick(&mut vs, 1);
        assert_eq!(w.agents.position[1], vs.get(v).unwrap().cell());

        w.agents.vitals[1] = Vitals::Downed;
        let events = w.tick(&mut vs, 2);
        assert!(events.contains(&VehicleEvent::PassengerUnboarded { vehicle: v, agent: P }));
        assert!(vs.get(v).unwrap().passengers.is_empty());
    }

    #[test]
    fn dismount_unboards_everyone() {
        let (mut w, mut vs, v) = setup();
        vs.mount(v, X, &w.agents, Tick(0), &w.mount).unwrap();
        vs.board(v, P, &w.agents, &w.vehicle).unwrap();
        vs.dismount(v, &mut w.reservations);
        assert_eq!(vs.vehicle_of_passenger(P), None);
        assert!(vs.get(v).unwrap().passengers.is_empty());
    }
}
