//! Unit tests for hw-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, FactionId, ItemId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(VehicleId::INVALID.0, u32::MAX);
        assert_eq!(ItemId::default(), ItemId::INVALID);
        assert!(!FactionId::INVALID.is_valid());
    }

    #[test]
    fn player_faction() {
        assert!(FactionId::PLAYER.is_player());
        assert!(!FactionId(3).is_player());
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Cell, Rot4, Vec3};

    #[test]
    fn adjacency_excludes_self() {
        let c = Cell::new(5, 5);
        assert!(!c.is_adjacent_8way(c));
        assert!(c.is_adjacent_or_inside(c));
        assert!(c.is_adjacent_8way(Cell::new(6, 4)));
        assert!(!c.is_adjacent_8way(Cell::new(7, 5)));
    }

    #[test]
    fn neighbors_are_all_adjacent() {
        let c = Cell::new(0, 0);
        let n = c.neighbors8();
        assert_eq!(n.len(), 8);
        assert!(n.iter().all(|&o| c.is_adjacent_8way(o)));
    }

    #[test]
    fn to_cell_floors_negative() {
        assert_eq!(Vec3::new(-0.5, 0.0, 2.9).to_cell(), Cell::new(-1, 2));
        assert_eq!(Cell::new(3, 4).center().to_cell(), Cell::new(3, 4));
    }

    #[test]
    fn cardinal_rotation_is_exact() {
        let v = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(v.rotated_by(Rot4::North), v);
        assert_eq!(v.rotated_by(Rot4::East), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(v.rotated_by(Rot4::South), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(v.rotated_by(Rot4::West), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn facing_from_delta() {
        assert_eq!(Rot4::from_delta(0, 0), None);
        assert_eq!(Rot4::from_delta(2, 1), Some(Rot4::East));
        assert_eq!(Rot4::from_delta(0, -3), Some(Rot4::South));
        assert_eq!(Rot4::from_delta(-1, 1), Some(Rot4::West));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn since_saturates() {
        assert_eq!(Tick(10).since(Tick(4)), 6);
        assert_eq!(Tick(4).since(Tick(10)), 0);
    }

    #[test]
    fn cadence() {
        assert!(Tick(96).is_multiple_of(96));
        assert!(!Tick(97).is_multiple_of(96));
        assert!(!Tick(0).is_multiple_of(0));
    }

    #[test]
    fn clock_advances() {
        let mut c = SimClock::new();
        c.advance();
        c.advance();
        assert_eq!(c.current_tick, Tick(2));
    }
}

#[cfg(test)]
mod rng {
    use crate::EntityRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = EntityRng::new(7, 3);
        let mut b = EntityRng::new(7, 3);
        for _ in 0..16 {
            assert_eq!(a.range_inclusive(60, 180), b.range_inclusive(60, 180));
        }
    }

    #[test]
    fn range_is_inclusive_and_bounded() {
        let mut r = EntityRng::new(1, 1);
        for _ in 0..200 {
            let v = r.range_inclusive(60, 180);
            assert!((60..=180).contains(&v));
        }
        assert_eq!(r.range_inclusive(9, 3), 9);
    }
}

#[cfg(test)]
mod config {
    use crate::{JobKind, Tuning};

    #[test]
    fn defaults_match_stock_constants() {
        let t = Tuning::default();
        assert_eq!(t.mount.door_check_interval, 96);
        assert_eq!(t.mount.activity_recheck_min, 60);
        assert_eq!(t.mount.activity_recheck_max, 180);
        assert_eq!(t.vehicle.penalty_speed, 0.75);
        assert_eq!(t.haul.duplicate_search_radius, 30);
        assert!(t.mount.is_incompatible(JobKind::LayDown));
        assert!(!t.mount.is_incompatible(JobKind::Haul));
    }
}
