//! Unit tests for the reservation registry.

#[cfg(test)]
mod reserve {
    use hw_core::{AgentId, Cell, ItemId, Target, VehicleId};

    use crate::{ReservationConflict, ReservationManager};

    const A: AgentId = AgentId(0);
    const B: AgentId = AgentId(1);

    #[test]
    fn second_agent_is_refused() {
        let mut r = ReservationManager::new();
        let t = Target::Item(ItemId(3));
        r.reserve(A, t).unwrap();
        let err = r.reserve(B, t).unwrap_err();
        assert_eq!(err, ReservationConflict { target: t, holder: A });
        assert_eq!(r.holder(t), Some(A));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn reserve_is_reentrant_for_holder() {
        let mut r = ReservationManager::new();
        let t = Target::Cell(Cell::new(1, 1));
        r.reserve(A, t).unwrap();
        r.reserve(A, t).unwrap();
        assert!(r.can_reserve(A, t));
        assert!(!r.can_reserve(B, t));
        assert_eq!(r.reservations_of(A).count(), 1);
    }

    #[test]
    fn release_requires_holder() {
        let mut r = ReservationManager::new();
        let t = Target::Vehicle(VehicleId(0));
        r.reserve(A, t).unwrap();
        assert!(!r.release(B, t));
        assert!(r.is_reserved(t));
        assert!(r.release(A, t));
        assert!(!r.is_reserved(t));
        assert_eq!(r.reservations_of(A).count(), 0);
    }

    #[test]
    fn force_release_overrides_and_reports_holder() {
        let mut r = ReservationManager::new();
        let t = Target::Vehicle(VehicleId(2));
        r.reserve(A, t).unwrap();
        assert_eq!(r.force_release(t), Some(A));
        assert_eq!(r.force_release(t), None);
        // B can now claim it; A's reverse index no longer mentions it.
        r.reserve(B, t).unwrap();
        assert!(!r.reservations_of(A).any(|x| x == t));
    }

    #[test]
    fn release_all_for_agent_leaves_others() {
        let mut r = ReservationManager::new();
        r.reserve(A, Target::Item(ItemId(1))).unwrap();
        r.reserve(A, Target::Cell(Cell::new(0, 0))).unwrap();
        r.reserve(B, Target::Item(ItemId(2))).unwrap();
        assert_eq!(r.release_all_for_agent(A), 2);
        assert_eq!(r.release_all_for_agent(A), 0);
        assert_eq!(r.len(), 1);
        assert_eq!(r.holder(Target::Item(ItemId(2))), Some(B));
    }

    #[test]
    fn at_most_one_holder_per_target() {
        let mut r = ReservationManager::new();
        let targets = [Target::Item(ItemId(0)), Target::Item(ItemId(1)), Target::Cell(Cell::new(2, 2))];
        for (i, &t) in targets.iter().cycle().take(12).enumerate() {
            let _ = r.reserve(AgentId(i as u32 % 4), t);
        }
        for t in targets {
            let holders = (0..4).filter(|&a| r.holds(AgentId(a), t)).count();
            assert_eq!(holders, 1);
        }
    }
}
