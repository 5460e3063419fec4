//! Unit tests for hw-agent.

#[cfg(test)]
mod builder {
    use hw_core::{AgentId, Cell, FactionId};
    use hw_storage::CapacityContainer;

    use crate::{AgentSpec, AgentStoreBuilder};

    #[test]
    fn ids_follow_insertion_order() {
        let store = AgentStoreBuilder::new()
            .agent(AgentSpec::humanlike(Cell::new(0, 0)))
            .agent(AgentSpec::humanlike(Cell::new(5, 1)).faction(FactionId(2)))
            .build();
        assert_eq!(store.count, 2);
        assert_eq!(store.position[1], Cell::new(5, 1));
        assert!(store.is_player(AgentId(0)));
        assert!(!store.is_player(AgentId(1)));
        assert_eq!(store.agent_ids().collect::<Vec<_>>(), vec![AgentId(0), AgentId(1)]);
    }

    #[test]
    fn all_arrays_same_length() {
        let store = AgentStoreBuilder::new()
            .agents(3, AgentSpec::humanlike(Cell::new(1, 1)).worn(CapacityContainer::new(1, 10)))
            .build();
        assert_eq!(store.position.len(), 3);
        assert_eq!(store.draw_pos.len(), 3);
        assert_eq!(store.job.len(), 3);
        assert_eq!(store.worn.len(), 3);
        assert!(store.worn(AgentId(2)).is_some());
        assert!(store.check(AgentId(3)).is_err());
    }
}

#[cfg(test)]
mod condition {
    use hw_core::{AgentId, Cell};

    use crate::{AgentKind, AgentSpec, AgentStoreBuilder, Ineligible, MentalState, Vitals};

    fn one(kind: AgentKind) -> crate::AgentStore {
        AgentStoreBuilder::new()
            .agent(AgentSpec::humanlike(Cell::new(0, 0)).kind(kind))
            .build()
    }

    #[test]
    fn incapacitation() {
        let mut s = one(AgentKind::Humanlike);
        let a = AgentId(0);
        assert!(!s.is_incapacitated(a));
        s.mental[0] = MentalState::PanicFlee;
        assert!(!s.is_incapacitated(a));
        s.mental[0] = MentalState::WanderPsychotic;
        assert!(s.is_incapacitated(a));
        s.mental[0] = MentalState::None;
        s.vitals[0] = Vitals::PainShock;
        assert!(s.is_incapacitated(a));
    }

    #[test]
    fn drive_eligibility() {
        let a = AgentId(0);
        assert!(one(AgentKind::Mechanoid).drive_eligibility(a).is_ok());
        assert_eq!(
            one(AgentKind::Animal { trained: false, body_size: 2.0 }).drive_eligibility(a),
            Err(Ineligible::NotTrained)
        );
        assert_eq!(
            one(AgentKind::Animal { trained: true, body_size: 0.5 }).drive_eligibility(a),
            Err(Ineligible::TooSmall)
        );
        assert!(one(AgentKind::Animal { trained: true, body_size: 1.0 }).drive_eligibility(a).is_ok());
        assert_eq!(Ineligible::TooSmall.to_string(), "too small animal");
    }

    #[test]
    fn teleport_sets_draw_pos() {
        let mut s = one(AgentKind::Humanlike);
        s.moving[0] = true;
        s.teleport(AgentId(0), Cell::new(4, 7));
        assert_eq!(s.draw_pos[0].to_cell(), Cell::new(4, 7));
        assert!(!s.moving[0]);
    }
}
