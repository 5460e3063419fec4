//! Unit tests for hw-mobility.

#[cfg(test)]
mod helpers {
    use hw_agent::{AgentSpec, AgentStore, AgentStoreBuilder};
    use hw_core::Cell;
    use hw_spatial::DijkstraRouter;

    use crate::MobilityEngine;

    pub fn one_agent_at(cell: Cell) -> AgentStore {
        AgentStoreBuilder::new().agent(AgentSpec::humanlike(cell)).build()
    }

    pub fn engine(agents: usize, cells_per_tick: f32) -> MobilityEngine<DijkstraRouter> {
        MobilityEngine::new(DijkstraRouter, agents, cells_per_tick)
    }
}

#[cfg(test)]
mod travel {
    use hw_core::{AgentId, Cell, Rot4};
    use hw_spatial::{GridMap, GridMapBuilder};

    use super::helpers::{engine, one_agent_at};
    use crate::{Travel, TravelGoal, TravelStatus};

    const A: AgentId = AgentId(0);

    #[test]
    fn request_is_idempotent_until_arrival() {
        let map = GridMap::open(10, 10);
        let mut agents = one_agent_at(Cell::new(0, 0));
        let mut eng = engine(1, 1.0);
        let goal = TravelGoal::on(Cell::new(3, 0));

        assert_eq!(eng.request(A, agents.position[0], goal, &map), TravelStatus::Traveling);
        let mut ticks = 0;
        while eng.request(A, agents.position[0], goal, &map) == TravelStatus::Traveling {
            eng.advance(&mut agents, |_| 1.0);
            ticks += 1;
            assert!(ticks < 10);
        }
        assert_eq!(ticks, 3);
        assert_eq!(agents.position[0], Cell::new(3, 0));
        assert_eq!(agents.rotation[0], Rot4::East);
        assert!(!agents.moving[0]);
    }

    #[test]
    fn speed_scales_progress() {
        let map = GridMap::open(10, 10);
        let mut agents = one_agent_at(Cell::new(0, 0));
        let mut eng = engine(1, 0.5);
        let goal = TravelGoal::on(Cell::new(2, 0));
        eng.request(A, agents.position[0], goal, &map);

        // Half a cell per tick at speed 1, one cell per tick at speed 2.
        eng.advance(&mut agents, |_| 2.0);
        assert_eq!(agents.position[0], Cell::new(1, 0));
        eng.advance(&mut agents, |_| 1.0);
        assert_eq!(agents.position[0], Cell::new(1, 0));
        assert!(agents.moving[0]);
        assert!(agents.draw_pos[0].x > 1.5);
        let arrived = eng.advance(&mut agents, |_| 1.0);
        assert_eq!(arrived, vec![A]);
    }

    #[test]
    fn touch_goal_already_met() {
        let map = GridMap::open(10, 10);
        let agents = one_agent_at(Cell::new(4, 4));
        let mut eng = engine(1, 1.0);
        let status = eng.request(A, agents.position[0], TravelGoal::touch(Cell::new(5, 5)), &map);
        assert_eq!(status, TravelStatus::Arrived);
    }

    #[test]
    fn unreachable_and_cancel() {
        let map = GridMapBuilder::new(10, 10).wall(Cell::new(5, 0), Cell::new(5, 9)).build();
        let agents = one_agent_at(Cell::new(0, 0));
        let mut eng = engine(1, 1.0);
        let far = TravelGoal::on(Cell::new(9, 9));
        assert!(!eng.can_reach(&map, agents.position[0], far));
        assert_eq!(eng.request(A, agents.position[0], far, &map), TravelStatus::Unreachable);

        let near = TravelGoal::on(Cell::new(2, 2));
        assert_eq!(eng.request(A, agents.position[0], near, &map), TravelStatus::Traveling);
        eng.cancel(A);
        assert!(!eng.store.in_transit(A));
    }
}
