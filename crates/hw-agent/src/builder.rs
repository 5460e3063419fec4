//! Fluent builder for constructing an `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use hw_agent::{AgentSpec, AgentStoreBuilder};
//! use hw_core::Cell;
//! use hw_storage::CapacityContainer;
//!
//! let store = AgentStoreBuilder::new()
//!     .agent(AgentSpec::humanlike(Cell::new(2, 3)))
//!     .agent(AgentSpec::humanlike(Cell::new(4, 3)).worn(CapacityContainer::new(2, 50)))
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert!(store.worn[1].is_some());
//! ```

use hw_core::{Cell, FactionId, Rot4};
use hw_storage::CapacityContainer;

use crate::{AgentKind, AgentStore, MentalState, Vitals};

/// Initial state for one agent.
#[derive(Clone, Debug)]
pub struct AgentSpec {
    pub position: Cell,
    pub rotation: Rot4,
    pub faction: FactionId,
    pub kind: AgentKind,
    pub base_speed: f32,
    pub worn: Option<CapacityContainer>,
}

impl AgentSpec {
    /// A healthy player-faction human at `position`.
    pub fn humanlike(position: Cell) -> Self {
        AgentSpec {
            position,
            rotation: Rot4::South,
            faction: FactionId::PLAYER,
            kind: AgentKind::Humanlike,
            base_speed: 1.0,
            worn: None,
        }
    }

    pub fn kind(mut self, kind: AgentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn faction(mut self, faction: FactionId) -> Self {
        self.faction = faction;
        self
    }

    pub fn speed(mut self, base_speed: f32) -> Self {
        self.base_speed = base_speed;
        self
    }

    pub fn worn(mut self, container: CapacityContainer) -> Self {
        self.worn = Some(container);
        self
    }
}

/// Fluent builder for [`AgentStore`].
///
/// Agents receive ids in the order they are added, starting at 0.
#[derive(Default)]
pub struct AgentStoreBuilder {
    specs: Vec<AgentSpec>,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agent(mut self, spec: AgentSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Add `n` copies of `spec`.
    pub fn agents(mut self, n: usize, spec: AgentSpec) -> Self {
        self.specs.extend(std::iter::repeat_n(spec, n));
        self
    }

    /// Construct the store.  Every agent starts healthy, idle and still.
    pub fn build(self) -> AgentStore {
        let mut store = AgentStore::with_capacity(self.specs.len());
        for spec in self.specs {
            store.position.push(spec.position);
            store.draw_pos.push(spec.position.center());
            store.rotation.push(spec.rotation);
            store.faction.push(spec.faction);
            store.kind.push(spec.kind);
            store.vitals.push(Vitals::Healthy);
            store.mental.push(MentalState::None);
            store.starving.push(false);
            store.exhausted.push(false);
            store.job.push(None);
            store.moving.push(false);
            store.full_body_busy.push(false);
            store.base_speed.push(spec.base_speed);
            store.worn.push(spec.worn);
            store.count += 1;
        }
        store
    }
}
