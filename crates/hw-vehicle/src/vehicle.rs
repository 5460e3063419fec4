//! The vehicle entity.

use hw_core::{AgentId, Cell, DoorId, EntityRng, FactionId, ItemId, Rot4, Tick, Vec3, VehicleId};
use hw_storage::{CapacityContainer, CapacityResult, CarrierCapacity, ItemStack, RejectedLoad};

// ── Parts ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum MountState {
    #[default]
    Unmounted,
    Mounted { driver: AgentId, since: Tick },
}

impl MountState {
    #[inline]
    pub fn driver(self) -> Option<AgentId> {
        match self {
            MountState::Mounted { driver, .. } => Some(driver),
            MountState::Unmounted => None,
        }
    }
}

/// Fuel tank.  `leak_threshold` is a fraction of capacity: a leaking tank
/// stops spilling once it has drained down to it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuelTank {
    pub fuel: f32,
    pub capacity: f32,
    /// Fuel burnt per tick of driving.
    pub use_per_tick: f32,
    pub leaking: bool,
    pub leak_threshold: f32,
}

impl FuelTank {
    pub fn full(capacity: f32, use_per_tick: f32) -> Self {
        FuelTank {
            fuel: capacity,
            capacity,
            use_per_tick,
            leaking: false,
            leak_threshold: 0.0,
        }
    }

    #[inline]
    pub fn fraction(&self) -> f32 {
        if self.capacity <= 0.0 { 0.0 } else { self.fuel / self.capacity }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fuel <= 0.0
    }

    /// Burn up to `amount`; returns what was actually burnt.
    pub fn consume(&mut self, amount: f32) -> f32 {
        let used = amount.min(self.fuel).max(0.0);
        self.fuel -= used;
        used
    }

    pub fn refill(&mut self) {
        self.fuel = self.capacity;
    }
}

/// Cosmetic wheel state.  Deterministic: a pure function of the speeds it
/// was advanced with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Axles {
    pub wheel_rotation: f32,
    pub phase: f32,
    pub shake: f32,
}

/// Back-reference to the door this vehicle's driver is holding open.  The
/// door itself is owned by the map.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct DoorRef {
    pub door: DoorId,
    pub opened_by: AgentId,
}

// ── VehicleSpec ───────────────────────────────────────────────────────────────

/// Everything needed to spawn a vehicle.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSpec {
    pub faction: FactionId,
    /// Only agents of `faction` may mount.
    pub faction_locked: bool,
    pub max_item_slots: usize,
    pub max_total_stack: u32,
    /// Speed multiplier while running normally.
    pub base_speed: f32,
    pub fuel: Option<FuelTank>,
    pub has_axles: bool,
    /// Where the driver stands relative to the vehicle, in the vehicle's
    /// north-facing frame.
    pub interaction_offset: Vec3,
    pub despawn_at_edge: bool,
}

impl VehicleSpec {
    /// An unpowered hand cart.
    pub fn cart(faction: FactionId) -> Self {
        VehicleSpec {
            faction,
            faction_locked: false,
            max_item_slots: 4,
            max_total_stack: 300,
            base_speed: 1.6,
            fuel: None,
            has_axles: true,
            interaction_offset: Vec3::new(0.0, 0.0, 1.0),
            despawn_at_edge: false,
        }
    }

    /// A fuelled, motorized carrier.
    pub fn truck(faction: FactionId) -> Self {
        VehicleSpec {
            faction,
            faction_locked: true,
            max_item_slots: 8,
            max_total_stack: 800,
            base_speed: 2.0,
            fuel: Some(FuelTank::full(100.0, 0.05)),
            has_axles: true,
            interaction_offset: Vec3::new(0.0, 0.0, 1.0),
            despawn_at_edge: true,
        }
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

pub struct Vehicle {
    pub id: VehicleId,
    /// Draw position.  Derived from the driver while mounted.
    pub position: Vec3,
    pub rotation: Rot4,

    pub faction: FactionId,
    pub faction_locked: bool,
    /// Forbidden to its own faction by the player.
    pub forbidden: bool,

    pub storage: CapacityContainer,
    pub interaction_offset: Vec3,
    pub mount: MountState,

    pub fuel: Option<FuelTank>,
    pub broken_down: bool,
    pub axles: Option<Axles>,
    pub despawn_at_edge: bool,
    pub base_speed: f32,
    /// Recomputed every tick by the resource model.
    pub current_speed: f32,
    /// One-time AI top-up has happened.
    pub fueled_by_ai: bool,

    pub last_door: Option<DoorRef>,
    pub next_activity_check: Tick,
    pub passengers: Vec<AgentId>,

    pub(crate) rng: EntityRng,
}

impl Vehicle {
    pub(crate) fn from_spec(id: VehicleId, spec: VehicleSpec, cell: Cell, seed: u64) -> Self {
        Vehicle {
            id,
            position: cell.center(),
            rotation: Rot4::South,
            faction: spec.faction,
            faction_locked: spec.faction_locked,
            forbidden: false,
            storage: CapacityContainer::new(spec.max_item_slots, spec.max_total_stack),
            interaction_offset: spec.interaction_offset,
            mount: MountState::Unmounted,
            fuel: spec.fuel,
            broken_down: false,
            axles: spec.has_axles.then(Axles::default),
            despawn_at_edge: spec.despawn_at_edge,
            base_speed: spec.base_speed,
            current_speed: spec.base_speed,
            fueled_by_ai: false,
            last_door: None,
            next_activity_check: Tick::ZERO,
            passengers: Vec::new(),
            rng: EntityRng::new(seed, id.0 as u64),
        }
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        self.position.to_cell()
    }

    #[inline]
    pub fn driver(&self) -> Option<AgentId> {
        self.mount.driver()
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.driver().is_some()
    }

    /// Has a tank and it is dry.  Vehicles without a tank never run dry.
    pub fn is_out_of_fuel(&self) -> bool {
        self.fuel.as_ref().is_some_and(FuelTank::is_empty)
    }

    /// Interaction offset rotated into world space for facing `rot`.
    pub fn world_offset(&self, rot: Rot4) -> Vec3 {
        self.interaction_offset.rotated_by(rot)
    }
}

impl CarrierCapacity for Vehicle {
    fn slots(&self) -> usize {
        self.storage.item_slots()
    }

    fn total_stack(&self) -> u32 {
        self.storage.total_stack()
    }

    fn max_slots(&self) -> usize {
        self.storage.max_item_slots()
    }

    fn max_total_stack(&self) -> u32 {
        self.storage.max_total_stack()
    }

    fn try_add(&mut self, item: ItemStack) -> Result<(), RejectedLoad> {
        self.storage.try_add(item)
    }

    fn try_drop(&mut self, item: ItemId) -> CapacityResult<ItemStack> {
        CarrierCapacity::try_drop(&mut self.storage, item)
    }

    fn carried(&self) -> &[ItemStack] {
        self.storage.items()
    }
}
