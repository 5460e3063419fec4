//! `hw-vehicle`: vehicles and the agents that drive them.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`vehicle`]    | `Vehicle`, `VehicleSpec`, `MountState`, `FuelTank`, `Axles`  |
//! | [`store`]      | `VehicleStore`: slots, driver index, spawn / destroy         |
//! | [`mount`]      | order_mount / mount / dismount / dismount_at / forced_dismount, boarding |
//! | [`resource`]   | Speed, fuel use, leaks, axle phase, edge-despawn rule        |
//! | [`tick`]       | `VehicleWorld`, the fixed-phase per-tick update              |
//! | [`event`]      | `VehicleEvent`, `DismountReason`, `DestroyReport`            |
//! | [`error`]      | `MountRejection`, `VehicleError`, `VehicleResult<T>`         |
//!
//! # Exclusivity
//!
//! A vehicle has at most one driver and an agent drives at most one
//! vehicle.  Both directions are held in one place: `Vehicle::mount` plus the
//! store's `driver → vehicle` index, which every mount and dismount path
//! updates together.
//!
//! # Per-tick phase order
//!
//! For each mounted vehicle, in id order:
//!
//! 1. forced-dismount checks (incapacitated → forbidden → incompatible activity)
//! 2. door bookkeeping (every `door_check_interval` ticks)
//! 3. resource model (AI refuel, fuel use, speed, leak, axles)
//! 4. position sync from the driver
//! 5. passenger sync
//! 6. edge despawn
//!
//! A vehicle that is dismounted in phase 1 skips the rest, so it never
//! receives a driver-derived position in the tick it was dismounted.

pub mod error;
pub mod event;
pub mod mount;
pub mod resource;
pub mod store;
pub mod tick;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use error::{MountRejection, VehicleError, VehicleResult};
pub use event::{DestroyReport, DismountReason, VehicleEvent};
pub use store::VehicleStore;
pub use tick::VehicleWorld;
pub use vehicle::{Axles, DoorRef, FuelTank, MountState, Vehicle, VehicleSpec};
