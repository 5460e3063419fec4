//! `hw-core`: foundational types for the haulwork simulation core.
//!
//! This crate is a dependency of every other `hw-*` crate.  It has no `hw-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`ids`]       | `AgentId`, `VehicleId`, `ItemId`, `DoorId`, `FactionId`, `ItemDefId` |
//! | [`geo`]       | `Cell` (grid coordinate), `Vec3` (draw position), `Rot4`   |
//! | [`time`]      | `Tick`, `SimClock`, `SimConfig`                            |
//! | [`rng`]       | `EntityRng` (per-entity deterministic stream)              |
//! | [`job`]       | `JobKind`: what an agent is currently doing                |
//! | [`target`]    | `Target`: anything that can be reserved                    |
//! | [`config`]    | `Tuning` and its per-subsystem groups                      |
//! | [`error`]     | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod job;
pub mod rng;
pub mod target;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{HaulTuning, MobilityTuning, MountTuning, Tuning, VehicleTuning};
pub use error::{CoreError, CoreResult};
pub use geo::{Cell, Rot4, Vec3};
pub use ids::{AgentId, DoorId, FactionId, ItemDefId, ItemId, VehicleId};
pub use job::JobKind;
pub use rng::EntityRng;
pub use target::Target;
pub use time::{SimClock, SimConfig, Tick};
