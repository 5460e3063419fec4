//! `hw-mobility`: agent movement over the grid.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`state`]   | `MovementState`: per-agent travel state                           |
//! | [`store`]   | `MobilityStore`: `Vec<MovementState>` indexed by `AgentId`        |
//! | [`travel`]  | `Travel` trait, `TravelGoal`, `TravelStatus`                      |
//! | [`engine`]  | `MobilityEngine<R>`: routes requests, advances agents each tick   |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                              |
//!
//! # Movement model
//!
//! Travel is state that persists across ticks, never a blocking call:
//!
//! 1. A task step calls [`Travel::request`] every tick it is waiting to
//!    arrive.  The first call routes through a pluggable
//!    [`Router`](hw_spatial::Router); later calls with the same goal are
//!    no-ops that report `Traveling`.
//! 2. `MobilityEngine::advance` moves every travelling agent along its path
//!    by `walk_cells_per_tick × speed` cells, where `speed` is supplied per
//!    agent by the caller (a driver moves at its vehicle's current speed).
//! 3. Once the agent stands where the goal asks, the next `request` reports
//!    `Arrived`.
//!
//! `draw_pos` is interpolated between the current cell and the next one so
//! a mounted vehicle, which follows its driver's draw position, moves
//! smoothly.

pub mod engine;
pub mod error;
pub mod state;
pub mod store;
pub mod travel;

#[cfg(test)]
mod tests;

pub use engine::MobilityEngine;
pub use error::{MobilityError, MobilityResult};
pub use state::MovementState;
pub use store::MobilityStore;
pub use travel::{Travel, TravelGoal, TravelStatus};
