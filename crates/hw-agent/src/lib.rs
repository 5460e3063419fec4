//! `hw-agent`: Structure-of-Arrays agent storage.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`state`]     | `AgentKind`, `Vitals`, `MentalState`, `Ineligible`         |
//! | [`store`]     | `AgentStore` (SoA arrays)                                  |
//! | [`builder`]   | `AgentStoreBuilder`, `AgentSpec` (fluent construction)     |
//!
//! Agents are owned by the world.  Nothing in the core creates or destroys
//! them after the store is built; systems only read and write their fields.

pub mod builder;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::{AgentSpec, AgentStoreBuilder};
pub use state::{AgentKind, Ineligible, MentalState, Vitals};
pub use store::AgentStore;
