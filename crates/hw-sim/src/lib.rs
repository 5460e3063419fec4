//! `hw-sim`: the world and its tick loop.
//!
//! # Fixed-phase tick
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Dispatch:   every idle, able agent that is not riding as a passenger
//!                 is offered a job by the Dispatcher (ascending AgentId).
//!   ② Jobs:       every running job runs its steps (ascending AgentId).
//!                 A job that ends releases all of its agent's
//!                 reservations, stops its travel and leaves any vehicle.
//!   ③ Movement:   travelling agents advance; drivers at their vehicle's
//!                 current speed.
//!   ④ Vehicles:   the per-vehicle phase order from hw-vehicle (forced
//!                 dismount → doors → resources → position → passengers →
//!                 edge despawn).
//!   ⑤ Observer:   events of the tick, in the order they happened.
//! ```
//!
//! Vehicle state derived from the driver is written in phase ④ only, after
//! movement, so nothing else ever writes a vehicle's position while it is
//! driven.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut sim = SimBuilder::new(config, agents, map, ReturnVehicleDispatcher::new(), DijkstraRouter)
//!     .zones(zones)
//!     .vehicle(VehicleSpec::cart(FactionId::PLAYER), Cell::new(4, 4))
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use dispatch::{
    DesignationDispatcher, DispatchContext, Dispatcher, NoopDispatcher, ReturnVehicleDispatcher,
    ScriptedDispatcher,
};
pub use error::{SimError, SimResult};
pub use event::{SimEvent, TickStats, WorldSummary};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
