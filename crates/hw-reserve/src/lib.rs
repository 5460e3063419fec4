//! `hw-reserve`: the reservation registry.
//!
//! Maps each claimable [`Target`](hw_core::Target) to the single agent that
//! holds it.  An agent may hold many targets; a target has at most one
//! holder.  The registry does not know about tasks: when a claim is revoked
//! with [`ReservationManager::force_release`] the old holder finds out on its
//! next check.
//!
//! The simulation is single-threaded, so there is no locking.  Callers
//! check-then-reserve before committing to a target and either release what
//! they abandon or rely on `release_all_for_agent` at task end.

mod error;
mod manager;

#[cfg(test)]
mod tests;

pub use error::ReservationConflict;
pub use manager::ReservationManager;
