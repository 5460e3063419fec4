//! `hw-haul`: multi-step transport jobs.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`context`]   | `JobContext` (borrowed world view), `CarrierRef`, `resolve_carrier` |
//! | [`haul`]      | `HaulJob`, `HaulOrder`, `HaulStep`, `HaulState`            |
//! | [`storage`]   | `find_storage_cell`: destination search for carried cargo  |
//! | [`park`]      | `ParkJob`: drive a vehicle back to the parking area        |
//! | [`job`]       | `Job` (any running job), `JobOrder` (a job not yet started)|
//! | [`error`]     | `HaulError`, `HaulResult<T>`                               |
//!
//! # Haul step order
//!
//! ```text
//! GotoCarrier → MountCarrier            (vehicle carriers only)
//! ExtractTarget → GotoTarget → Collect → CheckDuplicates → JumpIfTargetsQueued
//! CheckNeedStorageCell → GotoCell → DropInCell
//! ```
//!
//! `CheckDuplicates` jumps back to `GotoTarget` when it finds another stack
//! of the type just loaded; `JumpIfTargetsQueued` jumps back to
//! `ExtractTarget` while the carrier has room; `DropInCell` jumps back to
//! `CheckNeedStorageCell` while cargo remains and to `ExtractTarget` when
//! the carrier is empty but targets are still queued.
//!
//! Jobs never own the carrier.  They hold a [`CarrierRef`] and resolve it
//! through [`CarrierCapacity`](hw_storage::CarrierCapacity) on every step,
//! so a vehicle destroyed or a driver dismounted under a running job ends
//! the job cleanly on its next step.

pub mod context;
pub mod error;
pub mod haul;
pub mod job;
pub mod park;
pub mod storage;


pub use context::{CarrierRef, JobContext, resolve_carrier};
pub use error::{HaulError, HaulResult};
pub use haul::{HaulJob, HaulOrder, HaulState, HaulStep};
pub use job::{Job, JobOrder};
pub use park::{ParkJob, ParkStep};
pub use storage::find_storage_cell;
