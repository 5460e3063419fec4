//! `hw-storage`: bounded item storage shared by vehicles and worn carriers.
//!
//! A [`CapacityContainer`] holds an ordered list of [`ItemStack`]s under two
//! ceilings: a maximum number of distinct stacks and a maximum sum of stack
//! counts.  Loads that would break either ceiling are rejected whole and the
//! item is handed back; nothing is ever truncated.
//!
//! The hauling pipeline never asks "is this a vehicle or a backpack?".  It
//! talks to whatever carrier it resolved through [`CarrierCapacity`].

pub mod carrier;
pub mod container;
pub mod error;
pub mod item;


pub use carrier::CarrierCapacity;
pub use container::CapacityContainer;
pub use error::{CapacityError, CapacityResult, RejectReason, RejectedLoad};
pub use item::ItemStack;
