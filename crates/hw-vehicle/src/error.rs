//! Vehicle error types.

use std::fmt;

use hw_agent::Ineligible;
use hw_core::{AgentId, CoreError, VehicleId};
use thiserror::Error;

/// A refused mount, boarding or mount order.  `Display` gives the inline
/// reason shown to the player.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum MountRejection {
    Occupied { driver: AgentId },
    FactionMismatch,
    AlreadyDriving(VehicleId),
    CannotDrive(Ineligible),
    Despawned,
    NotMounted,
    SeatsFull,
    Unfit,
}

impl fmt::Display for MountRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountRejection::Occupied { driver } => write!(f, "already driven by {driver}"),
            MountRejection::FactionMismatch => f.write_str("wrong faction"),
            MountRejection::AlreadyDriving(_) => f.write_str("already driving"),
            MountRejection::CannotDrive(why) => write!(f, "{why}"),
            MountRejection::Despawned => f.write_str("vehicle despawned"),
            MountRejection::NotMounted => f.write_str("nobody is driving"),
            MountRejection::SeatsFull => f.write_str("no free seat"),
            MountRejection::Unfit => f.write_str("too hungry or tired to ride"),
        }
    }
}

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("vehicle {0} not found")]
    NotFound(VehicleId),

    #[error("mount rejected: {0}")]
    Rejected(#[from] MountRejection),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type VehicleResult<T> = Result<T, VehicleError>;
