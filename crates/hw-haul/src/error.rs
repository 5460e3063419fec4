//! Errors raised while starting a job.  A running job never errors; it ends
//! with a `TaskEnd`.

use hw_reserve::ReservationConflict;
use hw_vehicle::MountRejection;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HaulError {
    #[error("haul order has no targets")]
    EmptyOrder,

    #[error(transparent)]
    Reserved(#[from] ReservationConflict),

    #[error("cannot drive: {0}")]
    Mount(#[from] MountRejection),
}

pub type HaulResult<T> = Result<T, HaulError>;
