//! Spatial-subsystem error type.

use thiserror::Error;

use hw_core::{Cell, DoorId, ItemId};

/// Errors produced by `hw-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: Cell, to: Cell },

    #[error("cell {0} is out of bounds")]
    OutOfBounds(Cell),

    #[error("cell {0} is impassable")]
    Impassable(Cell),

    #[error("cell {0} already holds an item")]
    CellOccupied(Cell),

    #[error("item {0} is not on the ground")]
    ItemNotFound(ItemId),

    #[error("door {0} not found")]
    DoorNotFound(DoorId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
