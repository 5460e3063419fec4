//! Claimable targets.
//!
//! Anything an agent can reserve: an item on the ground or in flight, a
//! vehicle, or a destination cell.

use std::fmt;

use crate::{Cell, ItemId, VehicleId};

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Item(ItemId),
    Vehicle(VehicleId),
    Cell(Cell),
}

impl From<ItemId> for Target {
    fn from(id: ItemId) -> Self {
        Target::Item(id)
    }
}

impl From<VehicleId> for Target {
    fn from(id: VehicleId) -> Self {
        Target::Vehicle(id)
    }
}

impl From<Cell> for Target {
    fn from(c: Cell) -> Self {
        Target::Cell(c)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Item(id) => write!(f, "{id}"),
            Target::Vehicle(id) => write!(f, "{id}"),
            Target::Cell(c) => write!(f, "Cell{c}"),
        }
    }
}
