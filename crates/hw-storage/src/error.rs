use std::fmt;

use hw_core::ItemId;
use thiserror::Error;

use crate::ItemStack;

/// Which ceiling a rejected load would have broken.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RejectReason {
    SlotsFull,
    StackCeiling,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RejectReason::SlotsFull => "no free item slot",
            RejectReason::StackCeiling => "would exceed total stack capacity",
        })
    }
}

/// A load that was refused.  The item is returned untouched so the caller can
/// put it back where it came from.
#[derive(Debug, Error)]
#[error("cannot load {item}: {reason}")]
pub struct RejectedLoad {
    pub item: ItemStack,
    pub reason: RejectReason,
}

#[derive(Debug, Error)]
pub enum CapacityError {
    #[error(transparent)]
    Rejected(#[from] RejectedLoad),

    #[error("item {0} is not in this container")]
    NotCarried(ItemId),
}

pub type CapacityResult<T> = Result<T, CapacityError>;
