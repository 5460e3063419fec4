//! The carrier capability.
//!
//! Vehicle storage and worn containers both implement this; the hauling
//! pipeline depends on nothing else.

use hw_core::ItemId;

use crate::{CapacityContainer, CapacityError, CapacityResult, ItemStack, RejectedLoad};

pub trait CarrierCapacity {
    /// Distinct stacks currently carried.
    fn slots(&self) -> usize;

    /// Sum of carried stack counts.
    fn total_stack(&self) -> u32;

    fn max_slots(&self) -> usize;

    fn max_total_stack(&self) -> u32;

    fn try_add(&mut self, item: ItemStack) -> Result<(), RejectedLoad>;

    /// Remove a carried stack so it can be placed in the world.
    fn try_drop(&mut self, item: ItemId) -> CapacityResult<ItemStack>;

    /// Carried stacks in load order.
    fn carried(&self) -> &[ItemStack];

    fn is_empty(&self) -> bool {
        self.slots() == 0
    }

    fn first_carried(&self) -> Option<&ItemStack> {
        self.carried().first()
    }

    /// At or above either ceiling once in-flight promises are counted.
    fn is_full_with(&self, in_flight_slots: usize, in_flight_stack: u32) -> bool {
        self.slots().saturating_add(in_flight_slots) >= self.max_slots()
            || self.total_stack().saturating_add(in_flight_stack) >= self.max_total_stack()
    }
}

impl CarrierCapacity for CapacityContainer {
    fn slots(&self) -> usize {
        self.item_slots()
    }

    fn total_stack(&self) -> u32 {
        CapacityContainer::total_stack(self)
    }

    fn max_slots(&self) -> usize {
        self.max_item_slots()
    }

    fn max_total_stack(&self) -> u32 {
        CapacityContainer::max_total_stack(self)
    }

    fn try_add(&mut self, item: ItemStack) -> Result<(), RejectedLoad> {
        CapacityContainer::try_add(self, item)
    }

    fn try_drop(&mut self, item: ItemId) -> CapacityResult<ItemStack> {
        self.take(item).ok_or(CapacityError::NotCarried(item))
    }

    fn carried(&self) -> &[ItemStack] {
        self.items()
    }
}
