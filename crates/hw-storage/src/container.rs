//! The capacity-limited container.

use hw_core::ItemId;

use crate::{ItemStack, RejectReason, RejectedLoad};

/// Ordered item storage with two ceilings.
///
/// Invariant after every mutation:
/// `item_slots() <= max_item_slots()` and `total_stack() <= max_total_stack()`.
/// The ceilings are fixed at construction.
/// Stacks are never merged; each load occupies its own slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityContainer {
    items: Vec<ItemStack>,
    max_item_slots: usize,
    max_total_stack: u32,
}

impl CapacityContainer {
    pub fn new(max_item_slots: usize, max_total_stack: u32) -> Self {
        CapacityContainer {
            items: Vec::new(),
            max_item_slots,
            max_total_stack,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────

    #[inline]
    pub fn max_item_slots(&self) -> usize {
        self.max_item_slots
    }

    #[inline]
    pub fn max_total_stack(&self) -> u32 {
        self.max_total_stack
    }

    #[inline]
    pub fn item_slots(&self) -> usize {
        self.items.len()
    }

    pub fn total_stack(&self) -> u32 {
        self.items.iter().map(|s| s.count).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn items(&self) -> &[ItemStack] {
        &self.items
    }

    #[inline]
    pub fn first(&self) -> Option<&ItemStack> {
        self.items.first()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|s| s.id == id)
    }

    /// `true` if adding `extra_slots` stacks holding `extra_stack` units would
    /// break a ceiling. A sum that overflows always breaks it.
    pub fn would_exceed(&self, extra_slots: usize, extra_stack: u32) -> bool {
        self.item_slots()
            .checked_add(extra_slots)
            .is_none_or(|slots| slots > self.max_item_slots)
            || self
                .total_stack()
                .checked_add(extra_stack)
                .is_none_or(|stack| stack > self.max_total_stack)
    }

    /// `true` if, counting `in_flight_slots` / `in_flight_stack` already
    /// promised to this container, either ceiling is reached.
    pub fn is_full_with(&self, in_flight_slots: usize, in_flight_stack: u32) -> bool {
        self.item_slots().saturating_add(in_flight_slots) >= self.max_item_slots
            || self.total_stack().saturating_add(in_flight_stack) >= self.max_total_stack
    }

    /// Why `item` would be refused, if it would.
    pub fn check(&self, item: &ItemStack) -> Result<(), RejectReason> {
        if self.item_slots() >= self.max_item_slots {
            return Err(RejectReason::SlotsFull);
        }
        match self.total_stack().checked_add(item.count) {
            Some(total) if total <= self.max_total_stack => Ok(()),
            _ => Err(RejectReason::StackCeiling),
        }
    }

    #[inline]
    pub fn can_accept(&self, item: &ItemStack) -> bool {
        self.check(item).is_ok()
    }

    // ── Mutation ─────────────────────────────────────────────────────────

    /// Append `item`, or hand it back with the reason it did not fit.
    pub fn try_add(&mut self, item: ItemStack) -> Result<(), RejectedLoad> {
        match self.check(&item) {
            Ok(()) => {
                self.items.push(item);
                debug_assert!(self.total_stack() <= self.max_total_stack);
                Ok(())
            }
            Err(reason) => Err(RejectedLoad { item, reason }),
        }
    }

    /// Remove and return the stack with id `id`, preserving the order of the
    /// rest.
    pub fn take(&mut self, id: ItemId) -> Option<ItemStack> {
        let pos = self.items.iter().position(|s| s.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Empty the container, returning its contents in load order.
    pub fn drain_all(&mut self) -> Vec<ItemStack> {
        std::mem::take(&mut self.items)
    }
}
