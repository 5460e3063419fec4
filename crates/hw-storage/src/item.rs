//! Item stacks.

use std::fmt;

use hw_core::{ItemDefId, ItemId};

/// One stack of a single item type.
///
/// `stack_limit` is the type's natural stack size; a limit of 1 marks the
/// type as non-stackable (the duplicate-merge search skips those).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub id: ItemId,
    pub def: ItemDefId,
    pub count: u32,
    pub stack_limit: u32,
}

impl ItemStack {
    pub fn new(id: ItemId, def: ItemDefId, count: u32, stack_limit: u32) -> Self {
        ItemStack { id, def, count, stack_limit }
    }

    #[inline]
    pub fn is_stackable(&self) -> bool {
        self.stack_limit > 1
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{} (def {})", self.id, self.count, self.def.0)
    }
}
