//! Storage zones and the storage-cell policy.

use std::collections::BTreeSet;

use hw_core::{Cell, ItemDefId};
use hw_storage::ItemStack;
use rustc_hash::FxHashMap;

/// Answers whether a cell is a valid destination for an item.
///
/// A pure predicate over zone configuration.  Whether the cell is currently
/// empty or reserved is the caller's business.
pub trait StoragePolicy {
    fn accepts(&self, cell: Cell, item: &ItemStack) -> bool;

    /// Every cell that belongs to some storage area, in ascending order.
    fn storage_cells(&self) -> Vec<Cell>;

    /// `item` already lies where storage wants it and needs no hauling.
    fn is_stored(&self, cell: Cell, item: &ItemStack) -> bool {
        self.accepts(cell, item)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageFilter {
    Any,
    Only(BTreeSet<ItemDefId>),
}

impl StorageFilter {
    pub fn allows(&self, def: ItemDefId) -> bool {
        match self {
            StorageFilter::Any => true,
            StorageFilter::Only(set) => set.contains(&def),
        }
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageZone {
    pub cells: BTreeSet<Cell>,
    pub filter: StorageFilter,
}

/// A set of non-overlapping storage zones.  A cell added to a second zone
/// stays with the first.
#[derive(Default)]
pub struct StorageZones {
    zones: Vec<StorageZone>,
    zone_of: FxHashMap<Cell, usize>,
}

impl StorageZones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone over the inclusive rectangle `a..=b`; returns its index.
    pub fn add_rect(&mut self, a: Cell, b: Cell, filter: StorageFilter) -> usize {
        let mut cells = BTreeSet::new();
        for z in a.z.min(b.z)..=a.z.max(b.z) {
            for x in a.x.min(b.x)..=a.x.max(b.x) {
                cells.insert(Cell::new(x, z));
            }
        }
        self.add(StorageZone { cells, filter })
    }

    pub fn add(&mut self, mut zone: StorageZone) -> usize {
        let idx = self.zones.len();
        zone.cells.retain(|c| !self.zone_of.contains_key(c));
        for &c in &zone.cells {
            self.zone_of.insert(c, idx);
        }
        self.zones.push(zone);
        idx
    }

    pub fn zone_at(&self, cell: Cell) -> Option<&StorageZone> {
        self.zone_of.get(&cell).map(|&i| &self.zones[i])
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl StoragePolicy for StorageZones {
    fn accepts(&self, cell: Cell, item: &ItemStack) -> bool {
        self.zone_at(cell).is_some_and(|z| z.filter.allows(item.def))
    }

    fn storage_cells(&self) -> Vec<Cell> {
        let mut cells: Vec<_> = self.zone_of.keys().copied().collect();
        cells.sort_unstable();
        cells
    }
}
