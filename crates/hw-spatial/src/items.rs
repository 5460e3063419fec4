//! Items lying on the ground.
//!
//! At most one stack per cell.  Each stack keeps its `ItemId` for life, so
//! an id seen in a haul queue stays valid while the stack moves from the
//! ground into a carrier and back.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over integer cell coordinates answers the
//! radius-bounded "nearest item of this type" query used by the hauling
//! duplicate search.  `nearest_neighbor_iter_with_distance_2` yields
//! candidates in ascending distance, so the search stops at the first one
//! that passes the caller's filter or at the radius, whichever comes first.

use hw_core::{Cell, ItemDefId, ItemId};
use hw_storage::ItemStack;
use rstar::RTree;
use rstar::primitives::GeomWithData;
use rustc_hash::FxHashMap;

use crate::{GridMap, SpatialError, SpatialResult};

type ItemEntry = GeomWithData<[i32; 2], ItemId>;

#[inline]
fn point(cell: Cell) -> [i32; 2] {
    [cell.x, cell.z]
}

/// One stack on the ground plus its world-side flags.
#[derive(Clone, Debug)]
pub struct GroundItem {
    pub stack: ItemStack,
    pub cell: Cell,
    /// Marked for hauling.  Cleared when the stack is picked up.
    pub designated: bool,
    pub burning: bool,
}

#[derive(Default)]
pub struct GroundItems {
    items: FxHashMap<ItemId, GroundItem>,
    by_cell: FxHashMap<Cell, ItemId>,
    index: RTree<ItemEntry>,
    next_id: u32,
}

impl GroundItems {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Create a new stack at `cell` and return its id.
    pub fn spawn(
        &mut self,
        map: &GridMap,
        cell: Cell,
        def: ItemDefId,
        count: u32,
        stack_limit: u32,
    ) -> SpatialResult<ItemId> {
        let id = ItemId(self.next_id);
        self.place(map, ItemStack::new(id, def, count, stack_limit), cell)?;
        Ok(id)
    }

    /// Put an existing stack on `cell`.  The cell must be in bounds,
    /// passable and empty.
    pub fn place(&mut self, map: &GridMap, stack: ItemStack, cell: Cell) -> SpatialResult<()> {
        if !map.in_bounds(cell) {
            return Err(SpatialError::OutOfBounds(cell));
        }
        if !map.is_passable(cell) {
            return Err(SpatialError::Impassable(cell));
        }
        if self.by_cell.contains_key(&cell) {
            return Err(SpatialError::CellOccupied(cell));
        }
        let id = stack.id;
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.by_cell.insert(cell, id);
        self.index.insert(ItemEntry::new(point(cell), id));
        self.items.insert(id, GroundItem { stack, cell, designated: false, burning: false });
        Ok(())
    }

    /// Put a stack on the nearest free passable cell to `near`, searching
    /// outward ring by ring.  Returns the cell used, or the stack back if
    /// the whole map is full.
    pub fn place_near(
        &mut self,
        map: &GridMap,
        stack: ItemStack,
        near: Cell,
    ) -> Result<Cell, ItemStack> {
        let max_ring = map.width.max(map.height);
        for r in 0..=max_ring {
            for cell in ring(near, r) {
                if map.is_passable(cell) && !self.by_cell.contains_key(&cell) {
                    // Cannot fail: both preconditions were just checked.
                    let _ = self.place(map, stack, cell);
                    return Ok(cell);
                }
            }
        }
        Err(stack)
    }

    /// Lift a stack off the ground.
    pub fn take(&mut self, id: ItemId) -> Option<ItemStack> {
        let item = self.items.remove(&id)?;
        self.by_cell.remove(&item.cell);
        self.index.remove(&ItemEntry::new(point(item.cell), id));
        Some(item.stack)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: ItemId) -> Option<&GroundItem> {
        self.items.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    #[inline]
    pub fn cell_of(&self, id: ItemId) -> Option<Cell> {
        self.items.get(&id).map(|i| i.cell)
    }

    #[inline]
    pub fn item_at(&self, cell: Cell) -> Option<ItemId> {
        self.by_cell.get(&cell).copied()
    }

    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        !self.by_cell.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All ground item ids in ascending order.
    pub fn ids(&self) -> Vec<ItemId> {
        let mut ids: Vec<_> = self.items.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Closest item to `from` within `radius` cells (euclidean) of type
    /// `def` that passes `accept`.  Equidistant candidates resolve to the
    /// lower id.
    pub fn nearest_of_def(
        &self,
        from: Cell,
        radius: i32,
        def: ItemDefId,
        mut accept: impl FnMut(&GroundItem) -> bool,
    ) -> Option<ItemId> {
        let r2 = radius * radius;
        let mut best: Option<(i32, ItemId)> = None;
        for (entry, d2) in self.index.nearest_neighbor_iter_with_distance_2(&point(from)) {
            if d2 > r2 {
                break;
            }
            if let Some((bd, _)) = best {
                if d2 > bd {
                    break;
                }
            }
            let id = entry.data;
            let Some(item) = self.items.get(&id) else { continue };
            if item.stack.def != def || !accept(item) {
                continue;
            }
            if best.is_none_or(|(bd, bid)| d2 < bd || id < bid) {
                best = Some((d2, id));
            }
        }
        best.map(|(_, id)| id)
    }

    // ── Flags ─────────────────────────────────────────────────────────────

    pub fn set_designated(&mut self, id: ItemId, designated: bool) -> SpatialResult<()> {
        let item = self.items.get_mut(&id).ok_or(SpatialError::ItemNotFound(id))?;
        item.designated = designated;
        Ok(())
    }

    pub fn set_burning(&mut self, id: ItemId, burning: bool) -> SpatialResult<()> {
        let item = self.items.get_mut(&id).ok_or(SpatialError::ItemNotFound(id))?;
        item.burning = burning;
        Ok(())
    }
}

/// Cells at Chebyshev distance exactly `r` from `c`, in a fixed order.
fn ring(c: Cell, r: i32) -> impl Iterator<Item = Cell> {
    (-r..=r).flat_map(move |dz| {
        (-r..=r).filter_map(move |dx| {
            (dx.abs() == r || dz.abs() == r).then(|| c.offset(dx, dz))
        })
    })
}
