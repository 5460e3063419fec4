//! The grid map.
//!
//! Per-cell flags are stored row-major in flat `Vec`s indexed by
//! [`GridMap::index`].  Doors, parking cells and contamination are sparse
//! and live in side tables.

use std::collections::BTreeSet;

use hw_core::{AgentId, Cell, DoorId};
use rustc_hash::FxHashMap;

use crate::{Door, DoorControl, DoorState};

/// Width of the band along the map border where nothing may be built.
pub const DEFAULT_EDGE_MARGIN: i32 = 10;

pub struct GridMap {
    pub width: i32,
    pub height: i32,
    /// Cells within this many cells of the border form the no-build edge.
    pub edge_margin: i32,

    passable: Vec<bool>,
    roofed: Vec<bool>,

    doors: Vec<Door>,
    door_at: FxHashMap<Cell, DoorId>,

    parking: BTreeSet<Cell>,
    contamination: FxHashMap<Cell, u32>,
}

impl GridMap {
    /// An open, roofless `width × height` map.
    pub fn open(width: i32, height: i32) -> Self {
        GridMapBuilder::new(width, height).build()
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.z >= 0 && cell.x < self.width && cell.z < self.height
    }

    /// Row-major index.  Only meaningful for in-bounds cells.
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        (cell.z * self.width + cell.x) as usize
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn cell_at(&self, index: usize) -> Cell {
        let i = index as i32;
        Cell::new(i % self.width, i / self.width)
    }

    #[inline]
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.passable[self.index(cell)]
    }

    #[inline]
    pub fn is_roofed(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.roofed[self.index(cell)]
    }

    pub fn set_passable(&mut self, cell: Cell, passable: bool) {
        if self.in_bounds(cell) {
            let i = self.index(cell);
            self.passable[i] = passable;
        }
    }

    pub fn set_roofed(&mut self, cell: Cell, roofed: bool) {
        if self.in_bounds(cell) {
            let i = self.index(cell);
            self.roofed[i] = roofed;
        }
    }

    /// `true` inside the no-build band along the border.
    pub fn in_no_build_edge(&self, cell: Cell) -> bool {
        let m = self.edge_margin;
        cell.x < m || cell.z < m || cell.x >= self.width - m || cell.z >= self.height - m
    }

    // ── Doors ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn door_at(&self, cell: Cell) -> Option<DoorId> {
        self.door_at.get(&cell).copied()
    }

    #[inline]
    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id.index())
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    // ── Parking area ──────────────────────────────────────────────────────

    #[inline]
    pub fn is_parking(&self, cell: Cell) -> bool {
        self.parking.contains(&cell)
    }

    pub fn parking_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.parking.iter().copied()
    }

    /// Closest parking cell to `from` that satisfies `free`.  Ties resolve to
    /// the smaller cell.
    pub fn nearest_parking(&self, from: Cell, mut free: impl FnMut(Cell) -> bool) -> Option<Cell> {
        self.parking
            .iter()
            .copied()
            .filter(|&c| free(c))
            .min_by_key(|&c| (from.distance_sq(c), c))
    }

    // ── Contamination ─────────────────────────────────────────────────────

    /// Record `amount` units of ground contamination (fuel spills) at `cell`.
    pub fn contaminate(&mut self, cell: Cell, amount: u32) {
        *self.contamination.entry(cell).or_insert(0) += amount;
    }

    pub fn contamination_at(&self, cell: Cell) -> u32 {
        self.contamination.get(&cell).copied().unwrap_or(0)
    }

    pub fn total_contamination(&self) -> u64 {
        self.contamination.values().map(|&v| v as u64).sum()
    }
}

impl DoorControl for GridMap {
    fn start_manual_open_by(&mut self, door: DoorId, agent: AgentId) {
        if let Some(d) = self.doors.get_mut(door.index()) {
            d.state = DoorState::HeldOpen { by: agent };
        }
    }

    fn start_manual_close_by(&mut self, door: DoorId, agent: AgentId) {
        if let Some(d) = self.doors.get_mut(door.index()) {
            if d.state == (DoorState::HeldOpen { by: agent }) {
                d.state = DoorState::Closed;
            }
        }
    }
}

// ── GridMapBuilder ───────────────────────────────────────────────────────────

/// Construct a [`GridMap`] incrementally, then call [`build`](Self::build).
///
/// ```
/// use hw_core::Cell;
/// use hw_spatial::GridMapBuilder;
///
/// let map = GridMapBuilder::new(20, 20)
///     .wall(Cell::new(5, 0), Cell::new(5, 10))
///     .door(Cell::new(5, 4))
///     .parking(Cell::new(15, 15), Cell::new(16, 16))
///     .build();
/// assert!(!map.is_passable(Cell::new(5, 2)));
/// assert!(map.is_passable(Cell::new(5, 4)));
/// assert_eq!(map.parking_cells().count(), 4);
/// ```
pub struct GridMapBuilder {
    map: GridMap,
}

impl GridMapBuilder {
    pub fn new(width: i32, height: i32) -> Self {
        let n = (width.max(0) * height.max(0)) as usize;
        GridMapBuilder {
            map: GridMap {
                width,
                height,
                edge_margin: DEFAULT_EDGE_MARGIN,
                passable: vec![true; n],
                roofed: vec![false; n],
                doors: Vec::new(),
                door_at: FxHashMap::default(),
                parking: BTreeSet::new(),
                contamination: FxHashMap::default(),
            },
        }
    }

    pub fn edge_margin(mut self, margin: i32) -> Self {
        self.map.edge_margin = margin;
        self
    }

    /// Impassable cells over the inclusive rectangle `a..=b`.
    pub fn wall(mut self, a: Cell, b: Cell) -> Self {
        for c in rect(a, b) {
            self.map.set_passable(c, false);
        }
        self
    }

    /// Roof over the inclusive rectangle `a..=b`.
    pub fn roof(mut self, a: Cell, b: Cell) -> Self {
        for c in rect(a, b) {
            self.map.set_roofed(c, true);
        }
        self
    }

    /// A closed door at `cell`; the cell becomes passable.
    pub fn door(mut self, cell: Cell) -> Self {
        if self.map.in_bounds(cell) && !self.map.door_at.contains_key(&cell) {
            let id = DoorId(self.map.doors.len() as u32);
            self.map.doors.push(Door { id, cell, state: DoorState::Closed });
            self.map.door_at.insert(cell, id);
            self.map.set_passable(cell, true);
        }
        self
    }

    /// Mark the inclusive rectangle `a..=b` as parking area.
    pub fn parking(mut self, a: Cell, b: Cell) -> Self {
        for c in rect(a, b) {
            if self.map.in_bounds(c) {
                self.map.parking.insert(c);
            }
        }
        self
    }

    pub fn build(self) -> GridMap {
        self.map
    }
}

fn rect(a: Cell, b: Cell) -> impl Iterator<Item = Cell> {
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (z0, z1) = (a.z.min(b.z), a.z.max(b.z));
    (z0..=z1).flat_map(move |z| (x0..=x1).map(move |x| Cell::new(x, z)))
}
