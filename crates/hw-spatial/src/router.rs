//! Routing trait and default grid Dijkstra.
//!
//! # Pluggability
//!
//! The mobility engine calls routing through the [`Router`] trait, so a host
//! can swap in its own pathfinder without touching the core.  The default
//! [`DijkstraRouter`] searches the 8-connected grid.
//!
//! # Cost units
//!
//! Orthogonal steps cost 10, diagonal steps 14.  A diagonal step is only
//! allowed when both orthogonal cells it cuts past are passable.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use hw_core::Cell;

use crate::map::GridMap;
use crate::{SpatialError, SpatialResult};

const ORTHOGONAL_COST: u32 = 10;
const DIAGONAL_COST: u32 = 14;

// ── Route ─────────────────────────────────────────────────────────────────────

/// Where a path should stop relative to its goal cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEnd {
    /// Stand on the goal cell.
    OnCell,
    /// Stand on the goal cell or any of its eight neighbours.
    Touch,
}

impl PathEnd {
    #[inline]
    pub fn satisfied(self, at: Cell, goal: Cell) -> bool {
        match self {
            PathEnd::OnCell => at == goal,
            PathEnd::Touch => at.is_adjacent_or_inside(goal),
        }
    }
}

/// The result of a routing query: cells to step onto in order (the start
/// cell excluded) and the total cost.
#[derive(Debug, Clone)]
pub struct Route {
    pub cells: Vec<Cell>,
    pub cost: u32,
}

impl Route {
    /// `true` if the start already satisfies the goal.
    pub fn is_trivial(&self) -> bool {
        self.cells.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable pathfinder.
pub trait Router {
    /// Compute a route from `from` toward `goal`.
    ///
    /// A start that already satisfies `end` yields an empty route.
    fn route(&self, map: &GridMap, from: Cell, goal: Cell, end: PathEnd) -> SpatialResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the passable cells of a [`GridMap`].
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, map: &GridMap, from: Cell, goal: Cell, end: PathEnd) -> SpatialResult<Route> {
        dijkstra(map, from, goal, end)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(map: &GridMap, from: Cell, goal: Cell, end: PathEnd) -> SpatialResult<Route> {
    if end.satisfied(from, goal) {
        return Ok(Route { cells: vec![], cost: 0 });
    }
    if !map.in_bounds(from) {
        return Err(SpatialError::OutOfBounds(from));
    }

    let n = map.cell_count();
    // dist[i] = best known cost to reach cell i.
    let mut dist = vec![u32::MAX; n];
    // prev[i] = cell that reached i.
    let mut prev = vec![Cell::INVALID; n];

    dist[map.index(from)] = 0;

    // Min-heap: (cost, cell).  Reverse makes BinaryHeap (max) behave as a
    // min-heap; the Cell secondary key gives deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u32, Cell)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, cell))) = heap.pop() {
        if end.satisfied(cell, goal) {
            return Ok(reconstruct(map, &prev, from, cell, cost));
        }

        // Skip stale heap entries.
        if cost > dist[map.index(cell)] {
            continue;
        }

        for (dx, dz) in Cell::ADJACENT_8 {
            let next = cell.offset(dx, dz);
            if !map.is_passable(next) {
                continue;
            }
            let step = if dx != 0 && dz != 0 {
                if !map.is_passable(cell.offset(dx, 0)) || !map.is_passable(cell.offset(0, dz)) {
                    continue;
                }
                DIAGONAL_COST
            } else {
                ORTHOGONAL_COST
            };
            let new_cost = cost.saturating_add(step);
            let ni = map.index(next);
            if new_cost < dist[ni] {
                dist[ni] = new_cost;
                prev[ni] = cell;
                heap.push(Reverse((new_cost, next)));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to: goal })
}

fn reconstruct(map: &GridMap, prev: &[Cell], from: Cell, to: Cell, cost: u32) -> Route {
    let mut cells = Vec::new();
    let mut cur = to;
    while cur != from {
        cells.push(cur);
        cur = prev[map.index(cur)];
    }
    cells.reverse();
    Route { cells, cost }
}
