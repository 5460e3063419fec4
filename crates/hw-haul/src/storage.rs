//! Destination search for carried cargo.

use std::collections::VecDeque;

use hw_core::{Cell, Target};
use hw_mobility::TravelGoal;
use hw_storage::ItemStack;

use crate::JobContext;

/// Pick a cell to unload `item` into.
///
/// Queued destination cells are tried first, in order; unusable ones are
/// discarded from the queue.  Otherwise every storage cell that accepts the
/// item is considered, nearest first (ties to the smaller cell), and the
/// first one the agent can reach wins.  A usable cell is in bounds,
/// passable, empty, and not reserved by someone else.
pub fn find_storage_cell(
    ctx: &JobContext<'_>,
    item: &ItemStack,
    queued: &mut VecDeque<Cell>,
) -> Option<Cell> {
    let usable = |c: Cell| {
        ctx.map.is_passable(c)
            && ctx.ground.is_free(c)
            && ctx.storage.accepts(c, item)
            && ctx.reservations.can_reserve(ctx.agent, Target::Cell(c))
    };

    while let Some(c) = queued.pop_front() {
        if usable(c) {
            return Some(c);
        }
    }

    let from = ctx.position();
    let mut candidates: Vec<Cell> = ctx.storage.storage_cells().into_iter().filter(|&c| usable(c)).collect();
    candidates.sort_unstable_by_key(|&c| (from.distance_sq(c), c));
    candidates
        .into_iter()
        .find(|&c| ctx.travel.can_reach(ctx.map, from, TravelGoal::touch(c)))
}
