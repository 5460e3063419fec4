//! The hauling pipeline.

use std::collections::VecDeque;

use hw_core::{AgentId, Cell, ItemId, Target, Tick};
use hw_mobility::{TravelGoal, TravelStatus};
use hw_reserve::ReservationManager;
use hw_spatial::{GridMap, GroundItems};
use hw_storage::{CarrierCapacity, RejectReason, RejectedLoad};
use hw_task::{StepOutcome, TaskDriver, TaskEnd};
use tracing::{debug, error};

use crate::{CarrierRef, HaulError, HaulResult, JobContext, find_storage_cell, resolve_carrier};

type Outcome = StepOutcome<HaulStep>;

// ── Order & steps ─────────────────────────────────────────────────────────────

/// What a dispatcher asks for: carry `targets` in `carrier`, optionally
/// unloading into the `cells` given (any valid storage cell otherwise).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HaulOrder {
    pub carrier: CarrierRef,
    pub targets: Vec<ItemId>,
    pub cells: Vec<Cell>,
}

impl HaulOrder {
    pub fn new(carrier: CarrierRef, targets: Vec<ItemId>) -> Self {
        HaulOrder { carrier, targets, cells: Vec::new() }
    }

    pub fn with_cells(mut self, cells: Vec<Cell>) -> Self {
        self.cells = cells;
        self
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum HaulStep {
    GotoCarrier,
    MountCarrier,
    ExtractTarget,
    GotoTarget,
    Collect,
    CheckDuplicates,
    JumpIfTargetsQueued,
    CheckNeedStorageCell,
    GotoCell,
    DropInCell,
}

impl HaulStep {
    /// Step list for a haul with `carrier`.  A worn container needs no
    /// walk-to and mount.
    pub fn sequence(carrier: CarrierRef) -> Vec<HaulStep> {
        use HaulStep::*;
        let mut steps = Vec::with_capacity(10);
        if carrier.vehicle().is_some() {
            steps.extend([GotoCarrier, MountCarrier]);
        }
        steps.extend([
            ExtractTarget,
            GotoTarget,
            Collect,
            CheckDuplicates,
            JumpIfTargetsQueued,
            CheckNeedStorageCell,
            GotoCell,
            DropInCell,
        ]);
        steps
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

/// Per-agent haul bookkeeping.
#[derive(Clone, Debug)]
pub struct HaulState {
    pub carrier: CarrierRef,
    /// The stack being walked to and picked up.
    pub active: Option<ItemId>,
    /// Stack loaded most recently; the duplicate check looks for more of its
    /// type.
    pub last_loaded: Option<ItemId>,
    pub target_queue: VecDeque<ItemId>,
    pub cell_queue: VecDeque<Cell>,
    /// Reserved destination for the next unload.
    pub store_cell: Option<Cell>,
    /// No storage search before this tick.
    retry_at: Tick,
}

enum CarrierCheck {
    Ready,
    Lost,
    Dismounted,
    /// Still driving, but the vehicle claim went to someone else.
    ClaimLost,
}

enum Absorb {
    Loaded,
    Rejected(RejectReason),
    Missing,
}

pub struct HaulJob {
    driver: TaskDriver<HaulStep>,
    state: HaulState,
}

impl HaulJob {
    /// Start a haul for `agent`: every target is reserved up front.  If any
    /// is held by someone else the order is refused and nothing stays
    /// reserved.
    pub fn assign(
        agent: AgentId,
        order: HaulOrder,
        reservations: &mut ReservationManager,
    ) -> HaulResult<Self> {
        if order.targets.is_empty() {
            return Err(HaulError::EmptyOrder);
        }
        for (i, &item) in order.targets.iter().enumerate() {
            if let Err(conflict) = reservations.reserve(agent, Target::Item(item)) {
                for &taken in &order.targets[..i] {
                    reservations.release(agent, Target::Item(taken));
                }
                return Err(conflict.into());
            }
        }
        debug!(%agent, carrier = ?order.carrier, targets = order.targets.len(), "haul assigned");
        Ok(HaulJob {
            driver: TaskDriver::new(HaulStep::sequence(order.carrier)),
            state: HaulState {
                carrier: order.carrier,
                active: None,
                last_loaded: None,
                target_queue: order.targets.into(),
                cell_queue: order.cells.into(),
                store_cell: None,
                retry_at: Tick::ZERO,
            },
        })
    }

    /// Run this tick's steps.  Returns the end status once, when the haul
    /// stops.
    pub fn tick(&mut self, ctx: &mut JobContext<'_>) -> Option<TaskEnd> {
        let HaulJob { driver, state } = self;
        driver.tick(|step| state.run(step, ctx))
    }

    /// Add a target behind the queued ones.  It is claimed when the haul
    /// reaches it, not now.
    pub fn enqueue(&mut self, item: ItemId) {
        if !self.state.target_queue.contains(&item) {
            self.state.target_queue.push_back(item);
        }
    }

    pub fn cancel(&mut self) {
        self.driver.end(TaskEnd::cancelled());
    }

    #[inline]
    pub fn current_step(&self) -> Option<HaulStep> {
        self.driver.current()
    }

    #[inline]
    pub fn state(&self) -> &HaulState {
        &self.state
    }

    #[inline]
    pub fn carrier(&self) -> CarrierRef {
        self.state.carrier
    }
}

// ── Steps ─────────────────────────────────────────────────────────────────────

impl HaulState {
    fn run(&mut self, step: HaulStep, ctx: &mut JobContext<'_>) -> Outcome {
        match step {
            HaulStep::GotoCarrier => self.goto_carrier(ctx),
            HaulStep::MountCarrier => self.mount_carrier(ctx),
            HaulStep::ExtractTarget => self.extract_target(ctx),
            HaulStep::GotoTarget => self.goto_target(ctx),
            HaulStep::Collect => self.collect(ctx),
            HaulStep::CheckDuplicates => self.check_duplicates(ctx),
            HaulStep::JumpIfTargetsQueued => self.jump_if_targets_queued(ctx),
            HaulStep::CheckNeedStorageCell => self.check_need_storage_cell(ctx),
            HaulStep::GotoCell => self.goto_cell(ctx),
            HaulStep::DropInCell => self.drop_in_cell(ctx),
        }
    }

    fn carrier_check(&self, ctx: &JobContext<'_>) -> CarrierCheck {
        match self.carrier {
            CarrierRef::Vehicle(id) if !ctx.vehicles.is_spawned(id) => CarrierCheck::Lost,
            CarrierRef::Vehicle(id) if !ctx.is_driving(id) => CarrierCheck::Dismounted,
            CarrierRef::Vehicle(id) if !ctx.reservations.holds(ctx.agent, Target::Vehicle(id)) => {
                CarrierCheck::ClaimLost
            }
            CarrierRef::Vehicle(_) => CarrierCheck::Ready,
            CarrierRef::Worn if ctx.agents.worn(ctx.agent).is_some() => CarrierCheck::Ready,
            CarrierRef::Worn => CarrierCheck::Lost,
        }
    }

    /// Guard for the unloading steps.  A carrier lost at this point ends
    /// the haul as incompletable.
    fn require_carrier(&self, ctx: &JobContext<'_>) -> Result<(), TaskEnd> {
        match self.carrier_check(ctx) {
            CarrierCheck::Ready => Ok(()),
            CarrierCheck::Lost => Err(TaskEnd::incompletable("carrier lost")),
            CarrierCheck::Dismounted => Err(TaskEnd::incompletable("dismounted")),
            CarrierCheck::ClaimLost => Err(TaskEnd::incompletable("carrier claim lost")),
        }
    }

    /// Guard for the collecting steps.  Collecting with nothing to load
    /// into cannot be fixed by retrying.
    fn require_carrier_to_load(&self, ctx: &JobContext<'_>) -> Result<(), TaskEnd> {
        match self.carrier_check(ctx) {
            CarrierCheck::Ready => Ok(()),
            CarrierCheck::Lost => {
                error!(agent = %ctx.agent, carrier = ?self.carrier, "no carrier to load into");
                Err(TaskEnd::errored("no carrier"))
            }
            CarrierCheck::Dismounted => Err(TaskEnd::incompletable("dismounted")),
            CarrierCheck::ClaimLost => {
                debug!(agent = %ctx.agent, carrier = ?self.carrier, "carrier claim lost");
                Err(TaskEnd::incompletable("carrier claim lost"))
            }
        }
    }

    /// Forget `item` and let go of its reservation.
    fn drop_target(&mut self, item: ItemId, ctx: &mut JobContext<'_>) {
        ctx.reservations.release(ctx.agent, Target::Item(item));
        if self.active == Some(item) {
            self.active = None;
        }
    }

    /// Where to go once there is nothing left to pick up.
    fn after_targets(&self, ctx: &mut JobContext<'_>) -> Outcome {
        let carrying = resolve_carrier(self.carrier, ctx.agent, ctx.agents, ctx.vehicles)
            .is_some_and(|c| !c.is_empty());
        if carrying {
            StepOutcome::JumpTo(HaulStep::CheckNeedStorageCell)
        } else {
            StepOutcome::End(TaskEnd::incompletable("nothing left to haul"))
        }
    }

    fn goto_carrier(&mut self, ctx: &mut JobContext<'_>) -> Outcome {
        let Some(id) = self.carrier.vehicle() else {
            return StepOutcome::Next;
        };
        let Some(vehicle) = ctx.vehicles.get(id) else {
            return StepOutcome::End(TaskEnd::incompletable("carrier lost"));
        };
        let (driver, cell) = (vehicle.driver(), vehicle.cell());
        if let Err(conflict) = ctx.reservations.reserve(ctx.agent, Target::Vehicle(id)) {
            debug!(agent = %ctx.agent, %conflict, "carrier claimed");
            return StepOutcome::End(TaskEnd::incompletable("carrier claimed"));
        }
        if driver == Some(ctx.agent) {
            return StepOutcome::JumpTo(HaulStep::ExtractTarget);
        }
        match ctx.travel_to(TravelGoal::touch(cell)) {
            TravelStatus::Arrived => StepOutcome::Next,
            TravelStatus::Traveling => StepOutcome::Wait,
            TravelStatus::Unreachable => StepOutcome::End(TaskEnd::incompletable("carrier unreachable")),
        }
    }

    fn mount_carrier(&mut self, ctx: &mut JobContext<'_>) -> Outcome {
        let Some(id) = self.carrier.vehicle() else {
            return StepOutcome::Next;
        };
        match ctx.vehicles.mount(id, ctx.agent, ctx.agents, ctx.now, &ctx.tuning.mount) {
            Ok(()) => StepOutcome::Next,
            Err(rejection) => {
                debug!(agent = %ctx.agent, vehicle = %id, %rejection, "mount refused");
                StepOutcome::End(TaskEnd::incompletable("mount refused"))
            }
        }
    }

    fn extract_target(&mut self, ctx: &mut JobContext<'_>) -> Outcome {
        if let Err(end) = self.require_carrier_to_load(ctx) {
            return StepOutcome::End(end);
        }
        if let Some(next) = self.target_queue.pop_front() {
            self.active = Some(next);
        }
        let Some(item) = self.active else {
            return self.after_targets(ctx);
        };
        let claimed = ctx.ground.contains(item)
            && ctx.reservations.reserve(ctx.agent, Target::Item(item)).is_ok();
        if claimed {
            return StepOutcome::Next;
        }
        debug!(agent = %ctx.agent, %item, "haul target unavailable, skipping");
        self.drop_target(item, ctx);
        if self.target_queue.is_empty() {
            self.after_targets(ctx)
        } else {
            StepOutcome::JumpTo(HaulStep::ExtractTarget)
        }
    }

    fn goto_target(&mut self, ctx: &mut JobContext<'_>) -> Outcome {
        if let Err(end) = self.require_carrier_to_load(ctx) {
            return StepOutcome::End(end);
        }
        let Some(item) = self.active else {
            return StepOutcome::JumpTo(HaulStep::ExtractTarget);
        };
        // A forced release by someone else invalidates the walk.
        let held = ctx.reservations.holds(ctx.agent, Target::Item(item));
        let Some(cell) = ctx.ground.cell_of(item).filter(|_| held) else {
            debug!(agent = %ctx.agent, %item, "haul target gone or claim lost");
            self.drop_target(item, ctx);
            return StepOutcome::JumpTo(HaulStep::ExtractTarget);
        };
        match ctx.travel_to(TravelGoal::touch(cell)) {
            TravelStatus::Arrived => StepOutcome::Next,
            TravelStatus::Traveling => StepOutcome::Wait,
            TravelStatus::Unreachable => {
                self.drop_target(item, ctx);
                StepOutcome::JumpTo(HaulStep::ExtractTarget)
            }
        }
    }

    fn collect(&mut self, ctx: &mut JobContext<'_>) -> Outcome {
        let Some(item) = self.active else {
            return StepOutcome::JumpTo(HaulStep::ExtractTarget);
        };
        if let Err(end) = self.require_carrier_to_load(ctx) {
            return StepOutcome::End(end);
        }
        let at = ctx.position();
        let Some(cell) = ctx.ground.cell_of(item) else {
            self.drop_target(item, ctx);
            return StepOutcome::JumpTo(HaulStep::ExtractTarget);
        };
        if !at.is_adjacent_or_inside(cell) {
            return StepOutcome::JumpTo(HaulStep::GotoTarget);
        }
        let Some(carrier) = resolve_carrier(self.carrier, ctx.agent, ctx.agents, ctx.vehicles) else {
            return StepOutcome::End(TaskEnd::errored("no carrier"));
        };

        match absorb(ctx.ground, ctx.map, carrier, item) {
            Absorb::Loaded => {
                debug!(agent = %ctx.agent, %item, "loaded");
                self.active = None;
                self.last_loaded = Some(item);
            }
            Absorb::Missing => {
                self.drop_target(item, ctx);
                return StepOutcome::JumpTo(HaulStep::ExtractTarget);
            }
            Absorb::Rejected(reason) => {
                debug!(agent = %ctx.agent, %item, %reason, "load rejected");
                if carrier.is_empty() {
                    // Never fits this carrier.
                    self.drop_target(item, ctx);
                    return if self.target_queue.is_empty() {
                        self.after_targets(ctx)
                    } else {
                        StepOutcome::JumpTo(HaulStep::ExtractTarget)
                    };
                }
                // Unload first, then come back for it.
                self.active = None;
                self.target_queue.push_front(item);
                return StepOutcome::JumpTo(HaulStep::CheckNeedStorageCell);
            }
        }

        // Queued stacks within reach come along in the same step.
        let mut i = 0;
        while i < self.target_queue.len() {
            let queued = self.target_queue[i];
            let near = ctx.ground.cell_of(queued).is_some_and(|c| at.is_adjacent_or_inside(c));
            if near && ctx.reservations.holds(ctx.agent, Target::Item(queued)) {
                match absorb(ctx.ground, ctx.map, carrier, queued) {
                    Absorb::Loaded => {
                        debug!(agent = %ctx.agent, item = %queued, "loaded adjacent");
                        self.target_queue.remove(i);
                        self.last_loaded = Some(queued);
                        continue;
                    }
                    Absorb::Rejected(_) => break,
                    Absorb::Missing => {}
                }
            }
            i += 1;
        }
        StepOutcome::Next
    }

    fn check_duplicates(&mut self, ctx: &mut JobContext<'_>) -> Outcome {
        let Some(loaded) = self.last_loaded else {
            return StepOutcome::Next;
        };
        if let Err(end) = self.require_carrier_to_load(ctx) {
            return StepOutcome::End(end);
        }
        let from = ctx.position();
        let agent = ctx.agent;
        let Some(carrier) = resolve_carrier(self.carrier, agent, ctx.agents, ctx.vehicles) else {
            return StepOutcome::End(TaskEnd::errored("no carrier"));
        };
        let Some(def) = carrier
            .carried()
            .iter()
            .find(|s| s.id == loaded)
            .filter(|s| s.is_stackable())
            .map(|s| s.def)
        else {
            return StepOutcome::Next;
        };

        // The next queued stack is the same type: go for it now.
        if let Some(&head) = self.target_queue.front() {
            if ctx.ground.get(head).is_some_and(|g| g.stack.def == def) {
                self.target_queue.pop_front();
                if ctx.reservations.reserve(agent, Target::Item(head)).is_ok() {
                    debug!(%agent, item = %head, "merging queued duplicate");
                    self.active = Some(head);
                    return StepOutcome::JumpTo(HaulStep::GotoTarget);
                }
            }
        }

        let in_flight_slots = self.target_queue.len();
        let in_flight_stack: u32 = self
            .target_queue
            .iter()
            .filter_map(|&q| ctx.ground.get(q))
            .map(|g| g.stack.count)
            .sum();
        if carrier.is_full_with(in_flight_slots, in_flight_stack) {
            return StepOutcome::Next;
        }

        let queue = &self.target_queue;
        let reservations = &*ctx.reservations;
        let storage = ctx.storage;
        let travel = &*ctx.travel;
        let map = ctx.map;
        let found = ctx.ground.nearest_of_def(from, ctx.tuning.haul.duplicate_search_radius, def, |g| {
            !g.burning
                && !queue.contains(&g.stack.id)
                && !storage.is_stored(g.cell, &g.stack)
                && reservations.can_reserve(agent, Target::Item(g.stack.id))
                && travel.can_reach(map, from, TravelGoal::touch(g.cell))
        });
        match found {
            // Claimed now, collected next.
            Some(dup) if ctx.reservations.reserve(agent, Target::Item(dup)).is_ok() => {
                debug!(%agent, item = %dup, "merging nearby duplicate");
                self.target_queue.push_front(dup);
                StepOutcome::JumpTo(HaulStep::ExtractTarget)
            }
            _ => StepOutcome::Next,
        }
    }

    fn jump_if_targets_queued(&mut self, ctx: &mut JobContext<'_>) -> Outcome {
        if self.target_queue.is_empty() {
            return StepOutcome::Next;
        }
        // A full carrier unloads first; the rest is picked up next trip.
        let full = resolve_carrier(self.carrier, ctx.agent, ctx.agents, ctx.vehicles)
            .is_none_or(|c| c.is_full_with(0, 0));
        if full {
            StepOutcome::Next
        } else {
            StepOutcome::JumpTo(HaulStep::ExtractTarget)
        }
    }

    fn check_need_storage_cell(&mut self, ctx: &mut JobContext<'_>) -> Outcome {
        if let Err(end) = self.require_carrier(ctx) {
            return StepOutcome::End(end);
        }
        let first = resolve_carrier(self.carrier, ctx.agent, ctx.agents, ctx.vehicles)
            .and_then(|c| c.first_carried().cloned());
        let Some(first) = first else {
            return if self.target_queue.is_empty() {
                StepOutcome::End(TaskEnd::succeeded())
            } else {
                StepOutcome::JumpTo(HaulStep::ExtractTarget)
            };
        };
        if let Some(cell) = self.store_cell {
            if ctx.reservations.holds(ctx.agent, Target::Cell(cell)) {
                return StepOutcome::JumpTo(HaulStep::GotoCell);
            }
            self.store_cell = None;
        }
        if ctx.now < self.retry_at {
            return StepOutcome::Wait;
        }
        match find_storage_cell(ctx, &first, &mut self.cell_queue) {
            Some(cell) if ctx.reservations.reserve(ctx.agent, Target::Cell(cell)).is_ok() => {
                debug!(agent = %ctx.agent, %cell, item = %first.id, "store cell found");
                self.store_cell = Some(cell);
                StepOutcome::JumpTo(HaulStep::GotoCell)
            }
            _ => {
                debug!(agent = %ctx.agent, item = %first.id, "no store cell, waiting");
                self.retry_at = ctx.now + ctx.tuning.haul.store_cell_retry_ticks;
                StepOutcome::Wait
            }
        }
    }

    fn goto_cell(&mut self, ctx: &mut JobContext<'_>) -> Outcome {
        if let Err(end) = self.require_carrier(ctx) {
            return StepOutcome::End(end);
        }
        let Some(cell) = self.store_cell else {
            return StepOutcome::JumpTo(HaulStep::CheckNeedStorageCell);
        };
        if !ctx.reservations.holds(ctx.agent, Target::Cell(cell)) {
            self.store_cell = None;
            return StepOutcome::JumpTo(HaulStep::CheckNeedStorageCell);
        }
        match ctx.travel_to(TravelGoal::touch(cell)) {
            TravelStatus::Arrived => StepOutcome::Next,
            TravelStatus::Traveling => StepOutcome::Wait,
            TravelStatus::Unreachable => {
                ctx.reservations.release(ctx.agent, Target::Cell(cell));
                self.store_cell = None;
                StepOutcome::End(TaskEnd::incompletable("store cell unreachable"))
            }
        }
    }

    fn drop_in_cell(&mut self, ctx: &mut JobContext<'_>) -> Outcome {
        if let Err(end) = self.require_carrier(ctx) {
            return StepOutcome::End(end);
        }
        let Some(dest) = self.store_cell.take() else {
            return StepOutcome::JumpTo(HaulStep::CheckNeedStorageCell);
        };
        let agent = ctx.agent;
        ctx.reservations.release(agent, Target::Cell(dest));
        let Some(carrier) = resolve_carrier(self.carrier, agent, ctx.agents, ctx.vehicles) else {
            return StepOutcome::End(TaskEnd::incompletable("carrier lost"));
        };
        let mut unloader = Unloader {
            agent,
            ground: ctx.ground,
            map: ctx.map,
            reservations: ctx.reservations,
            carrier,
        };

        if let Some(first) = unloader.carrier.first_carried().cloned() {
            if ctx.storage.accepts(dest, &first) {
                unloader.drop(first.id, dest);
            }
        }

        // Queued destinations next to this one.
        let mut i = 0;
        while i < self.cell_queue.len() && !unloader.carrier.is_empty() {
            let cell = self.cell_queue[i];
            if cell.is_adjacent_8way(dest) && unloader.cell_open(cell) {
                let fits = unloader
                    .carrier
                    .carried()
                    .iter()
                    .find(|s| ctx.storage.accepts(cell, s))
                    .map(|s| s.id);
                if let Some(id) = fits {
                    if unloader.drop(id, cell) {
                        self.cell_queue.remove(i);
                        continue;
                    }
                }
            }
            i += 1;
        }

        // Any other storage cell next to this one that takes the next stack.
        for cell in dest.neighbors8() {
            let Some(first) = unloader.carrier.first_carried().cloned() else {
                break;
            };
            if unloader.cell_open(cell) && ctx.storage.accepts(cell, &first) {
                unloader.drop(first.id, cell);
            }
        }

        if !unloader.carrier.is_empty() {
            StepOutcome::JumpTo(HaulStep::CheckNeedStorageCell)
        } else if !self.target_queue.is_empty() {
            StepOutcome::JumpTo(HaulStep::ExtractTarget)
        } else {
            StepOutcome::Next
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Lift `item` off the ground into `carrier`.  A rejected stack goes back
/// where it was, flags intact.  Designations do not follow an item into a
/// carrier.
fn absorb(
    ground: &mut GroundItems,
    map: &GridMap,
    carrier: &mut dyn CarrierCapacity,
    item: ItemId,
) -> Absorb {
    let Some(on_ground) = ground.get(item) else {
        return Absorb::Missing;
    };
    let (cell, designated, burning) = (on_ground.cell, on_ground.designated, on_ground.burning);
    let Some(stack) = ground.take(item) else {
        return Absorb::Missing;
    };
    match carrier.try_add(stack) {
        Ok(()) => Absorb::Loaded,
        Err(RejectedLoad { item: stack, reason }) => {
            let restored = ground.place(map, stack, cell);
            debug_assert!(restored.is_ok(), "cell was vacated by this load");
            let _ = ground.set_designated(item, designated);
            let _ = ground.set_burning(item, burning);
            Absorb::Rejected(reason)
        }
    }
}

/// Carrier-to-ground transfers for one unload step.
struct Unloader<'u> {
    agent: AgentId,
    ground: &'u mut GroundItems,
    map: &'u GridMap,
    reservations: &'u mut ReservationManager,
    carrier: &'u mut dyn CarrierCapacity,
}

impl Unloader<'_> {
    /// Empty, passable, and not claimed by anyone else.
    fn cell_open(&self, cell: Cell) -> bool {
        self.map.is_passable(cell)
            && self.ground.is_free(cell)
            && self.reservations.can_reserve(self.agent, Target::Cell(cell))
    }

    fn drop(&mut self, item: ItemId, cell: Cell) -> bool {
        if !self.map.is_passable(cell) || !self.ground.is_free(cell) {
            return false;
        }
        let Ok(stack) = self.carrier.try_drop(item) else {
            return false;
        };
        let placed = self.ground.place(self.map, stack, cell);
        debug_assert!(placed.is_ok(), "cell was checked free and passable");
        self.reservations.release(self.agent, Target::Item(item));
        debug!(agent = %self.agent, %item, %cell, "unloaded");
        placed.is_ok()
    }
}
