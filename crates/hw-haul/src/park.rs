//! Returning a vehicle to the parking area.

use hw_agent::AgentStore;
use hw_core::{AgentId, Cell, Target, VehicleId};
use hw_mobility::{TravelGoal, TravelStatus};
use hw_reserve::ReservationManager;
use hw_task::{StepOutcome, TaskDriver, TaskEnd};
use hw_vehicle::VehicleStore;
use tracing::debug;

use crate::{HaulResult, JobContext};

type Outcome = StepOutcome<ParkStep>;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ParkStep {
    GotoVehicle,
    Mount,
    FindSpot,
    Drive,
    Dismount,
}

const PARK_STEPS: [ParkStep; 5] = [
    ParkStep::GotoVehicle,
    ParkStep::Mount,
    ParkStep::FindSpot,
    ParkStep::Drive,
    ParkStep::Dismount,
];

/// Walk to a vehicle, drive it onto a free parking cell and get out there.
pub struct ParkJob {
    driver: TaskDriver<ParkStep>,
    vehicle: VehicleId,
    spot: Option<Cell>,
}

impl ParkJob {
    /// Hand `vehicle` to `agent`.  Any claim another agent had on it is
    /// overridden.
    pub fn assign(
        agent: AgentId,
        vehicle: VehicleId,
        agents: &AgentStore,
        vehicles: &VehicleStore,
        reservations: &mut ReservationManager,
    ) -> HaulResult<Self> {
        let previous = vehicles.order_mount(vehicle, agent, agents, reservations)?;
        if let Some(previous) = previous {
            debug!(%agent, %vehicle, %previous, "park order overrides earlier claim");
        }
        Ok(ParkJob {
            driver: TaskDriver::new(PARK_STEPS.to_vec()),
            vehicle,
            spot: None,
        })
    }

    pub fn tick(&mut self, ctx: &mut JobContext<'_>) -> Option<TaskEnd> {
        let ParkJob { driver, vehicle, spot } = self;
        let vehicle = *vehicle;
        driver.tick(|step| match step {
            ParkStep::GotoVehicle => goto_vehicle(vehicle, ctx),
            ParkStep::Mount => mount(vehicle, ctx),
            ParkStep::FindSpot => find_spot(vehicle, spot, ctx),
            ParkStep::Drive => drive(vehicle, spot, ctx),
            ParkStep::Dismount => dismount(vehicle, spot, ctx),
        })
    }

    pub fn cancel(&mut self) {
        self.driver.end(TaskEnd::cancelled());
    }

    #[inline]
    pub fn vehicle(&self) -> VehicleId {
        self.vehicle
    }

    #[inline]
    pub fn spot(&self) -> Option<Cell> {
        self.spot
    }

    #[inline]
    pub fn current_step(&self) -> Option<ParkStep> {
        self.driver.current()
    }
}

fn goto_vehicle(vehicle: VehicleId, ctx: &mut JobContext<'_>) -> Outcome {
    let Some(v) = ctx.vehicles.get(vehicle) else {
        return StepOutcome::End(TaskEnd::incompletable("vehicle gone"));
    };
    if !ctx.reservations.holds(ctx.agent, Target::Vehicle(vehicle)) {
        return StepOutcome::End(TaskEnd::incompletable("vehicle claimed"));
    }
    if v.driver() == Some(ctx.agent) {
        return StepOutcome::JumpTo(ParkStep::FindSpot);
    }
    let cell = v.cell();
    match ctx.travel_to(TravelGoal::touch(cell)) {
        TravelStatus::Arrived => StepOutcome::Next,
        TravelStatus::Traveling => StepOutcome::Wait,
        TravelStatus::Unreachable => StepOutcome::End(TaskEnd::incompletable("vehicle unreachable")),
    }
}

fn mount(vehicle: VehicleId, ctx: &mut JobContext<'_>) -> Outcome {
    match ctx.vehicles.mount(vehicle, ctx.agent, ctx.agents, ctx.now, &ctx.tuning.mount) {
        Ok(()) => StepOutcome::Next,
        Err(rejection) => {
            debug!(agent = %ctx.agent, %vehicle, %rejection, "mount refused");
            StepOutcome::End(TaskEnd::incompletable("mount refused"))
        }
    }
}

/// Driving steps stop once the agent is off the seat or someone else has
/// taken the vehicle's claim.
fn lost_control(vehicle: VehicleId, ctx: &JobContext<'_>) -> Option<TaskEnd> {
    if !ctx.is_driving(vehicle) {
        return Some(TaskEnd::incompletable("dismounted"));
    }
    if !ctx.reservations.holds(ctx.agent, Target::Vehicle(vehicle)) {
        debug!(agent = %ctx.agent, %vehicle, "vehicle claim lost");
        return Some(TaskEnd::incompletable("vehicle claim lost"));
    }
    None
}

fn find_spot(vehicle: VehicleId, spot: &mut Option<Cell>, ctx: &mut JobContext<'_>) -> Outcome {
    if let Some(end) = lost_control(vehicle, ctx) {
        return StepOutcome::End(end);
    }
    let from = ctx.position();
    let found = ctx.map.nearest_parking(from, |c| {
        ctx.ground.is_free(c)
            && ctx.reservations.can_reserve(ctx.agent, Target::Cell(c))
            && ctx.vehicles.iter().all(|v| v.id == vehicle || v.cell() != c)
            && ctx.travel.can_reach(ctx.map, from, TravelGoal::on(c))
    });
    match found {
        Some(cell) if ctx.reservations.reserve(ctx.agent, Target::Cell(cell)).is_ok() => {
            debug!(agent = %ctx.agent, %vehicle, %cell, "parking spot chosen");
            *spot = Some(cell);
            StepOutcome::Next
        }
        _ => StepOutcome::End(TaskEnd::incompletable("no free parking spot")),
    }
}

fn drive(vehicle: VehicleId, spot: &mut Option<Cell>, ctx: &mut JobContext<'_>) -> Outcome {
    if let Some(end) = lost_control(vehicle, ctx) {
        return StepOutcome::End(end);
    }
    let Some(cell) = *spot else {
        return StepOutcome::JumpTo(ParkStep::FindSpot);
    };
    if !ctx.reservations.holds(ctx.agent, Target::Cell(cell)) {
        *spot = None;
        return StepOutcome::JumpTo(ParkStep::FindSpot);
    }
    match ctx.travel_to(TravelGoal::on(cell)) {
        TravelStatus::Arrived => StepOutcome::Next,
        TravelStatus::Traveling => StepOutcome::Wait,
        TravelStatus::Unreachable => {
            ctx.reservations.release(ctx.agent, Target::Cell(cell));
            *spot = None;
            StepOutcome::End(TaskEnd::incompletable("parking unreachable"))
        }
    }
}

fn dismount(vehicle: VehicleId, spot: &mut Option<Cell>, ctx: &mut JobContext<'_>) -> Outcome {
    if let Some(end) = lost_control(vehicle, ctx) {
        return StepOutcome::End(end);
    }
    let Some(cell) = spot.take() else {
        return StepOutcome::JumpTo(ParkStep::FindSpot);
    };
    ctx.vehicles.dismount_at(vehicle, cell, ctx.map, ctx.reservations);
    ctx.reservations.release(ctx.agent, Target::Cell(cell));
    debug!(agent = %ctx.agent, %vehicle, %cell, "parked");
    StepOutcome::Next
}
