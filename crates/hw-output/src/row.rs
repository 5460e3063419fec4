//! Plain data row types written by output backends.

use hw_core::Tick;
use hw_sim::{SimEvent, WorldSummary};

/// One narrative event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub tick:    u64,
    pub kind:    &'static str,
    /// Raw agent id, if the event concerns one agent.
    pub agent:   Option<u32>,
    pub vehicle: Option<u32>,
    /// Free text: task status and reason, dismount reason, cell, …
    pub detail:  String,
}

impl EventRow {
    pub fn from_event(tick: Tick, event: &SimEvent) -> Self {
        EventRow {
            tick:    tick.0,
            kind:    event.kind(),
            agent:   event.agent().map(|a| a.0),
            vehicle: event.vehicle().map(|v| v.0),
            detail:  event.to_string(),
        }
    }
}

/// Whole-world counts for one summary tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub active_jobs:    u64,
    pub vehicles:       u64,
    pub driving:        u64,
    pub ground_items:   u64,
    pub stored_items:   u64,
    pub carried_stacks: u64,
    pub reservations:   u64,
    pub contamination:  u64,
}

impl From<&WorldSummary> for TickSummaryRow {
    fn from(s: &WorldSummary) -> Self {
        TickSummaryRow {
            tick:           s.tick.0,
            active_jobs:    s.active_jobs as u64,
            vehicles:       s.vehicles as u64,
            driving:        s.driving as u64,
            ground_items:   s.ground_items as u64,
            stored_items:   s.stored_items as u64,
            carried_stacks: s.carried_stacks as u64,
            reservations:   s.reservations as u64,
            contamination:  s.contamination,
        }
    }
}
