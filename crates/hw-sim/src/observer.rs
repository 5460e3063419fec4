//! Simulation observer trait for reporting and data collection.

use hw_core::Tick;

use crate::{SimEvent, TickStats, WorldSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: task log
///
/// ```rust,ignore
/// struct TaskLog(Vec<String>);
///
/// impl SimObserver for TaskLog {
///     fn on_event(&mut self, tick: Tick, event: &SimEvent) {
///         if let SimEvent::TaskEnded { agent, end, .. } = event {
///             self.0.push(format!("{tick} {agent}: {end}"));
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per event, in the order the events happened, after the
    /// tick's phases have run.
    fn on_event(&mut self, _tick: Tick, _event: &SimEvent) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called every `config.summary_interval_ticks` ticks.
    fn on_summary(&mut self, _summary: &WorldSummary) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
