//! `EventLogObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use hw_core::Tick;
use hw_sim::{SimEvent, SimObserver, TickStats, WorldSummary};

use crate::row::{EventRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every event and every world summary to an
/// [`OutputWriter`] backend.
///
/// Events are buffered for the tick and written as one batch at tick end.
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct EventLogObserver<W: OutputWriter> {
    writer:     W,
    buffered:   Vec<EventRow>,
    written:    u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> EventLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, buffered: Vec::new(), written: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Event rows handed to the writer so far.
    pub fn events_written(&self) -> u64 {
        self.written
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for EventLogObserver<W> {
    fn on_event(&mut self, tick: Tick, event: &SimEvent) {
        self.buffered.push(EventRow::from_event(tick, event));
    }

    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {
        if self.buffered.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.buffered);
        let result = self.writer.write_events(&rows);
        if result.is_ok() {
            self.written += rows.len() as u64;
        }
        self.store_err(result);
    }

    fn on_summary(&mut self, summary: &WorldSummary) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
