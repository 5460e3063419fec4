//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface through [`EventLogObserver::take_error`](crate::EventLogObserver::take_error)
/// when the writer is driven by the observer.
pub trait OutputWriter {
    /// Write one tick's events, in the order they happened.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
