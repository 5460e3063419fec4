//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `events.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, TickSummaryRow};

pub const EVENT_HEADER: [&str; 5] = ["tick", "kind", "agent", "vehicle", "detail"];

pub const SUMMARY_HEADER: [&str; 9] = [
    "tick",
    "active_jobs",
    "vehicles",
    "driving",
    "ground_items",
    "stored_items",
    "carried_stacks",
    "reservations",
    "contamination",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(EVENT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { events, summaries, finished: false })
    }
}

/// Empty cell for "no id".
fn id_field(id: Option<u32>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.kind.to_owned(),
                id_field(row.agent),
                id_field(row.vehicle),
                row.detail.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.active_jobs.to_string(),
            row.vehicles.to_string(),
            row.driving.to_string(),
            row.ground_items.to_string(),
            row.stored_items.to_string(),
            row.carried_stacks.to_string(),
            row.reservations.to_string(),
            row.contamination.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
