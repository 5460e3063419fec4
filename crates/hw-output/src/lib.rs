//! `hw-output`: event and summary writers.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                          |
//! |-----------|-------------|----------------------------------------|
//! | *(none)*  | CSV         | `events.csv`, `tick_summaries.csv`     |
//! | `sqlite`  | SQLite      | `output.db`                            |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`EventLogObserver`], which implements `hw_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hw_output::{CsvWriter, EventLogObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = EventLogObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}") }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EventLogObserver;
pub use row::{EventRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
