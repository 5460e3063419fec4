//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `events` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS events (
                 tick    INTEGER NOT NULL,
                 kind    TEXT    NOT NULL,
                 agent   INTEGER,
                 vehicle INTEGER,
                 detail  TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick           INTEGER PRIMARY KEY,
                 active_jobs    INTEGER NOT NULL,
                 vehicles       INTEGER NOT NULL,
                 driving        INTEGER NOT NULL,
                 ground_items   INTEGER NOT NULL,
                 stored_items   INTEGER NOT NULL,
                 carried_stacks INTEGER NOT NULL,
                 reservations   INTEGER NOT NULL,
                 contamination  INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO events (tick, kind, agent, vehicle, detail) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.kind,
                    row.agent,
                    row.vehicle,
                    row.detail,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, active_jobs, vehicles, driving, ground_items, stored_items, \
              carried_stacks, reservations, contamination) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.tick as i64,
                row.active_jobs as i64,
                row.vehicles as i64,
                row.driving as i64,
                row.ground_items as i64,
                row.stored_items as i64,
                row.carried_stacks as i64,
                row.reservations as i64,
                row.contamination as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
