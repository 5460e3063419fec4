//! Unit tests for hw-output.

#[cfg(test)]
mod rows {
    use hw_core::{AgentId, Cell, Tick, VehicleId};
    use hw_sim::{SimEvent, WorldSummary};
    use hw_task::TaskEnd;
    use hw_vehicle::{DismountReason, VehicleEvent};

    use crate::row::{EventRow, TickSummaryRow};

    #[test]
    fn task_end_row_carries_status_and_reason() {
        let event = SimEvent::TaskEnded {
            agent: AgentId(3),
            kind: hw_core::JobKind::Haul,
            end: TaskEnd::incompletable("carrier lost"),
        };
        let row = EventRow::from_event(Tick(12), &event);
        assert_eq!(row.tick, 12);
        assert_eq!(row.kind, "task_ended");
        assert_eq!(row.agent, Some(3));
        assert_eq!(row.vehicle, None);
        assert!(row.detail.contains("carrier lost"), "{}", row.detail);
    }

    #[test]
    fn forced_dismount_row_names_driver_and_vehicle() {
        let event = SimEvent::Vehicle(VehicleEvent::ForcedDismount {
            vehicle: VehicleId(1),
            driver: AgentId(0),
            reason: DismountReason::Forbidden,
        });
        let row = EventRow::from_event(Tick(4), &event);
        assert_eq!(row.kind, "forced_dismount");
        assert_eq!((row.agent, row.vehicle), (Some(0), Some(1)));
        assert_eq!(row.detail, "vehicle forbidden");
    }

    #[test]
    fn arrival_detail_is_the_cell() {
        let event = SimEvent::Arrived { agent: AgentId(2), cell: Cell::new(4, 9) };
        let row = EventRow::from_event(Tick(0), &event);
        assert_eq!(row.detail, Cell::new(4, 9).to_string());
    }

    #[test]
    fn summary_row_from_world_summary() {
        let summary = WorldSummary {
            tick: Tick(50),
            active_jobs: 2,
            vehicles: 3,
            driving: 1,
            ground_items: 9,
            stored_items: 4,
            carried_stacks: 2,
            reservations: 5,
            contamination: 30,
        };
        let row = TickSummaryRow::from(&summary);
        assert_eq!(row.tick, 50);
        assert_eq!(row.driving, 1);
        assert_eq!(row.contamination, 30);
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, EVENT_HEADER, SUMMARY_HEADER};
    use crate::row::{EventRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn event_row(tick: u64, agent: Option<u32>) -> EventRow {
        EventRow { tick, kind: "arrived", agent, vehicle: None, detail: "(1, 2)".into() }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            active_jobs: 1,
            vehicles: 2,
            driving: 1,
            ground_items: 7,
            stored_items: 3,
            carried_stacks: 1,
            reservations: 4,
            contamination: 0,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("events.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("run").join("one");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("events.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, EVENT_HEADER);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, SUMMARY_HEADER);
    }

    #[test]
    fn csv_event_rows_and_empty_ids() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[event_row(5, Some(0)), event_row(5, None)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "5");
        assert_eq!(&rows[0][2], "0");
        assert_eq!(&rows[1][2], ""); // no agent
        assert_eq!(&rows[1][4], "(1, 2)"); // comma survives quoting
    }

    #[test]
    fn csv_tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][4], "7"); // ground_items
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use hw_agent::{AgentSpec, AgentStoreBuilder};
    use hw_core::{AgentId, Cell, ItemDefId, SimConfig, Tuning};
    use hw_haul::{CarrierRef, HaulOrder, JobOrder};
    use hw_sim::{ScriptedDispatcher, SimBuilder, SimObserver, TickStats};
    use hw_spatial::{DijkstraRouter, GridMap, StorageFilter, StorageZones};
    use hw_storage::CapacityContainer;

    use crate::{CsvWriter, EventLogObserver, EventRow, OutputError, OutputResult, OutputWriter, TickSummaryRow};

    /// Accepts nothing.
    struct Broken;

    impl OutputWriter for Broken {
        fn write_events(&mut self, _rows: &[EventRow]) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk gone")))
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = EventLogObserver::new(Broken);
        obs.on_summary(&hw_sim::WorldSummary::default());
        obs.on_event(hw_core::Tick(0), &hw_sim::SimEvent::Arrived { agent: AgentId(0), cell: Cell::new(0, 0) });
        obs.on_tick_end(hw_core::Tick(0), &TickStats::default());

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("disk gone"), "{err}");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.events_written(), 0);
    }

    #[test]
    fn integration_csv() {
        let config = SimConfig { total_ticks: 60, seed: 1, summary_interval_ticks: 20 };
        let agents = AgentStoreBuilder::new()
            .agent(AgentSpec::humanlike(Cell::new(2, 2)).worn(CapacityContainer::new(2, 100)))
            .build();
        let map = GridMap::open(20, 20);
        let mut zones = StorageZones::new();
        zones.add_rect(Cell::new(10, 2), Cell::new(11, 3), StorageFilter::Any);

        let mut ground = hw_spatial::GroundItems::new();
        let wood = ground.spawn(&map, Cell::new(5, 2), ItemDefId(1), 10, 75).unwrap();
        let mut script = ScriptedDispatcher::new();
        script.push(AgentId(0), JobOrder::Haul(HaulOrder::new(CarrierRef::Worn, vec![wood])));

        let mut tuning = Tuning::default();
        tuning.mobility.walk_cells_per_tick = 1.0;
        let mut sim = SimBuilder::new(config, agents, map, script, DijkstraRouter)
            .tuning(tuning)
            .zones(zones)
            .ground(ground)
            .build()
            .unwrap();

        let dir = tempfile::tempdir().expect("create temp dir");
        let mut obs = EventLogObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert!(obs.events_written() >= 2);

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let kinds: Vec<String> = rdr.records().map(|r| r.unwrap()[1].to_owned()).collect();
        assert_eq!(kinds.first().map(String::as_str), Some("job_started"));
        assert!(kinds.iter().any(|k| k == "task_ended"));
        assert_eq!(kinds.len() as u64, obs.events_written());

        // summary_interval = 20 → ticks 0, 20, 40
        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 3);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{EventRow, TickSummaryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_event_rows_keep_nulls() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_events(&[
            EventRow { tick: 1, kind: "arrived", agent: Some(0), vehicle: None, detail: "(1, 1)".into() },
            EventRow { tick: 1, kind: "ai_refueled", agent: None, vehicle: Some(2), detail: String::new() },
        ])
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 2);
        let agent: Option<i64> = conn
            .query_row("SELECT agent FROM events WHERE kind = 'ai_refueled'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(agent, None);
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick: 7,
            active_jobs: 2,
            vehicles: 1,
            driving: 1,
            ground_items: 12,
            stored_items: 5,
            carried_stacks: 3,
            reservations: 4,
            contamination: 15,
        })
        .unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (jobs, ground): (i64, i64) = conn
            .query_row(
                "SELECT active_jobs, ground_items FROM tick_summaries WHERE tick = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!((jobs, ground), (2, 12));
    }
}
