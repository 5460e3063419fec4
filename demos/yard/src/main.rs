//! yard: a small hauling yard on the hw-* crates.
//!
//! Porters carry scattered stacks into the warehouse in their backpacks;
//! drivers do the same with carts and trucks, then drive any stray vehicle
//! back to the parking lot.  Every narrative event is written to
//! `events.csv` (or `output.db` with `--features sqlite`).
//!
//! ```text
//! cargo run -p yard -- [config.json]
//! RUST_LOG=hw_vehicle=debug,info cargo run -p yard
//! ```

mod config;
mod yard;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use hw_core::Tick;
use hw_output::{EventLogObserver, OutputWriter};
use hw_sim::{
    DesignationDispatcher, ReturnVehicleDispatcher, SimBuilder, SimEvent, SimObserver, TickStats,
    WorldSummary,
};
use hw_spatial::DijkstraRouter;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::YardConfig;

// ── Observer wrapper to count outcomes ───────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:     EventLogObserver<W>,
    succeeded: usize,
    failed:    usize,
    forced:    usize,
    last:      Option<WorldSummary>,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: EventLogObserver<W>) -> Self {
        Self { inner, succeeded: 0, failed: 0, forced: 0, last: None }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_event(&mut self, tick: Tick, event: &SimEvent) {
        match event {
            SimEvent::TaskEnded { end, .. } if end.is_success() => self.succeeded += 1,
            SimEvent::TaskEnded { .. } => self.failed += 1,
            SimEvent::Vehicle(e) if e.kind() == "forced_dismount" => self.forced += 1,
            _ => {}
        }
        self.inner.on_event(tick, event);
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.inner.on_tick_end(tick, stats);
    }

    fn on_summary(&mut self, summary: &WorldSummary) {
        info!(
            tick = %summary.tick,
            jobs = summary.active_jobs,
            driving = summary.driving,
            on_ground = summary.ground_items,
            stored = summary.stored_items,
            "summary"
        );
        self.last = Some(*summary);
        self.inner.on_summary(summary);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

#[cfg(not(feature = "sqlite"))]
fn writer(dir: &std::path::Path) -> Result<hw_output::CsvWriter> {
    Ok(hw_output::CsvWriter::new(dir)?)
}

#[cfg(feature = "sqlite")]
fn writer(dir: &std::path::Path) -> Result<hw_output::SqliteWriter> {
    Ok(hw_output::SqliteWriter::new(dir)?)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = YardConfig::load(path.as_deref())?;
    info!(
        ticks = cfg.sim.total_ticks,
        seed = cfg.sim.seed,
        porters = cfg.porters,
        drivers = cfg.drivers,
        items = cfg.items,
        "configuration loaded"
    );

    // 1. World.
    let map = yard::map();
    let ground = yard::scatter(&cfg, &map);
    let dispatcher = (DesignationDispatcher::new(cfg.batch), ReturnVehicleDispatcher::new());
    let mut builder = SimBuilder::new(cfg.sim.clone(), yard::agents(&cfg), map, dispatcher, DijkstraRouter)
        .tuning(cfg.tuning.clone())
        .zones(yard::zones())
        .ground(ground);
    for (spec, cell) in yard::vehicles(&cfg) {
        builder = builder.vehicle(spec, cell);
    }
    let mut sim = builder.build()?;

    // 2. Output.
    let mut obs = CountingObserver::new(EventLogObserver::new(writer(&cfg.output_dir)?));

    // 3. Run.
    let t0 = Instant::now();
    sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    let end = sim.summary();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  tasks succeeded  : {}", obs.succeeded);
    println!("  tasks failed     : {}", obs.failed);
    println!("  forced dismounts : {}", obs.forced);
    println!("  stacks stored    : {} of {}", end.stored_items, end.ground_items);
    println!("  events written   : {}", obs.inner.events_written());
    if let Some(last) = obs.last {
        println!("  last summary at  : {}", last.tick);
    }
    println!("  output           : {}", cfg.output_dir.display());
    println!();

    println!("{:<8} {:<10} {:<10} {:<8}", "Vehicle", "Cell", "Parked", "Fuel");
    println!("{}", "-".repeat(40));
    for v in sim.vehicles.iter() {
        let fuel = v.fuel.as_ref().map_or("-".to_owned(), |t| format!("{:.0}%", t.fraction() * 100.0));
        println!(
            "{:<8} {:<10} {:<10} {:<8}",
            v.id.to_string(),
            v.cell().to_string(),
            if sim.map.is_parking(v.cell()) { "yes" } else { "no" },
            fuel
        );
    }

    Ok(())
}
