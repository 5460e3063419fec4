//! Run configuration, read from an optional JSON file.
//!
//! Every field has a default, so `{}` and a missing file both give the stock
//! yard.  Example:
//!
//! ```json
//! { "sim": { "total_ticks": 5000, "seed": 9 },
//!   "tuning": { "vehicle": { "penalty_speed": 0.5 } },
//!   "porters": 2, "drivers": 3 }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hw_core::{SimConfig, Tuning};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct YardConfig {
    pub sim:         SimConfig,
    pub tuning:      Tuning,
    /// Agents hauling in their own backpack.
    pub porters:     usize,
    /// Agents with no backpack; they haul with carts and trucks.
    pub drivers:     usize,
    pub carts:       usize,
    pub trucks:      usize,
    /// Designated stacks scattered over the yard at start.
    pub items:       usize,
    /// Items hauled per order.
    pub batch:       usize,
    pub output_dir:  PathBuf,
}

impl Default for YardConfig {
    fn default() -> Self {
        YardConfig {
            sim:        SimConfig { total_ticks: 3_000, seed: 42, summary_interval_ticks: 250 },
            tuning:     Tuning::default(),
            porters:    2,
            drivers:    2,
            carts:      2,
            trucks:     1,
            items:      24,
            batch:      3,
            output_dir: PathBuf::from("output/yard"),
        }
    }
}

impl YardConfig {
    /// Read `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(YardConfig::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
