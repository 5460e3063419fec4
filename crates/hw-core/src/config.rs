//! Tuning constants, grouped per subsystem.
//!
//! Every `Default` reproduces the stock behaviour.  With the `serde` feature
//! enabled each group deserializes with `#[serde(default)]`, so a config
//! file only has to name the values it overrides.

use crate::JobKind;

// ── Mount ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MountTuning {
    /// Door open/close bookkeeping runs on ticks that are multiples of this.
    pub door_check_interval: u64,
    /// Ticks after mounting before the first incompatible-activity check.
    pub activity_recheck_initial: u64,
    /// Later rechecks are drawn uniformly from `[min, max]` ticks.
    pub activity_recheck_min: u64,
    pub activity_recheck_max: u64,
    /// The vehicle sits `interaction_offset * offset_scale` behind its driver.
    pub offset_scale: f32,
    /// Activities that force a dismount while the driver is under a roof.
    pub incompatible_jobs: Vec<JobKind>,
}

impl Default for MountTuning {
    fn default() -> Self {
        MountTuning {
            door_check_interval: 96,
            activity_recheck_initial: 60,
            activity_recheck_min: 60,
            activity_recheck_max: 180,
            offset_scale: 1.3,
            incompatible_jobs: vec![
                JobKind::DoBill,
                JobKind::EnterCryptosleepCasket,
                JobKind::LayDown,
                JobKind::Lovin,
                JobKind::MarryAdjacentPawn,
                JobKind::Mate,
                JobKind::PrisonerAttemptRecruit,
                JobKind::Research,
                JobKind::SocialRelax,
                JobKind::SpectateCeremony,
                JobKind::StandAndBeSociallyActive,
                JobKind::TakeToBedToOperate,
                JobKind::TendPatient,
                JobKind::UseCommsConsole,
                JobKind::UseNeurotrainer,
                JobKind::VisitSickPawn,
                JobKind::Shear,
                JobKind::Ingest,
            ],
        }
    }
}

impl MountTuning {
    #[inline]
    pub fn is_incompatible(&self, job: JobKind) -> bool {
        self.incompatible_jobs.contains(&job)
    }
}

// ── Vehicle resource model ───────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VehicleTuning {
    /// Speed multiplier used while broken down or out of fuel.
    pub penalty_speed: f32,
    /// A leaking tank spills on ticks that are multiples of this.
    pub leak_interval: u64,
    /// Fuel lost per spill.
    pub leak_amount: f32,
    /// Non-player drivers get a one-time top-up below this fuel fraction.
    pub ai_refuel_threshold: f32,
    /// Passenger seats on a mounted vehicle.
    pub max_passengers: usize,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        VehicleTuning {
            penalty_speed: 0.75,
            leak_interval: 15,
            leak_amount: 0.15,
            ai_refuel_threshold: 0.55,
            max_passengers: 1,
        }
    }
}

// ── Hauling ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HaulTuning {
    /// Radius, in cells, of the same-type duplicate search.
    pub duplicate_search_radius: i32,
    /// A carrier with no reachable store cell re-searches this often.
    pub store_cell_retry_ticks: u64,
}

impl Default for HaulTuning {
    fn default() -> Self {
        HaulTuning {
            duplicate_search_radius: 30,
            store_cell_retry_ticks: 60,
        }
    }
}

// ── Mobility ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MobilityTuning {
    /// Cells per tick at speed multiplier 1.0.
    pub walk_cells_per_tick: f32,
}

impl Default for MobilityTuning {
    fn default() -> Self {
        MobilityTuning { walk_cells_per_tick: 0.25 }
    }
}

// ── Aggregate ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tuning {
    pub mount: MountTuning,
    pub vehicle: VehicleTuning,
    pub haul: HaulTuning,
    pub mobility: MobilityTuning,
}
