//! What an agent is currently doing.
//!
//! The mount state machine only needs to know the *kind* of the driver's
//! current activity (to decide whether it is incompatible with driving), so
//! the kind is a plain `Copy` enum kept on the agent.  The job state itself
//! lives with whichever crate runs it.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JobKind {
    // Jobs run by this core.
    Haul,
    Park,
    Goto,
    Wait,

    // Activities driven by the host.  The ones listed in
    // `MountTuning::incompatible_jobs` force a dismount under a roof.
    DoBill,
    EnterCryptosleepCasket,
    LayDown,
    Lovin,
    MarryAdjacentPawn,
    Mate,
    PrisonerAttemptRecruit,
    Research,
    SocialRelax,
    SpectateCeremony,
    StandAndBeSociallyActive,
    TakeToBedToOperate,
    TendPatient,
    UseCommsConsole,
    UseNeurotrainer,
    VisitSickPawn,
    Shear,
    Ingest,
    Refuel,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Haul => "Haul",
            JobKind::Park => "Park",
            JobKind::Goto => "Goto",
            JobKind::Wait => "Wait",
            JobKind::DoBill => "DoBill",
            JobKind::EnterCryptosleepCasket => "EnterCryptosleepCasket",
            JobKind::LayDown => "LayDown",
            JobKind::Lovin => "Lovin",
            JobKind::MarryAdjacentPawn => "MarryAdjacentPawn",
            JobKind::Mate => "Mate",
            JobKind::PrisonerAttemptRecruit => "PrisonerAttemptRecruit",
            JobKind::Research => "Research",
            JobKind::SocialRelax => "SocialRelax",
            JobKind::SpectateCeremony => "SpectateCeremony",
            JobKind::StandAndBeSociallyActive => "StandAndBeSociallyActive",
            JobKind::TakeToBedToOperate => "TakeToBedToOperate",
            JobKind::TendPatient => "TendPatient",
            JobKind::UseCommsConsole => "UseCommsConsole",
            JobKind::UseNeurotrainer => "UseNeurotrainer",
            JobKind::VisitSickPawn => "VisitSickPawn",
            JobKind::Shear => "Shear",
            JobKind::Ingest => "Ingest",
            JobKind::Refuel => "Refuel",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
