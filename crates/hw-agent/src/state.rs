//! Per-agent condition enums.

use std::fmt;

/// What sort of body the agent has.  Decides whether it may drive.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    #[default]
    Humanlike,
    Mechanoid,
    /// `trained` is obedience training; `body_size` is relative to a human.
    Animal { trained: bool, body_size: f32 },
}

/// Minimum body size for an animal to pull a vehicle.
pub const MIN_DRIVER_BODY_SIZE: f32 = 1.0;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vitals {
    #[default]
    Healthy,
    Downed,
    /// In a disabling pain state.
    PainShock,
    Dead,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MentalState {
    #[default]
    None,
    WanderPsychotic,
    Berserk,
    /// Fleeing the map.  Still controlled enough to drive.
    PanicFlee,
}

impl MentalState {
    /// Mental states that take the agent out of anyone's control.
    pub fn is_uncontrolled(self) -> bool {
        matches!(self, MentalState::WanderPsychotic | MentalState::Berserk)
    }
}

/// Why an agent may not be ordered to drive.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Ineligible {
    CannotDrive,
    TooSmall,
    NotTrained,
}

impl fmt::Display for Ineligible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Ineligible::CannotDrive => "not a pawn that can drive",
            Ineligible::TooSmall => "too small animal",
            Ineligible::NotTrained => "not trained animal",
        })
    }
}
