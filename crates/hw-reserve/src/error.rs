use hw_core::{AgentId, Target};
use thiserror::Error;

/// `reserve` refused because someone else already holds the target.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{target} is already reserved by {holder}")]
pub struct ReservationConflict {
    pub target: Target,
    pub holder: AgentId,
}
