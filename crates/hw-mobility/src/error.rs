use hw_core::AgentId;
use hw_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("agent {0} has no movement slot")]
    UnknownAgent(AgentId),

    #[error("routing failed: {0}")]
    Routing(#[from] SpatialError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
