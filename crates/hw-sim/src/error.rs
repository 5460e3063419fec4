use hw_core::{AgentId, CoreError};
use hw_haul::HaulError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("agent {0} already has a job")]
    Busy(AgentId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("job could not start: {0}")]
    Job(#[from] HaulError),
}

pub type SimResult<T> = Result<T, SimError>;
