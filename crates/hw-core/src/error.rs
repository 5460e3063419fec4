//! Base error type.
//!
//! Sub-crates define their own error enums; the ones that look agents or
//! vehicles up by id wrap `CoreError` as a `#[from]` variant.

use thiserror::Error;

use crate::{AgentId, ItemId, VehicleId};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `hw-core`.
pub type CoreResult<T> = Result<T, CoreError>;
