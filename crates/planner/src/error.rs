use bunkatsu_core::InstrumentError;
use bunkatsu_ports::{AllocationError, FeedError, RateError};
use thiserror::Error;

use crate::session::SessionId;

/// Errors loading JSON configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown rate session {0}")]
    UnknownSession(SessionId),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type PlannerResult<T> = std::result::Result<T, PlannerError>;

impl From<InstrumentError> for PlannerError {
    fn from(err: InstrumentError) -> Self {
        PlannerError::InvalidRequest(err.to_string())
    }
}

impl From<RateError> for PlannerError {
    fn from(err: RateError) -> Self {
        PlannerError::Allocation(AllocationError::RateUnavailable(err))
    }
}
