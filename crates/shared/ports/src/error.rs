use bunkatsu_core::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from resolving an exchange rate out of a rate table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateError {
    #[error("Rate unavailable for {currency}")]
    Unavailable { currency: Currency },

    #[error("Metal spot price unavailable")]
    MetalSpotUnavailable,

    #[error("Unsupported quote currency for {instrument}")]
    UnsupportedQuote { instrument: String },
}

pub type RateResult<T> = std::result::Result<T, RateError>;

/// Errors from building an allocation plan
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("Degenerate allocation: total loss at stop is zero, cannot size lots for max loss {max_loss}")]
    DegenerateAllocation { max_loss: Decimal },

    #[error(transparent)]
    RateUnavailable(#[from] RateError),
}

impl AllocationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AllocationError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

pub type AllocationResult<T> = std::result::Result<T, AllocationError>;

/// Errors from the external rate feed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Rate feed {feed} timed out after {timeout_ms}ms")]
    Timeout { feed: String, timeout_ms: u64 },

    #[error("Rate feed {feed} unavailable: {reason}")]
    Unavailable { feed: String, reason: String },

    #[error("Malformed rate snapshot: {0}")]
    Malformed(String),
}

pub type FeedResult<T> = std::result::Result<T, FeedError>;
