//! Bunkatsu Ports
//!
//! Port definitions (traits) and error types for Bunkatsu.
//! These define the boundaries between the pure calculation core and the
//! outside world (clocks, rate feeds).

mod clock;
mod error;
mod rates;

pub use clock::Clock;
pub use error::{
    AllocationError, AllocationResult, FeedError, FeedResult, RateError, RateResult,
};
pub use rates::RateSource;
