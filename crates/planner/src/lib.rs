//! Bunkatsu Planner
//!
//! Application layer around the allocator:
//!
//! ```text
//! PlanRequest (JSON) ──► Planner::plan ──► PlanReport
//!                            ▲
//!   RateSource ──► RateFetcher ──► RateCache / SessionRates ──► RateSnapshot
//! ```
//!
//! Requests and settings are loaded from JSON files. Rates come from a
//! [`RateSource`](bunkatsu_ports::RateSource) behind a timeout, are cached
//! per session, and fall back to a configured table flagged as degraded.

pub mod cache;
pub mod config;
pub mod error;
pub mod planner;
pub mod report;
pub mod request;
pub mod session;
pub mod sources;

pub use cache::{RateCache, RateFetcher, RateOrigin, RateSnapshot};
pub use config::PlannerConfig;
pub use error::{ConfigError, PlannerError, PlannerResult};
pub use planner::Planner;
pub use report::PlanReport;
pub use request::{EntryMode, PlanRequest};
pub use session::{SessionId, SessionRates};
pub use sources::{FileRateSource, StaticRateSource};
