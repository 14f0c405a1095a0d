//! Bunkatsu Core Domain
//!
//! Pure value types for split-entry position planning.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod instruments;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{AllocationPlan, Direction, RateTable, Tranche, weighted_average};
pub use instruments::{Asset, Currency, Instrument, InstrumentError, Metal};
pub use values::{Lot, Money, Price, Rate, Timestamp};
