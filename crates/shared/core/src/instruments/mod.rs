//! Instrument definitions
//!
//! - Currency pairs (EUR/JPY, GBP/USD) with a 10,000-unit lot
//! - Metals quoted in a currency (gold in USD or JPY), one ounce per lot

mod currency;
mod instrument;

use thiserror::Error;

pub use currency::{Asset, Currency, Metal};
pub use instrument::Instrument;

/// Errors raised while turning a symbol into a typed instrument
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstrumentError {
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("Malformed instrument symbol: {0}")]
    MalformedSymbol(String),

    #[error("Instrument {0} has identical base and quote")]
    SameLegs(String),
}
