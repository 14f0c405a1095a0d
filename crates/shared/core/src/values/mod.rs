use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Position size of one tranche, in lots
pub type Lot = Decimal;

/// Monetary amount in a settlement currency
pub type Money = Decimal;

/// Exchange rate: units of quote per one unit of base
pub type Rate = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;
