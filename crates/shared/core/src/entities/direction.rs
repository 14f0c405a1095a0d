use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::Price;

/// Direction of the planned position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Bought, loses when price falls to the stop
    #[serde(alias = "buy")]
    Long,
    /// Sold, loses when price rises to the stop
    #[serde(alias = "sell")]
    Short,
}

impl Direction {
    /// Per-unit adverse move from `entry` to `stop`
    ///
    /// Zero when the stop is not on the losing side of the entry.
    pub fn adverse_excursion(&self, entry: Price, stop: Price) -> Decimal {
        let move_against = match self {
            Direction::Long => entry - stop,
            Direction::Short => stop - entry,
        };
        move_against.max(Decimal::ZERO)
    }
}
