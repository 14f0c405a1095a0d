use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::instruments::Currency;
use crate::values::Rate;

/// Immutable snapshot of exchange rates relative to USD
///
/// `rates[c]` is the number of units of `c` bought by one USD. A zero
/// entry means the rate is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RateTable {
    /// Units of each currency per one USD
    #[serde(default)]
    pub rates: BTreeMap<Currency, Rate>,
    /// USD/JPY, kept apart because most settlement happens in JPY
    pub usd_jpy: Rate,
    /// Metal spot price in USD per ounce
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metal_spot_usd: Option<Rate>,
}

impl RateTable {
    /// Create a table holding only USD/JPY
    pub fn new(usd_jpy: Rate) -> Self {
        Self {
            rates: BTreeMap::new(),
            usd_jpy,
            metal_spot_usd: None,
        }
    }

    /// Add or replace the rate for a currency
    pub fn with_rate(mut self, currency: Currency, units_per_usd: Rate) -> Self {
        self.rates.insert(currency, units_per_usd);
        self
    }

    /// Set the metal spot price in USD
    pub fn with_metal_spot(mut self, usd_per_ounce: Rate) -> Self {
        self.metal_spot_usd = Some(usd_per_ounce);
        self
    }

    /// Units of `currency` per one USD, or `None` if missing or zero
    ///
    /// USD itself is always 1. JPY comes from the dedicated USD/JPY entry
    /// when that is set.
    pub fn raw(&self, currency: Currency) -> Option<Rate> {
        let value = match currency {
            Currency::USD => Some(Decimal::ONE),
            Currency::JPY if !self.usd_jpy.is_zero() => Some(self.usd_jpy),
            other => self.rates.get(&other).copied(),
        };
        value.filter(|v| !v.is_zero())
    }

    /// USD/JPY, or `None` if unavailable
    pub fn usd_jpy(&self) -> Option<Rate> {
        self.raw(Currency::JPY)
    }

    /// Metal spot in USD, or `None` if missing or zero
    pub fn metal_spot(&self) -> Option<Rate> {
        self.metal_spot_usd.filter(|v| !v.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_raw_lookup() {
        let table = RateTable::new(dec!(150.0))
            .with_rate(Currency::EUR, dec!(0.92))
            .with_rate(Currency::GBP, Decimal::ZERO);

        assert_eq!(table.raw(Currency::USD), Some(Decimal::ONE));
        assert_eq!(table.raw(Currency::JPY), Some(dec!(150.0)));
        assert_eq!(table.raw(Currency::EUR), Some(dec!(0.92)));
        // Zero means unavailable
        assert_eq!(table.raw(Currency::GBP), None);
        assert_eq!(table.raw(Currency::CHF), None);
    }

    #[test]
    fn test_jpy_falls_back_to_map() {
        let table = RateTable::new(Decimal::ZERO).with_rate(Currency::JPY, dec!(151.2));
        assert_eq!(table.usd_jpy(), Some(dec!(151.2)));
        assert_eq!(RateTable::new(Decimal::ZERO).usd_jpy(), None);
    }

    #[test]
    fn test_metal_spot() {
        let table = RateTable::new(dec!(150.0));
        assert_eq!(table.metal_spot(), None);
        assert_eq!(table.clone().with_metal_spot(Decimal::ZERO).metal_spot(), None);
        assert_eq!(table.with_metal_spot(dec!(2350.5)).metal_spot(), Some(dec!(2350.5)));
    }

    #[test]
    fn test_json_snapshot() {
        let json = r#"{"rates":{"EUR":"0.92","AUD":"1.52"},"usd_jpy":"149.8","metal_spot_usd":"2310"}"#;
        let table: RateTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.raw(Currency::AUD), Some(dec!(1.52)));
        assert_eq!(table.usd_jpy(), Some(dec!(149.8)));
        assert_eq!(table.metal_spot(), Some(dec!(2310)));
    }
}
