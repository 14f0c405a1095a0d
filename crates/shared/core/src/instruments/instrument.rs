use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Asset, Currency, InstrumentError, Metal};
use crate::values::Price;

/// Symbols offered to traders, in display order
const CATALOGUE: [&str; 14] = [
    "USDJPY", "EURJPY", "GBPJPY", "AUDJPY", "NZDJPY", "CADJPY", "CHFJPY", "EURUSD", "GBPUSD",
    "AUDUSD", "NZDUSD", "USDCAD", "USDCHF", "GOLD",
];

/// A tradable instrument: a currency pair or a metal quoted in a currency
///
/// Constructed once at the boundary via [`Instrument::parse`]; everything
/// downstream works on the typed legs instead of slicing symbol strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    /// What is bought or sold
    pub base: Asset,
    /// Currency the price is expressed in; loss is settled in this currency
    /// before conversion
    pub quote: Currency,
    /// Contract multiplier: units of base per lot
    pub unit_size: Decimal,
    /// Display precision for prices
    pub pip_decimals: u32,
}

impl Instrument {
    /// Units per lot for currency pairs
    pub const FX_UNIT_SIZE: Decimal = dec!(10000);
    /// Ounces per lot for metals
    pub const METAL_UNIT_SIZE: Decimal = Decimal::ONE;

    /// Create a currency pair with the standard lot size
    pub fn fx(base: Currency, quote: Currency) -> Self {
        let pip_decimals = if quote == Currency::JPY { 3 } else { 5 };
        Self {
            base: Asset::Currency(base),
            quote,
            unit_size: Self::FX_UNIT_SIZE,
            pip_decimals,
        }
    }

    /// Create a metal quoted in the given currency
    pub fn metal(metal: Metal, quote: Currency) -> Self {
        Self {
            base: Asset::Metal(metal),
            quote,
            unit_size: Self::METAL_UNIT_SIZE,
            pip_decimals: 2,
        }
    }

    /// Gold quoted in USD
    pub fn gold() -> Self {
        Self::metal(Metal::Gold, Currency::USD)
    }

    /// Parse a symbol such as `EURJPY`, `GOLD` or `XAUJPY`
    pub fn parse(symbol: &str) -> Result<Self, InstrumentError> {
        let symbol = symbol.trim().to_ascii_uppercase();

        match symbol.as_str() {
            "GOLD" | "XAUUSD" => return Ok(Self::gold()),
            "XAUJPY" => return Ok(Self::metal(Metal::Gold, Currency::JPY)),
            _ => {}
        }

        if symbol.len() != 6 || !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InstrumentError::MalformedSymbol(symbol));
        }

        let base: Currency = symbol[..3].parse()?;
        let quote: Currency = symbol[3..].parse()?;
        if base == quote {
            return Err(InstrumentError::SameLegs(symbol));
        }

        Ok(Self::fx(base, quote))
    }

    /// All instruments offered by default
    pub fn catalogue() -> Vec<Self> {
        CATALOGUE
            .iter()
            .filter_map(|s| Self::parse(s).ok())
            .collect()
    }

    /// Canonical symbol (`GOLD` for gold in USD)
    pub fn symbol(&self) -> String {
        match (self.base, self.quote) {
            (Asset::Metal(Metal::Gold), Currency::USD) => "GOLD".to_string(),
            (base, quote) => format!("{}{}", base, quote),
        }
    }

    pub fn is_metal(&self) -> bool {
        matches!(self.base, Asset::Metal(_))
    }

    /// Base currency, if the instrument is a currency pair
    pub fn base_currency(&self) -> Option<Currency> {
        match self.base {
            Asset::Currency(c) => Some(c),
            Asset::Metal(_) => None,
        }
    }

    /// Round a price to display precision
    pub fn round_price(&self, price: Price) -> Price {
        price.round_dp_with_strategy(self.pip_decimals, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl FromStr for Instrument {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jpy_pair() {
        let pair = Instrument::parse("eurjpy").unwrap();
        assert_eq!(pair.base, Asset::Currency(Currency::EUR));
        assert_eq!(pair.quote, Currency::JPY);
        assert_eq!(pair.unit_size, dec!(10000));
        assert_eq!(pair.pip_decimals, 3);
    }

    #[test]
    fn test_usd_quoted_pair_has_more_decimals() {
        let pair = Instrument::parse("GBPUSD").unwrap();
        assert_eq!(pair.pip_decimals, 5);
        assert!(pair.pip_decimals > Instrument::parse("GBPJPY").unwrap().pip_decimals);
    }

    #[test]
    fn test_parse_gold_aliases() {
        let gold = Instrument::parse("GOLD").unwrap();
        assert!(gold.is_metal());
        assert_eq!(gold.quote, Currency::USD);
        assert_eq!(gold.unit_size, Decimal::ONE);
        assert_eq!(Instrument::parse("XAUUSD").unwrap(), gold);

        let gold_jpy = Instrument::parse("XAUJPY").unwrap();
        assert_eq!(gold_jpy.quote, Currency::JPY);
        assert_eq!(gold_jpy.base_currency(), None);
    }

    #[test]
    fn test_parse_rejects_bad_symbols() {
        assert_eq!(
            Instrument::parse("EURJP"),
            Err(InstrumentError::MalformedSymbol("EURJP".to_string()))
        );
        assert_eq!(
            Instrument::parse("EUR/JP"),
            Err(InstrumentError::MalformedSymbol("EUR/JP".to_string()))
        );
        assert_eq!(
            Instrument::parse("XYZJPY"),
            Err(InstrumentError::UnknownCurrency("XYZ".to_string()))
        );
        assert_eq!(
            Instrument::parse("USDUSD"),
            Err(InstrumentError::SameLegs("USDUSD".to_string()))
        );
    }

    #[test]
    fn test_catalogue_is_complete() {
        let catalogue = Instrument::catalogue();
        assert_eq!(catalogue.len(), 14);
        assert_eq!(catalogue[0].symbol(), "USDJPY");
        assert_eq!(catalogue[13].symbol(), "GOLD");
    }

    #[test]
    fn test_display_and_symbol() {
        let pair = Instrument::fx(Currency::AUD, Currency::USD);
        assert_eq!(pair.symbol(), "AUDUSD");
        assert_eq!(format!("{}", pair), "AUD/USD");
        assert_eq!(Instrument::metal(Metal::Gold, Currency::JPY).symbol(), "XAUJPY");
    }

    #[test]
    fn test_round_price() {
        let pair = Instrument::parse("USDJPY").unwrap();
        assert_eq!(pair.round_price(dec!(149.66666)), dec!(149.667));
        let gold = Instrument::gold();
        assert_eq!(gold.round_price(dec!(2345.675)), dec!(2345.68));
    }
}
