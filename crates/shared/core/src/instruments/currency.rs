use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::InstrumentError;

/// ISO currency codes supported by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    USD,
    JPY,
    EUR,
    GBP,
    AUD,
    NZD,
    CAD,
    CHF,
}

impl Currency {
    /// All supported currencies
    pub const ALL: [Currency; 8] = [
        Currency::USD,
        Currency::JPY,
        Currency::EUR,
        Currency::GBP,
        Currency::AUD,
        Currency::NZD,
        Currency::CAD,
        Currency::CHF,
    ];

    /// Three-letter code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::JPY => "JPY",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::AUD => "AUD",
            Currency::NZD => "NZD",
            Currency::CAD => "CAD",
            Currency::CHF => "CHF",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(InstrumentError::UnknownCurrency(code))
    }
}

impl TryFrom<String> for Currency {
    type Error = InstrumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> Self {
        c.code().to_string()
    }
}

/// Commodities quoted in a currency rather than traded as a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metal {
    /// Gold, one troy ounce per lot
    Gold,
}

impl Metal {
    pub fn code(&self) -> &'static str {
        match self {
            Metal::Gold => "XAU",
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The base leg of an instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    Currency(Currency),
    Metal(Metal),
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Currency(c) => c.fmt(f),
            Asset::Metal(m) => m.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_parse_case_insensitive() {
        assert_eq!("jpy".parse::<Currency>().unwrap(), Currency::JPY);
        assert_eq!(" EUR ".parse::<Currency>().unwrap(), Currency::EUR);
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let err = "XYZ".parse::<Currency>().unwrap_err();
        assert_eq!(err, InstrumentError::UnknownCurrency("XYZ".to_string()));
    }

    #[test]
    fn test_currency_serde_as_code() {
        let json = serde_json::to_string(&Currency::GBP).unwrap();
        assert_eq!(json, "\"GBP\"");
        let back: Currency = serde_json::from_str("\"chf\"").unwrap();
        assert_eq!(back, Currency::CHF);
        assert!(serde_json::from_str::<Currency>("\"BTC\"").is_err());
    }
}
