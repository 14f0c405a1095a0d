//! Calculation requests
//!
//! A [`PlanRequest`] is what a trader fills in: symbol, direction, how the
//! entry zone is chosen, weights, stop and loss cap. It is validated into a
//! typed [`Instrument`] and an [`AllocationConfig`] before any calculation.

use bunkatsu_allocator::AllocationConfig;
use bunkatsu_core::{Direction, Instrument, Money, Price, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{parse_json, read_json};
use crate::error::{ConfigError, PlannerError, PlannerResult};

/// How the entry zone is chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum EntryMode {
    /// Zone derived from the target average: the first entry sits half the
    /// average-to-stop distance beyond the average, the last at the stop
    #[default]
    Zone,
    /// First entry at the current market price, last at the stop
    Market { price: Price },
    /// Bounds given directly, first entry at `upper`
    Explicit { upper: Price, lower: Price },
}

/// One calculation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub symbol: String,

    #[serde(default = "default_direction")]
    pub direction: Direction,

    #[serde(default)]
    pub entry: EntryMode,

    /// Number of tranches; defaults to the number of weights
    #[serde(default)]
    pub division_count: Option<usize>,

    #[serde(default = "default_weights")]
    pub weights: Vec<Decimal>,

    pub stop: Price,

    #[serde(default)]
    pub target_average: Option<Price>,

    /// Loss cap in settlement currency
    #[serde(default = "default_max_loss")]
    pub max_loss: Money,
}

fn default_direction() -> Direction {
    Direction::Long
}

fn default_weights() -> Vec<Decimal> {
    vec![dec!(2), dec!(2), dec!(4)]
}

fn default_max_loss() -> Money {
    dec!(5000)
}

impl PlanRequest {
    /// Request with default weights and loss cap
    pub fn new(symbol: impl Into<String>, direction: Direction, entry: EntryMode, stop: Price) -> Self {
        Self {
            symbol: symbol.into(),
            direction,
            entry,
            division_count: None,
            weights: default_weights(),
            stop,
            target_average: None,
            max_loss: default_max_loss(),
        }
    }

    /// Load a request from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_json(path)
    }

    /// Parse a request from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        parse_json(json)
    }

    pub fn with_weights(mut self, weights: Vec<Decimal>) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_division_count(mut self, division_count: usize) -> Self {
        self.division_count = Some(division_count);
        self
    }

    pub fn with_target_average(mut self, price: Price) -> Self {
        self.target_average = Some(price);
        self
    }

    pub fn with_max_loss(mut self, max_loss: Money) -> Self {
        self.max_loss = max_loss;
        self
    }

    /// Validate the symbol into a typed instrument
    pub fn instrument(&self) -> PlannerResult<Instrument> {
        Ok(Instrument::parse(&self.symbol)?)
    }

    /// First and last entry prices for the chosen mode
    pub fn entry_bounds(&self) -> PlannerResult<(Price, Price)> {
        match &self.entry {
            EntryMode::Zone => {
                let average = self.target_average.ok_or_else(|| {
                    PlannerError::InvalidRequest("zone mode needs a target_average".to_string())
                })?;
                // Long: above the average; short: below it
                let first = average + dec!(0.5) * (average - self.stop);
                Ok((first, self.stop))
            }
            EntryMode::Market { price } => Ok((*price, self.stop)),
            EntryMode::Explicit { upper, lower } => Ok((*upper, *lower)),
        }
    }

    /// Build the allocator input for `instrument`
    ///
    /// `conversion_rate` turns the instrument's quote currency into the
    /// settlement currency.
    pub fn to_allocation(
        &self,
        instrument: &Instrument,
        conversion_rate: Rate,
    ) -> PlannerResult<AllocationConfig> {
        let (first, last) = self.entry_bounds()?;

        let single_price = match &self.entry {
            EntryMode::Market { price } => *price,
            _ => self.target_average.unwrap_or(first),
        };

        let mut config = AllocationConfig::new(
            self.direction,
            self.weights.clone(),
            first,
            last,
            self.stop,
            self.max_loss,
        )
        .with_single_price(single_price)
        .with_unit_size(instrument.unit_size)
        .with_conversion_rate(conversion_rate);

        if let Some(count) = self.division_count {
            config = config.with_division_count(count);
        }
        if let Some(target) = self.target_average {
            config = config.with_target_average(target);
        }

        Ok(config)
    }
}
