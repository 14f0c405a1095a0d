use bunkatsu_core::{Direction, Money, Price, Rate};
use bunkatsu_ports::{AllocationError, AllocationResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Largest weight or price accepted; keeps lot and notional products in range
pub const MAX_MAGNITUDE: Decimal = dec!(1000000000000);

/// Inputs of one allocation
///
/// Zone bounds are oriented by the caller: tranche 0 is placed at
/// `zone_upper` and the last one at `zone_lower`, whatever the direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationConfig {
    pub direction: Direction,
    /// Number of tranches
    pub division_count: usize,
    /// Relative weight per tranche, non-negative
    pub weights: Vec<Decimal>,
    /// Price of the first tranche
    pub zone_upper: Price,
    /// Price of the last tranche
    pub zone_lower: Price,
    /// Price used when there is a single tranche (market price)
    pub single_price: Option<Price>,
    /// Price at which every tranche is assumed closed
    pub stop_price: Price,
    /// Average entry the weights should be scaled towards
    pub target_average: Option<Price>,
    /// Loss cap in settlement currency
    pub max_loss: Money,
    /// Units per lot
    pub unit_size: Decimal,
    /// Quote currency to settlement currency
    pub conversion_rate: Rate,
}

impl AllocationConfig {
    /// Create a config for a zone with one tranche per weight
    ///
    /// Unit size and conversion rate default to 1.
    pub fn new(
        direction: Direction,
        weights: Vec<Decimal>,
        zone_upper: Price,
        zone_lower: Price,
        stop_price: Price,
        max_loss: Money,
    ) -> Self {
        Self {
            direction,
            division_count: weights.len(),
            weights,
            zone_upper,
            zone_lower,
            single_price: None,
            stop_price,
            target_average: None,
            max_loss,
            unit_size: Decimal::ONE,
            conversion_rate: Decimal::ONE,
        }
    }

    pub fn with_division_count(mut self, division_count: usize) -> Self {
        self.division_count = division_count;
        self
    }

    pub fn with_single_price(mut self, price: Price) -> Self {
        self.single_price = Some(price);
        self
    }

    pub fn with_target_average(mut self, price: Price) -> Self {
        self.target_average = Some(price);
        self
    }

    pub fn with_unit_size(mut self, unit_size: Decimal) -> Self {
        self.unit_size = unit_size;
        self
    }

    pub fn with_conversion_rate(mut self, rate: Rate) -> Self {
        self.conversion_rate = rate;
        self
    }

    /// Price of the only tranche when `division_count == 1`
    ///
    /// The market price if given, else the target average.
    pub fn designated_price(&self) -> Option<Price> {
        self.single_price.or(self.target_average)
    }

    /// Check every input constraint before anything is computed
    pub fn validate(&self) -> AllocationResult<()> {
        if self.division_count < 1 {
            return Err(AllocationError::invalid(
                "division_count",
                "must be at least 1",
            ));
        }

        if self.weights.len() != self.division_count {
            return Err(AllocationError::invalid(
                "weights",
                format!(
                    "{} weights given for {} divisions",
                    self.weights.len(),
                    self.division_count
                ),
            ));
        }

        if let Some(w) = self.weights.iter().find(|w| **w < Decimal::ZERO) {
            return Err(AllocationError::invalid(
                "weights",
                format!("negative weight {}", w),
            ));
        }

        if let Some(w) = self.weights.iter().find(|w| **w > MAX_MAGNITUDE) {
            return Err(AllocationError::invalid(
                "weights",
                format!("weight {} exceeds {}", w, MAX_MAGNITUDE),
            ));
        }

        if self.weights.iter().all(|w| w.is_zero()) {
            return Err(AllocationError::invalid("weights", "all weights are zero"));
        }

        if self.division_count == 1 {
            if self.designated_price().is_none() {
                return Err(AllocationError::invalid(
                    "single_price",
                    "a single tranche needs a market or target price",
                ));
            }
        } else if self.zone_upper == self.zone_lower {
            return Err(AllocationError::invalid(
                "zone",
                format!(
                    "upper and lower bounds are both {} for {} divisions",
                    self.zone_upper, self.division_count
                ),
            ));
        }

        if self.division_count > 1 {
            check_price("zone_upper", self.zone_upper)?;
            check_price("zone_lower", self.zone_lower)?;
        }
        if let Some(price) = self.single_price {
            check_price("single_price", price)?;
        }
        if let Some(price) = self.target_average {
            check_price("target_average", price)?;
        }
        check_price("stop_price", self.stop_price)?;

        if self.max_loss <= Decimal::ZERO {
            return Err(AllocationError::invalid(
                "max_loss",
                format!("must be positive, got {}", self.max_loss),
            ));
        }

        if self.unit_size <= Decimal::ZERO {
            return Err(AllocationError::invalid(
                "unit_size",
                format!("must be positive, got {}", self.unit_size),
            ));
        }

        if self.conversion_rate <= Decimal::ZERO {
            return Err(AllocationError::invalid(
                "conversion_rate",
                format!("must be positive, got {}", self.conversion_rate),
            ));
        }

        Ok(())
    }
}

fn check_price(field: &'static str, price: Price) -> AllocationResult<()> {
    if price <= Decimal::ZERO {
        return Err(AllocationError::invalid(
            field,
            format!("must be positive, got {}", price),
        ));
    }
    if price > MAX_MAGNITUDE {
        return Err(AllocationError::invalid(
            field,
            format!("{} exceeds {}", price, MAX_MAGNITUDE),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AllocationConfig {
        AllocationConfig::new(
            Direction::Long,
            vec![dec!(2), dec!(2), dec!(4)],
            dec!(150.0),
            dec!(149.0),
            dec!(148.5),
            dec!(10000),
        )
    }

    fn invalid_field(config: &AllocationConfig) -> &'static str {
        match config.validate() {
            Err(AllocationError::InvalidConfiguration { field, .. }) => field,
            other => panic!("expected invalid configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
        assert_eq!(config().division_count, 3);
    }

    #[test]
    fn test_weight_count_mismatch() {
        assert_eq!(invalid_field(&config().with_division_count(4)), "weights");
        assert_eq!(invalid_field(&config().with_division_count(2)), "weights");
    }

    #[test]
    fn test_zero_divisions() {
        assert_eq!(invalid_field(&config().with_division_count(0)), "division_count");
    }

    #[test]
    fn test_negative_and_zero_weights() {
        let mut c = config();
        c.weights = vec![dec!(1), dec!(-1), dec!(2)];
        assert_eq!(invalid_field(&c), "weights");

        c.weights = vec![Decimal::ZERO; 3];
        assert_eq!(invalid_field(&c), "weights");

        // Some zero weights are fine
        c.weights = vec![Decimal::ZERO, dec!(1), Decimal::ZERO];
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_degenerate_zone() {
        let mut c = config();
        c.zone_lower = c.zone_upper;
        assert_eq!(invalid_field(&c), "zone");
    }

    #[test]
    fn test_single_tranche_ignores_zone_but_needs_price() {
        let mut c = AllocationConfig::new(
            Direction::Short,
            vec![dec!(1)],
            dec!(1.1),
            dec!(1.1),
            dec!(1.2),
            dec!(5000),
        );
        assert_eq!(invalid_field(&c), "single_price");

        c = c.with_target_average(dec!(1.15));
        assert!(c.validate().is_ok());
        assert_eq!(c.designated_price(), Some(dec!(1.15)));

        c = c.with_single_price(dec!(1.12));
        assert_eq!(c.designated_price(), Some(dec!(1.12)));
    }

    #[test]
    fn test_non_positive_max_loss() {
        let mut c = config();
        c.max_loss = Decimal::ZERO;
        assert_eq!(invalid_field(&c), "max_loss");
        c.max_loss = dec!(-1);
        assert_eq!(invalid_field(&c), "max_loss");
    }

    #[test]
    fn test_non_positive_unit_and_rate() {
        assert_eq!(invalid_field(&config().with_unit_size(Decimal::ZERO)), "unit_size");
        assert_eq!(
            invalid_field(&config().with_conversion_rate(Decimal::ZERO)),
            "conversion_rate"
        );
    }

    #[test]
    fn test_non_positive_target_average() {
        assert_eq!(
            invalid_field(&config().with_target_average(dec!(-150))),
            "target_average"
        );
        assert_eq!(
            invalid_field(&config().with_target_average(Decimal::ZERO)),
            "target_average"
        );
    }

    #[test]
    fn test_non_positive_prices() {
        let mut c = config();
        c.zone_upper = dec!(-1);
        assert_eq!(invalid_field(&c), "zone_upper");

        let mut c = config();
        c.zone_lower = Decimal::ZERO;
        assert_eq!(invalid_field(&c), "zone_lower");

        let mut c = config();
        c.stop_price = dec!(-148.5);
        assert_eq!(invalid_field(&c), "stop_price");

        let single = AllocationConfig::new(
            Direction::Long,
            vec![dec!(1)],
            dec!(150),
            dec!(149),
            dec!(148),
            dec!(5000),
        )
        .with_single_price(Decimal::ZERO);
        assert_eq!(invalid_field(&single), "single_price");
    }

    #[test]
    fn test_single_tranche_zone_bounds_are_not_checked() {
        let c = AllocationConfig::new(
            Direction::Long,
            vec![dec!(1)],
            Decimal::ZERO,
            Decimal::ZERO,
            dec!(148),
            dec!(5000),
        )
        .with_single_price(dec!(150));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_oversized_weight_and_price() {
        let mut c = config();
        c.weights = vec![dec!(1), dec!(1), MAX_MAGNITUDE + Decimal::ONE];
        assert_eq!(invalid_field(&c), "weights");

        let mut c = config();
        c.zone_upper = MAX_MAGNITUDE * dec!(2);
        assert_eq!(invalid_field(&c), "zone_upper");
    }

    #[test]
    fn test_parse_from_json() {
        let c: AllocationConfig = serde_json::from_str(
            r#"{
                "direction": "sell",
                "division_count": 2,
                "weights": [1, 3],
                "zone_upper": "1.0850",
                "zone_lower": "1.0900",
                "single_price": null,
                "stop_price": "1.0950",
                "target_average": null,
                "max_loss": 45000,
                "unit_size": 10000,
                "conversion_rate": "150"
            }"#,
        )
        .unwrap();

        assert_eq!(c.direction, Direction::Short);
        assert_eq!(c.weights, vec![dec!(1), dec!(3)]);
        assert_eq!(c.designated_price(), None);
        assert!(c.validate().is_ok());
    }
}
