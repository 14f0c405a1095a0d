use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Lot, Money, Price};

/// One scheduled partial entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tranche {
    /// Entry rate
    pub price: Price,
    /// Relative weight as supplied by the trader
    pub raw_weight: Decimal,
    /// Position size after scaling
    pub lot: Lot,
    /// Loss in settlement currency if the stop is hit
    pub loss_at_stop: Money,
}

impl Tranche {
    /// A freshly priced tranche whose lot still equals its raw weight
    pub fn new(price: Price, raw_weight: Decimal) -> Self {
        Self {
            price,
            raw_weight,
            lot: raw_weight,
            loss_at_stop: Decimal::ZERO,
        }
    }

    /// Copy with lot and loss both multiplied by `factor`
    pub fn scaled(&self, factor: Decimal) -> Self {
        Self {
            lot: self.lot * factor,
            loss_at_stop: self.loss_at_stop * factor,
            ..self.clone()
        }
    }

    /// Like [`Tranche::scaled`], but `None` if the lot or loss overflows
    pub fn checked_scaled(&self, factor: Decimal) -> Option<Self> {
        Some(Self {
            lot: self.lot.checked_mul(factor)?,
            loss_at_stop: self.loss_at_stop.checked_mul(factor)?,
            ..self.clone()
        })
    }

    /// Copy with a different loss at stop
    pub fn with_loss(&self, loss_at_stop: Money) -> Self {
        Self {
            loss_at_stop,
            ..self.clone()
        }
    }

    /// Lot-weighted price contribution, `None` on overflow
    pub fn notional_price(&self) -> Option<Decimal> {
        self.price.checked_mul(self.lot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_tranche_uses_weight_as_lot() {
        let t = Tranche::new(dec!(150.0), dec!(2));
        assert_eq!(t.lot, dec!(2));
        assert_eq!(t.loss_at_stop, Decimal::ZERO);
    }

    #[test]
    fn test_scaled_keeps_raw_weight() {
        let t = Tranche::new(dec!(150.0), dec!(2)).with_loss(dec!(30000));
        let half = t.scaled(dec!(0.5));
        assert_eq!(half.lot, dec!(1.0));
        assert_eq!(half.loss_at_stop, dec!(15000.0));
        assert_eq!(half.raw_weight, dec!(2));
        // Original is untouched
        assert_eq!(t.lot, dec!(2));
    }

    #[test]
    fn test_notional_price() {
        let t = Tranche::new(dec!(149.5), dec!(4));
        assert_eq!(t.notional_price(), Some(dec!(598.0)));
    }

    #[test]
    fn test_checked_scaled_overflow() {
        let t = Tranche::new(dec!(150.0), dec!(2)).with_loss(dec!(30000));
        assert_eq!(t.checked_scaled(dec!(0.5)), Some(t.scaled(dec!(0.5))));
        assert_eq!(t.checked_scaled(Decimal::MAX), None);
    }
}
