use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Tranche;
use crate::values::{Lot, Money, Price};

/// Result of an allocation: the tranches plus their aggregates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    /// Tranches in entry order (index 0 first)
    pub tranches: Vec<Tranche>,
    /// Lot-weighted mean of tranche prices using final lots
    pub weighted_average_price: Price,
    /// Sum of per-tranche losses, never above the configured cap
    pub total_loss: Money,
}

impl AllocationPlan {
    /// Assemble a plan from finished tranches
    ///
    /// Returns `None` when the lots sum to zero and no average exists.
    pub fn from_tranches(tranches: Vec<Tranche>, total_loss: Money) -> Option<Self> {
        let weighted_average_price = weighted_average(&tranches)?;
        Some(Self {
            tranches,
            weighted_average_price,
            total_loss,
        })
    }

    /// Sum of all lots
    pub fn total_lots(&self) -> Lot {
        self.tranches.iter().map(|t| t.lot).sum()
    }

    /// Entry prices in order
    pub fn prices(&self) -> Vec<Price> {
        self.tranches.iter().map(|t| t.price).collect()
    }

    /// Final lots in order
    pub fn lots(&self) -> Vec<Lot> {
        self.tranches.iter().map(|t| t.lot).collect()
    }
}

/// Lot-weighted average price of a tranche set
///
/// `None` when the lots sum to zero or the weighted sum overflows.
pub fn weighted_average(tranches: &[Tranche]) -> Option<Price> {
    let total_lots = tranches
        .iter()
        .try_fold(Decimal::ZERO, |sum, t| sum.checked_add(t.lot))?;
    if total_lots.is_zero() {
        return None;
    }
    let weighted = tranches
        .iter()
        .try_fold(Decimal::ZERO, |sum, t| sum.checked_add(t.notional_price()?))?;
    Some(weighted / total_lots)
}
