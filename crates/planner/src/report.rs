use bunkatsu_core::{AllocationPlan, Currency, Direction, Instrument, Rate};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// A finished plan with the context it was computed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    pub id: Uuid,
    pub instrument: Instrument,
    pub direction: Direction,
    /// Current rate of the instrument in the snapshot
    pub market_rate: Rate,
    /// Currency `plan.total_loss` and tranche losses are expressed in
    pub settlement: Currency,
    /// Quote-to-settlement rate used for the losses
    pub conversion_rate: Rate,
    /// True when the rates came from the fallback table
    pub degraded_rates: bool,
    pub plan: AllocationPlan,
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.direction {
            Direction::Long => "BUY",
            Direction::Short => "SELL",
        };
        let dp = self.instrument.pip_decimals as usize;

        writeln!(
            f,
            "{} {} @ {:.*} ({})",
            side,
            self.instrument.symbol(),
            dp,
            self.instrument.round_price(self.market_rate),
            self.id
        )?;
        for (i, tranche) in self.plan.tranches.iter().enumerate() {
            writeln!(
                f,
                "  #{:<2} price {:.*}  lot {:.4}  loss {:.2} {}",
                i + 1,
                dp,
                self.instrument.round_price(tranche.price),
                tranche.lot,
                tranche.loss_at_stop,
                self.settlement
            )?;
        }
        writeln!(
            f,
            "  average {:.*}",
            dp,
            self.instrument.round_price(self.plan.weighted_average_price)
        )?;
        write!(f, "  total loss {:.2} {}", self.plan.total_loss, self.settlement)?;

        if self.degraded_rates {
            write!(f, "\n  WARNING: computed with fallback rates, not live data")?;
        }
        Ok(())
    }
}
