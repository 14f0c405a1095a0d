use bunkatsu_allocator::allocate;
use bunkatsu_rates::{conversion_rate, resolve};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::cache::RateSnapshot;
use crate::config::PlannerConfig;
use crate::error::PlannerResult;
use crate::report::PlanReport;
use crate::request::PlanRequest;

/// Turns requests into plans against a rate snapshot
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan one request
    ///
    /// The instrument's own rate and the conversion rate are both resolved
    /// before anything is allocated, so a missing rate never produces a plan.
    pub fn plan(&self, request: &PlanRequest, snapshot: &RateSnapshot) -> PlannerResult<PlanReport> {
        let instrument = request.instrument()?;
        let settlement = self.config.settlement;

        let market_rate = resolve(&instrument, &snapshot.table)?;
        let rate = conversion_rate(instrument.quote, settlement, &snapshot.table)?;
        debug!("{} losses convert to {} at {}", instrument, settlement, rate);

        if snapshot.is_degraded() {
            warn!("Planning {} with fallback rates", instrument.symbol());
        }

        let allocation = request.to_allocation(&instrument, rate)?;
        let plan = allocate(&allocation)?;

        let report = PlanReport {
            id: Uuid::new_v4(),
            instrument,
            direction: request.direction,
            market_rate,
            settlement,
            conversion_rate: rate,
            degraded_rates: snapshot.is_degraded(),
            plan,
        };

        info!(
            "Plan {} for {}: {} tranches, {} lots, total loss {} {}",
            report.id,
            report.instrument.symbol(),
            report.plan.tranches.len(),
            report.plan.total_lots(),
            report.plan.total_loss,
            settlement
        );
        Ok(report)
    }
}
