use bunkatsu_core::{AllocationPlan, Money};
use bunkatsu_ports::{AllocationError, AllocationResult};
use log::{debug, info};

use crate::config::AllocationConfig;
use crate::transforms::{cap_total_loss, price_losses, price_tranches, scale_to_target_average};

/// Build a loss-bounded allocation plan
///
/// Fails with `InvalidConfiguration` before computing anything if the
/// inputs are inconsistent, and with `DegenerateAllocation` when no tranche
/// would lose anything at the stop.
pub fn allocate(config: &AllocationConfig) -> AllocationResult<AllocationPlan> {
    config.validate()?;

    let priced = price_tranches(config);
    debug!(
        "Tranche prices for {:?}: {:?}",
        config.direction,
        priced.iter().map(|t| t.price).collect::<Vec<_>>()
    );

    let (targeted, average_factor) = scale_to_target_average(&priced, config.target_average)?;

    let with_losses = price_losses(
        &targeted,
        config.direction,
        config.stop_price,
        config.unit_size,
        config.conversion_rate,
    )?;

    let uncapped: Money = with_losses
        .iter()
        .try_fold(Money::ZERO, |sum, t| sum.checked_add(t.loss_at_stop))
        .ok_or_else(|| AllocationError::invalid("unit_size", "total loss at stop overflows"))?;
    debug!(
        "Average scale factor {}, uncapped loss {} against cap {}",
        average_factor, uncapped, config.max_loss
    );

    if uncapped.is_zero() {
        return Err(AllocationError::DegenerateAllocation {
            max_loss: config.max_loss,
        });
    }

    let (capped, total_loss) = cap_total_loss(&with_losses, config.max_loss);
    if total_loss < uncapped {
        info!(
            "Loss {} exceeds cap {}, lots shrunk by {}",
            uncapped,
            config.max_loss,
            total_loss / uncapped
        );
    }

    AllocationPlan::from_tranches(capped, total_loss)
        .ok_or_else(|| AllocationError::invalid("weights", "final lots sum to zero or overflow"))
}
