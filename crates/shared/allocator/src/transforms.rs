use bunkatsu_core::{Direction, Money, Price, Rate, Tranche, weighted_average};
use bunkatsu_ports::{AllocationError, AllocationResult};
use rust_decimal::Decimal;

use crate::config::AllocationConfig;

/// Place one tranche per weight across the zone
///
/// Prices step linearly from `zone_upper` (index 0) to `zone_lower`
/// (last index, exact). A single tranche sits at the designated price.
pub fn price_tranches(config: &AllocationConfig) -> Vec<Tranche> {
    let count = config.weights.len();

    if count == 1 {
        let price = config.designated_price().unwrap_or(config.zone_upper);
        return vec![Tranche::new(price, config.weights[0])];
    }

    let step = (config.zone_upper - config.zone_lower) / Decimal::from(count - 1);

    config
        .weights
        .iter()
        .enumerate()
        .map(|(i, weight)| {
            let price = if i == count - 1 {
                config.zone_lower
            } else {
                config.zone_upper - step * Decimal::from(i)
            };
            Tranche::new(price, *weight)
        })
        .collect()
}

/// Rescale all lots by `target / raw average`
///
/// Returns the new tranches and the factor applied. The factor is 1 when
/// there is no target, when the target already matches, or when the raw
/// average is zero. Fails if a scaled lot overflows.
pub fn scale_to_target_average(
    tranches: &[Tranche],
    target: Option<Price>,
) -> AllocationResult<(Vec<Tranche>, Decimal)> {
    let factor = match (target, weighted_average(tranches)) {
        (Some(target), Some(raw)) if !raw.is_zero() && raw != target => target / raw,
        _ => Decimal::ONE,
    };

    let scaled = tranches
        .iter()
        .map(|t| {
            t.checked_scaled(factor).ok_or_else(|| {
                AllocationError::invalid(
                    "target_average",
                    format!("scaling lot {} by {} overflows", t.lot, factor),
                )
            })
        })
        .collect::<AllocationResult<Vec<_>>>()?;
    Ok((scaled, factor))
}

/// Attach each tranche's loss at stop, in settlement currency
///
/// `lot × adverse excursion × unit size × conversion rate`; a stop on the
/// wrong side of a tranche contributes zero. Fails if the product overflows.
pub fn price_losses(
    tranches: &[Tranche],
    direction: Direction,
    stop_price: Price,
    unit_size: Decimal,
    conversion_rate: Rate,
) -> AllocationResult<Vec<Tranche>> {
    tranches
        .iter()
        .map(|t| {
            let per_unit = direction.adverse_excursion(t.price, stop_price);
            let loss = t
                .lot
                .checked_mul(per_unit)
                .and_then(|v| v.checked_mul(unit_size))
                .and_then(|v| v.checked_mul(conversion_rate))
                .ok_or_else(|| {
                    AllocationError::invalid(
                        "unit_size",
                        format!(
                            "loss at {} overflows with unit size {} and conversion rate {}",
                            t.price, unit_size, conversion_rate
                        ),
                    )
                })?;
            Ok(t.with_loss(loss))
        })
        .collect()
}

/// Shrink all lots uniformly so the total loss fits under `max_loss`
///
/// Returns the new tranches and the total loss, which is exactly
/// `max_loss` when shrinking happened.
pub fn cap_total_loss(tranches: &[Tranche], max_loss: Money) -> (Vec<Tranche>, Money) {
    let total: Money = tranches.iter().map(|t| t.loss_at_stop).sum();

    if total > max_loss && total > Decimal::ZERO {
        let factor = max_loss / total;
        let capped = tranches.iter().map(|t| t.scaled(factor)).collect();
        (capped, max_loss)
    } else {
        (tranches.to_vec(), total)
    }
}
