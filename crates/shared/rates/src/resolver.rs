use bunkatsu_core::{Asset, Currency, Instrument, Metal, Rate, RateTable};
use bunkatsu_ports::{RateError, RateResult};
use log::{debug, warn};
use rust_decimal::Decimal;

/// Rate of `instrument`: units of its quote per one unit of its base
pub fn resolve(instrument: &Instrument, table: &RateTable) -> RateResult<Rate> {
    match instrument.base {
        Asset::Currency(base) => resolve_pair(base, instrument.quote, table),
        Asset::Metal(metal) => resolve_metal(metal, instrument, table),
    }
}

/// Rate converting an amount in `quote` into `settlement`
///
/// 1 when the currencies match; otherwise the `quote/settlement` rate.
pub fn conversion_rate(
    quote: Currency,
    settlement: Currency,
    table: &RateTable,
) -> RateResult<Rate> {
    if quote == settlement {
        return Ok(Decimal::ONE);
    }
    resolve_pair(quote, settlement, table)
}

/// Rate of the currency pair `base/quote`, triangulated through USD
pub fn resolve_pair(base: Currency, quote: Currency, table: &RateTable) -> RateResult<Rate> {
    if base == quote {
        return Ok(Decimal::ONE);
    }

    let rate = if base == Currency::USD {
        leg(table, quote)?
    } else if quote == Currency::USD {
        Decimal::ONE / leg(table, base)?
    } else if quote == Currency::JPY {
        leg(table, Currency::JPY)? / leg(table, base)?
    } else {
        leg(table, quote)? / leg(table, base)?
    };

    debug!("Resolved {}{} = {}", base, quote, rate);
    Ok(rate)
}

fn resolve_metal(metal: Metal, instrument: &Instrument, table: &RateTable) -> RateResult<Rate> {
    let spot = table.metal_spot().ok_or_else(|| {
        warn!("{} spot price missing from rate table", metal);
        RateError::MetalSpotUnavailable
    })?;

    let rate = match instrument.quote {
        Currency::USD => spot,
        Currency::JPY => spot * leg(table, Currency::JPY)?,
        _ => {
            return Err(RateError::UnsupportedQuote {
                instrument: instrument.symbol(),
            });
        }
    };

    debug!("Resolved {} = {}", instrument.symbol(), rate);
    Ok(rate)
}

/// Raw units-per-USD value, never zero
fn leg(table: &RateTable, currency: Currency) -> RateResult<Rate> {
    table.raw(currency).ok_or_else(|| {
        warn!("Rate leg {} missing or zero", currency);
        RateError::Unavailable { currency }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> RateTable {
        RateTable::new(dec!(150))
            .with_rate(Currency::EUR, dec!(0.8))
            .with_rate(Currency::GBP, dec!(0.75))
            .with_rate(Currency::AUD, dec!(1.5))
            .with_rate(Currency::CHF, dec!(0.9))
            .with_metal_spot(dec!(2400))
    }

    fn pair(symbol: &str) -> Instrument {
        Instrument::parse(symbol).unwrap()
    }

    #[test]
    fn test_usdjpy_is_raw_entry() {
        assert_eq!(resolve(&pair("USDJPY"), &table()).unwrap(), dec!(150));
    }

    #[test]
    fn test_usd_base_uses_raw_value() {
        assert_eq!(resolve(&pair("USDCHF"), &table()).unwrap(), dec!(0.9));
    }

    #[test]
    fn test_usd_quote_is_reciprocal() {
        assert_eq!(resolve(&pair("EURUSD"), &table()).unwrap(), dec!(1.25));
        assert_eq!(resolve(&pair("AUDUSD"), &table()).unwrap(), Decimal::ONE / dec!(1.5));
    }

    #[test]
    fn test_jpy_cross() {
        // EUR -> USD -> JPY: 1.25 * 150
        assert_eq!(resolve(&pair("EURJPY"), &table()).unwrap(), dec!(187.5));
        assert_eq!(resolve(&pair("GBPJPY"), &table()).unwrap(), dec!(200));
    }

    #[test]
    fn test_cross_triangulates_through_usd() {
        // EUR/GBP = (1/0.8) / (1/0.75)
        assert_eq!(resolve_pair(Currency::EUR, Currency::GBP, &table()).unwrap(), dec!(0.9375));
        // JPY as base is an ordinary cross
        assert_eq!(
            resolve_pair(Currency::JPY, Currency::EUR, &table()).unwrap(),
            dec!(0.8) / dec!(150)
        );
    }

    #[test]
    fn test_missing_base_is_unavailable() {
        let err = resolve(&pair("NZDJPY"), &table()).unwrap_err();
        assert_eq!(err, RateError::Unavailable { currency: Currency::NZD });
    }

    #[test]
    fn test_zero_base_is_unavailable() {
        let table = table().with_rate(Currency::EUR, Decimal::ZERO);
        assert_eq!(
            resolve(&pair("EURUSD"), &table).unwrap_err(),
            RateError::Unavailable { currency: Currency::EUR }
        );
    }

    #[test]
    fn test_missing_usdjpy_is_unavailable() {
        let table = RateTable::new(Decimal::ZERO).with_rate(Currency::EUR, dec!(0.8));
        assert_eq!(
            resolve(&pair("EURJPY"), &table).unwrap_err(),
            RateError::Unavailable { currency: Currency::JPY }
        );
        assert_eq!(
            resolve(&pair("USDJPY"), &table).unwrap_err(),
            RateError::Unavailable { currency: Currency::JPY }
        );
    }

    #[test]
    fn test_gold() {
        assert_eq!(resolve(&Instrument::gold(), &table()).unwrap(), dec!(2400));
        assert_eq!(resolve(&pair("XAUJPY"), &table()).unwrap(), dec!(360000));
    }

    #[test]
    fn test_gold_without_spot() {
        let table = RateTable::new(dec!(150));
        assert_eq!(
            resolve(&Instrument::gold(), &table).unwrap_err(),
            RateError::MetalSpotUnavailable
        );
    }

    #[test]
    fn test_gold_in_unsupported_quote() {
        let gold_eur = Instrument::metal(Metal::Gold, Currency::EUR);
        assert_eq!(
            resolve(&gold_eur, &table()).unwrap_err(),
            RateError::UnsupportedQuote {
                instrument: "XAUEUR".to_string()
            }
        );
    }

    #[test]
    fn test_conversion_rate() {
        let t = table();
        assert_eq!(conversion_rate(Currency::JPY, Currency::JPY, &t).unwrap(), Decimal::ONE);
        assert_eq!(conversion_rate(Currency::USD, Currency::JPY, &t).unwrap(), dec!(150));
        assert_eq!(
            conversion_rate(Currency::CAD, Currency::JPY, &t).unwrap_err(),
            RateError::Unavailable { currency: Currency::CAD }
        );
    }
}
