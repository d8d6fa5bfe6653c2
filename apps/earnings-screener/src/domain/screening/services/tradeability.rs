//! Tradeability thresholds.
//!
//! Checks computed values against the screening limits:
//! - Underlying volume
//! - Short-leg delta
//! - Strangle credit
//! - Relative bid/ask spread
//! - Quote size
//!
//! Every applicable check runs; a name is annotated, never rejected.

use crate::domain::chain::OptionRight;
use crate::domain::screening::value_objects::{
    Diagnostic, EarningsRecord, Expiration, StrangleConfig, Strike,
};

/// Record-level threshold diagnostics.
#[must_use]
pub fn record_diagnostics(volume: u64, config: &StrangleConfig) -> Vec<Diagnostic> {
    check_volume(volume, config).into_iter().collect()
}

/// Term-level threshold diagnostics.
#[must_use]
pub fn expiration_diagnostics(expiration: &Expiration, config: &StrangleConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (side, strike) in [
        (OptionRight::Put, expiration.put.as_ref()),
        (OptionRight::Call, expiration.call.as_ref()),
    ] {
        let Some(strike) = strike else { continue };
        if let Some(d) = check_delta(side, strike, config) {
            diagnostics.push(d);
        }
    }

    if let Some(d) = check_credit(expiration, config) {
        diagnostics.push(d);
    }

    for (side, strike) in [
        (OptionRight::Put, expiration.put.as_ref()),
        (OptionRight::Call, expiration.call.as_ref()),
    ] {
        let Some(strike) = strike else { continue };
        if let Some(d) = check_spread(side, strike, config) {
            diagnostics.push(d);
        }
        if let Some(d) = check_size(side, strike, config) {
            diagnostics.push(d);
        }
    }

    diagnostics
}

/// Replace the threshold warnings on a term with a fresh evaluation.
///
/// Errors from evaluation are kept. Applying it twice gives the same result.
pub fn annotate_expiration(expiration: &mut Expiration, config: &StrangleConfig) {
    let fresh = expiration_diagnostics(expiration, config);
    expiration.diagnostics.retain(|d| !is_threshold(d));
    expiration.diagnostics.extend(fresh);
}

/// Replace the threshold warnings on a record with a fresh evaluation.
pub fn annotate_record(record: &mut EarningsRecord, config: &StrangleConfig) {
    record.diagnostics.retain(|d| !is_threshold(d));
    if record.success {
        record
            .diagnostics
            .extend(record_diagnostics(record.volume, config));
    }
}

const fn is_threshold(diagnostic: &Diagnostic) -> bool {
    matches!(
        diagnostic,
        Diagnostic::LowVolume { .. }
            | Diagnostic::DeltaTooHigh { .. }
            | Diagnostic::CreditsTooLow { .. }
            | Diagnostic::SpreadTooWide { .. }
            | Diagnostic::SizeTooThin { .. }
    )
}

fn check_volume(volume: u64, config: &StrangleConfig) -> Option<Diagnostic> {
    (volume < config.volume_threshold).then_some(Diagnostic::LowVolume {
        threshold: config.volume_threshold,
        actual: volume,
    })
}

fn check_delta(side: OptionRight, strike: &Strike, config: &StrangleConfig) -> Option<Diagnostic> {
    let delta = strike.delta?;
    (delta.abs() > config.max_delta).then_some(Diagnostic::DeltaTooHigh {
        side,
        delta,
        max_delta: config.max_delta,
    })
}

/// Only meaningful with both legs.
fn check_credit(expiration: &Expiration, config: &StrangleConfig) -> Option<Diagnostic> {
    let (put, call) = (expiration.put.as_ref()?, expiration.call.as_ref()?);
    let credit = put.mark + call.mark;
    (credit < config.min_strangle_credit).then_some(Diagnostic::CreditsTooLow {
        credit,
        min_credit: config.min_strangle_credit,
    })
}

fn check_spread(side: OptionRight, strike: &Strike, config: &StrangleConfig) -> Option<Diagnostic> {
    (strike.spread_frac > config.max_spread_frac).then_some(Diagnostic::SpreadTooWide {
        side,
        spread_frac: strike.spread_frac,
        max_spread_frac: config.max_spread_frac,
    })
}

fn check_size(side: OptionRight, strike: &Strike, config: &StrangleConfig) -> Option<Diagnostic> {
    (strike.min_size() < config.min_size).then_some(Diagnostic::SizeTooThin {
        side,
        bid_size: strike.size_bid,
        ask_size: strike.size_ask,
        min_size: config.min_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn strike(strike: Decimal, mark: Decimal, delta: f64) -> Strike {
        Strike {
            strike,
            target: strike,
            delta: Some(delta),
            delta_interpolated: false,
            size_bid: 50,
            size_ask: 50,
            spread: dec!(0.05),
            spread_frac: dec!(0.08),
            mark,
        }
    }

    fn expiration() -> Expiration {
        let mut x = Expiration::new(NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(), 32, true);
        x.put = Some(strike(dec!(95), dec!(0.60), -0.12));
        x.call = Some(strike(dec!(105), dec!(0.55), 0.13));
        x
    }

    #[test]
    fn clean_term_has_no_warnings() {
        assert!(expiration_diagnostics(&expiration(), &StrangleConfig::default()).is_empty());
    }

    #[test]
    fn volume_threshold() {
        let config = StrangleConfig::default();
        assert_eq!(
            record_diagnostics(150_000, &config),
            vec![Diagnostic::LowVolume {
                threshold: 200_000,
                actual: 150_000
            }]
        );
        assert!(record_diagnostics(250_000, &config).is_empty());
        assert!(record_diagnostics(200_000, &config).is_empty());
    }

    #[test]
    fn reports_every_violation() {
        let mut x = expiration();
        if let Some(put) = x.put.as_mut() {
            put.delta = Some(-0.30);
            put.mark = dec!(0.10);
            put.spread_frac = dec!(0.40);
            put.size_bid = 2;
        }
        if let Some(call) = x.call.as_mut() {
            call.mark = dec!(0.10);
        }

        let codes: Vec<&str> = expiration_diagnostics(&x, &StrangleConfig::default())
            .iter()
            .map(Diagnostic::code)
            .collect();
        assert_eq!(
            codes,
            vec![
                "DELTA_TOO_HIGH",
                "CREDITS_TOO_LOW",
                "SPREAD_TOO_WIDE",
                "SIZE_TOO_THIN"
            ]
        );
    }

    #[test]
    fn credit_needs_both_legs() {
        let mut x = expiration();
        if let Some(put) = x.put.as_mut() {
            put.mark = dec!(0.01);
        }
        x.call = None;
        assert!(expiration_diagnostics(&x, &StrangleConfig::default())
            .iter()
            .all(|d| !matches!(d, Diagnostic::CreditsTooLow { .. })));
    }

    #[test]
    fn unknown_delta_is_not_checked() {
        let mut x = expiration();
        if let Some(call) = x.call.as_mut() {
            call.delta = None;
        }
        assert!(expiration_diagnostics(&x, &StrangleConfig::default()).is_empty());
    }

    #[test]
    fn annotation_is_idempotent() {
        let config = StrangleConfig::default();
        let mut x = expiration();
        if let Some(call) = x.call.as_mut() {
            call.size_ask = 1;
        }
        x.diagnostics.push(Diagnostic::MissingDelta {
            side: OptionRight::Put,
        });

        annotate_expiration(&mut x, &config);
        let once = x.clone();
        annotate_expiration(&mut x, &config);
        assert_eq!(x, once);
        assert_eq!(x.diagnostics.len(), 2);
    }
}
