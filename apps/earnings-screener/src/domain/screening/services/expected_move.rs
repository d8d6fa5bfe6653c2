//! Expected-Move Estimator
//!
//! Two estimates per term:
//!
//! - **Straddle**: what the market charges for the at-the-money straddle,
//!   optionally blended with the next strangles out.
//! - **Implied**: the one standard deviation move implied by ATM volatility,
//!   `price * iv * sqrt(days / 365)`.
//!
//! The implied estimate is preferred; the straddle estimate covers chains
//! without usable vols.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use thiserror::Error;

use crate::domain::chain::{ExpirationChain, OptionQuote, OptionRight};
use crate::domain::screening::value_objects::StrangleConfig;

/// Expected-move estimates for one term.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedMove {
    /// Mean ATM implied volatility.
    pub atm_iv: Option<f64>,
    /// Straddle-based estimate.
    pub em_straddle: Decimal,
    /// Volatility-based estimate.
    pub em_implied: Option<Decimal>,
    /// The estimate used downstream.
    pub em_effective: Decimal,
}

/// Why no estimate could be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExpectedMoveError {
    /// The strike nearest the price has no two-sided quote.
    #[error("no two-sided ATM {side} quote")]
    MissingAtmQuote {
        /// Side missing.
        side: OptionRight,
    },
}

/// Estimate the expected move for one term.
pub fn estimate_expected_move(
    price: Decimal,
    days: u32,
    chain: &ExpirationChain,
    config: &StrangleConfig,
) -> Result<ExpectedMove, ExpectedMoveError> {
    let puts = chain.ladder(OptionRight::Put);
    let calls = chain.ladder(OptionRight::Call);

    let put_index = usable_atm_index(&puts, price).ok_or(ExpectedMoveError::MissingAtmQuote {
        side: OptionRight::Put,
    })?;
    let call_index = usable_atm_index(&calls, price).ok_or(ExpectedMoveError::MissingAtmQuote {
        side: OptionRight::Call,
    })?;

    let em_straddle =
        straddle_estimate(&puts, &calls, put_index, call_index, &config.straddle_weights);

    let atm_iv = mean_iv(puts[put_index], calls[call_index]);
    let em_implied =
        atm_iv.and_then(|iv| implied_move(price, iv, days, config.implied_move_factor));

    let em_effective = em_implied
        .filter(|em| *em > Decimal::ZERO)
        .unwrap_or(em_straddle);

    Ok(ExpectedMove {
        atm_iv,
        em_straddle,
        em_implied,
        em_effective,
    })
}

/// Index of the strike nearest `price`, provided its quote is two-sided.
///
/// Ties go to the lower strike.
fn usable_atm_index(ladder: &[&OptionQuote], price: Decimal) -> Option<usize> {
    ladder
        .iter()
        .enumerate()
        .min_by_key(|(_, q)| (q.strike - price).abs())
        .map(|(index, _)| index)
        .filter(|index| ladder[*index].is_usable())
}

/// Weighted sum of concentric straddles, stepping one strike out per weight.
fn straddle_estimate(
    puts: &[&OptionQuote],
    calls: &[&OptionQuote],
    put_index: usize,
    call_index: usize,
    weights: &[Decimal],
) -> Decimal {
    let mark_at = |ladder: &[&OptionQuote], index: Option<usize>| {
        index
            .and_then(|i| ladder.get(i))
            .and_then(|q| q.mark())
            .unwrap_or(Decimal::ZERO)
    };

    weights
        .iter()
        .enumerate()
        .map(|(step, weight)| {
            let put = mark_at(puts, put_index.checked_sub(step));
            let call = mark_at(calls, call_index.checked_add(step));
            *weight * (put + call)
        })
        .sum::<Decimal>()
        .round_dp(2)
}

fn mean_iv(put: &OptionQuote, call: &OptionQuote) -> Option<f64> {
    let vols: Vec<f64> = [put.finite_iv(), call.finite_iv()]
        .into_iter()
        .flatten()
        .collect();
    if vols.is_empty() {
        None
    } else {
        Some(vols.iter().sum::<f64>() / vols.len() as f64)
    }
}

fn implied_move(price: Decimal, iv: f64, days: u32, factor: f64) -> Option<Decimal> {
    let value = price.to_f64()? * iv * (f64::from(days) / 365.0).sqrt() * factor;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Decimal::from_f64(value).map(|em| em.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn chain() -> ExpirationChain {
        let mut chain = ExpirationChain::new(30);
        chain.puts = vec![
            OptionQuote::new(dec!(95), dec!(0.40), dec!(0.50)),
            OptionQuote::new(dec!(100), dec!(1.90), dec!(2.10)).with_iv(0.40),
            OptionQuote::new(dec!(105), dec!(5.00), dec!(5.40)),
        ];
        chain.calls = vec![
            OptionQuote::new(dec!(95), dec!(5.10), dec!(5.50)),
            OptionQuote::new(dec!(100), dec!(1.95), dec!(2.05)).with_iv(0.44),
            OptionQuote::new(dec!(105), dec!(0.50), dec!(0.60)),
        ];
        chain
    }

    #[test]
    fn prefers_implied_move() {
        let em = estimate_expected_move(dec!(100), 30, &chain(), &StrangleConfig::default())
            .unwrap();
        assert_eq!(em.em_straddle, dec!(4.00));
        let iv = em.atm_iv.unwrap();
        assert!((iv - 0.42).abs() < 1e-12);
        // 100 * 0.42 * sqrt(30/365) = 12.04
        assert_eq!(em.em_implied, Some(dec!(12.04)));
        assert_eq!(em.em_effective, dec!(12.04));
    }

    #[test]
    fn falls_back_to_straddle_without_vols() {
        let mut chain = chain();
        chain.puts[1].implied_volatility = None;
        chain.calls[1].implied_volatility = Some(f64::NAN);
        let em = estimate_expected_move(dec!(100), 30, &chain, &StrangleConfig::default())
            .unwrap();
        assert_eq!(em.atm_iv, None);
        assert_eq!(em.em_implied, None);
        assert_eq!(em.em_effective, dec!(4.00));
    }

    #[test]
    fn zero_days_falls_back_to_straddle() {
        let em =
            estimate_expected_move(dec!(100), 0, &chain(), &StrangleConfig::default()).unwrap();
        assert_eq!(em.em_implied, Some(dec!(0)));
        assert_eq!(em.em_effective, em.em_straddle);
    }

    #[test]
    fn weighted_straddles() {
        let mut chain = chain();
        for quote in chain.puts.iter_mut().chain(chain.calls.iter_mut()) {
            quote.implied_volatility = None;
        }
        let config = StrangleConfig {
            straddle_weights: vec![dec!(0.6), dec!(0.3), dec!(0.1)],
            ..StrangleConfig::default()
        };
        let em = estimate_expected_move(dec!(100), 30, &chain, &config).unwrap();
        // 0.6 * 4.00 + 0.3 * (0.45 + 0.55), third ring missing
        assert_eq!(em.em_straddle, dec!(2.70));
    }

    #[test]
    fn missing_atm_quote() {
        let mut chain = chain();
        chain.calls[1].bid = None;
        let err = estimate_expected_move(dec!(100), 30, &chain, &StrangleConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            ExpectedMoveError::MissingAtmQuote {
                side: OptionRight::Call
            }
        );
    }

    #[test]
    fn empty_ladder_is_missing_atm() {
        let mut chain = chain();
        chain.puts.clear();
        assert!(matches!(
            estimate_expected_move(dec!(100), 30, &chain, &StrangleConfig::default()),
            Err(ExpectedMoveError::MissingAtmQuote {
                side: OptionRight::Put
            })
        ));
    }
}
