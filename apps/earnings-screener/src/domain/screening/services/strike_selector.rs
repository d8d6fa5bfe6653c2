//! Strike Selector Domain Service
//!
//! Places each short leg at the strike nearest `price ± em * width` and
//! reads its quote metrics.

use std::cmp::Reverse;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

use crate::domain::chain::{OptionQuote, OptionRight};
use crate::domain::screening::value_objects::Strike;

/// Why a side could not be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StrikeSelectionError {
    /// Fewer than two usable out-of-the-money strikes.
    #[error("only {usable} usable {side} strikes")]
    InsufficientStrikes {
        /// Side that was short of strikes.
        side: OptionRight,
        /// Usable strikes found.
        usable: usize,
    },
}

/// Put and call target prices, rounded to cents.
#[must_use]
pub fn strangle_targets(price: Decimal, em: Decimal, width: Decimal) -> (Decimal, Decimal) {
    let offset = em * width;
    ((price - offset).round_dp(2), (price + offset).round_dp(2))
}

/// Select the strike nearest `target` on one side of `price`.
///
/// `ladder` is the full side ladder in ascending strike order. Only quotes
/// with a two-sided market strictly out of the money are candidates. Ties
/// go to the strike farther from the price.
pub fn select_strike(
    ladder: &[&OptionQuote],
    side: OptionRight,
    price: Decimal,
    target: Decimal,
    spread_neighbors: usize,
) -> Result<Strike, StrikeSelectionError> {
    let candidates: Vec<&OptionQuote> = ladder
        .iter()
        .copied()
        .filter(|q| q.is_usable() && is_out_of_the_money(side, q.strike, price))
        .collect();

    let insufficient = StrikeSelectionError::InsufficientStrikes {
        side,
        usable: candidates.len(),
    };
    if candidates.len() < 2 {
        return Err(insufficient);
    }

    let Some((index, quote)) = candidates.iter().enumerate().min_by_key(|(_, q)| {
        (
            (q.strike - target).abs(),
            Reverse((q.strike - price).abs()),
        )
    }) else {
        return Err(insufficient);
    };
    let Some((bid, ask)) = quote.two_sided() else {
        return Err(insufficient);
    };

    let (delta, delta_interpolated) = match quote.finite_delta() {
        Some(delta) => (Some(delta), false),
        None => {
            let interpolated = interpolate_delta(ladder, quote.strike);
            (interpolated, interpolated.is_some())
        }
    };

    Ok(Strike {
        strike: quote.strike,
        target,
        delta,
        delta_interpolated,
        size_bid: quote.bid_size,
        size_ask: quote.ask_size,
        spread: ask - bid,
        spread_frac: local_spread_fraction(&candidates, index, spread_neighbors),
        mark: (bid + ask) / Decimal::TWO,
    })
}

fn is_out_of_the_money(side: OptionRight, strike: Decimal, price: Decimal) -> bool {
    match side {
        OptionRight::Put => strike < price,
        OptionRight::Call => strike > price,
    }
}

/// Linear interpolation between the nearest strikes on either side that
/// carry a delta.
fn interpolate_delta(ladder: &[&OptionQuote], strike: Decimal) -> Option<f64> {
    let (lower_strike, lower_delta) = ladder
        .iter()
        .rev()
        .filter(|q| q.strike < strike)
        .find_map(|q| q.finite_delta().map(|d| (q.strike, d)))?;
    let (upper_strike, upper_delta) = ladder
        .iter()
        .filter(|q| q.strike > strike)
        .find_map(|q| q.finite_delta().map(|d| (q.strike, d)))?;

    let t = ((strike - lower_strike) / (upper_strike - lower_strike)).to_f64()?;
    Some(lower_delta + t * (upper_delta - lower_delta))
}

/// Mean spread/mark over `neighbors` candidates either side of `index`.
fn local_spread_fraction(candidates: &[&OptionQuote], index: usize, neighbors: usize) -> Decimal {
    let lo = index.saturating_sub(neighbors);
    let hi = index.saturating_add(neighbors).min(candidates.len() - 1);

    let fractions: Vec<Decimal> = candidates[lo..=hi]
        .iter()
        .filter_map(|q| q.spread_fraction())
        .collect();
    if fractions.is_empty() {
        return Decimal::ZERO;
    }
    (fractions.iter().sum::<Decimal>() / Decimal::from(fractions.len())).round_dp(4)
}
