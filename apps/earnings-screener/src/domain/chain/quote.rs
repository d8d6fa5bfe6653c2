//! Per-strike option quote.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Option right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionRight {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Quote for one strike of one side of a chain.
///
/// Bid/ask are optional because providers report missing quotes as nulls.
/// Greeks follow the same rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Strike price.
    pub strike: Decimal,
    /// Best bid.
    #[serde(default)]
    pub bid: Option<Decimal>,
    /// Best ask.
    #[serde(default)]
    pub ask: Option<Decimal>,
    /// Contracts on the bid.
    #[serde(default)]
    pub bid_size: u32,
    /// Contracts on the ask.
    #[serde(default)]
    pub ask_size: u32,
    /// Delta as reported by the provider.
    #[serde(default)]
    pub delta: Option<f64>,
    /// Implied volatility as a fraction (0.45 = 45%).
    #[serde(default)]
    pub implied_volatility: Option<f64>,
}

impl OptionQuote {
    /// Create a quote with a two-sided market and no greeks.
    #[must_use]
    pub const fn new(strike: Decimal, bid: Decimal, ask: Decimal) -> Self {
        Self {
            strike,
            bid: Some(bid),
            ask: Some(ask),
            bid_size: 0,
            ask_size: 0,
            delta: None,
            implied_volatility: None,
        }
    }

    /// Set bid/ask sizes.
    #[must_use]
    pub const fn with_sizes(mut self, bid_size: u32, ask_size: u32) -> Self {
        self.bid_size = bid_size;
        self.ask_size = ask_size;
        self
    }

    /// Set the provider delta.
    #[must_use]
    pub const fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }

    /// Set the implied volatility.
    #[must_use]
    pub const fn with_iv(mut self, iv: f64) -> Self {
        self.implied_volatility = Some(iv);
        self
    }

    /// Bid and ask when the market is two-sided and not crossed.
    ///
    /// A zero bid is accepted (far OTM options often have none); a zero ask
    /// is not.
    #[must_use]
    pub fn two_sided(&self) -> Option<(Decimal, Decimal)> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) if bid >= Decimal::ZERO && ask > Decimal::ZERO && ask >= bid => {
                Some((bid, ask))
            }
            _ => None,
        }
    }

    /// Whether this strike can be traded off its quote.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.two_sided().is_some()
    }

    /// Mid price.
    #[must_use]
    pub fn mark(&self) -> Option<Decimal> {
        self.two_sided()
            .map(|(bid, ask)| (bid + ask) / Decimal::TWO)
    }

    /// Ask minus bid.
    #[must_use]
    pub fn spread(&self) -> Option<Decimal> {
        self.two_sided().map(|(bid, ask)| ask - bid)
    }

    /// Spread as a fraction of the mark.
    #[must_use]
    pub fn spread_fraction(&self) -> Option<Decimal> {
        let (bid, ask) = self.two_sided()?;
        let mark = (bid + ask) / Decimal::TWO;
        if mark.is_zero() {
            return None;
        }
        Some((ask - bid) / mark)
    }

    /// Provider delta, ignoring non-finite values.
    #[must_use]
    pub fn finite_delta(&self) -> Option<f64> {
        self.delta.filter(|d| d.is_finite())
    }

    /// Implied volatility, ignoring non-finite and non-positive values.
    #[must_use]
    pub fn finite_iv(&self) -> Option<f64> {
        self.implied_volatility
            .filter(|iv| iv.is_finite() && *iv > 0.0)
    }
}
