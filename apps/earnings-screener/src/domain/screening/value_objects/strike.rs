//! One side of a strangle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Selected strike with its quote metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    /// Strike price.
    pub strike: Decimal,
    /// Target price derived from the expected move.
    pub target: Decimal,
    /// Delta at the strike (provider or interpolated).
    pub delta: Option<f64>,
    /// Whether `delta` was interpolated from neighbouring strikes.
    #[serde(default)]
    pub delta_interpolated: bool,
    /// Contracts on the bid.
    pub size_bid: u32,
    /// Contracts on the ask.
    pub size_ask: u32,
    /// Ask minus bid.
    pub spread: Decimal,
    /// Mean spread/mark over the local strike window.
    pub spread_frac: Decimal,
    /// Mid price.
    pub mark: Decimal,
}

impl Strike {
    /// Smaller of the bid and ask sizes.
    #[must_use]
    pub fn min_size(&self) -> u32 {
        self.size_bid.min(self.size_ask)
    }
}
