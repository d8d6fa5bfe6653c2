//! Chain snapshot value objects.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OptionQuote, OptionRight, is_monthly_expiration};
use crate::domain::shared::{DomainError, Symbol};

/// Underlying stock quote at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderlyingQuote {
    /// Last traded price.
    pub last: Decimal,
    /// 52-week high.
    #[serde(default)]
    pub high_52w: Decimal,
    /// 52-week low.
    #[serde(default)]
    pub low_52w: Decimal,
    /// Percent change on the day.
    #[serde(default)]
    pub percent_change: f64,
    /// Shares traded on the day.
    #[serde(default)]
    pub volume: u64,
    /// Quote timestamp.
    #[serde(default)]
    pub quote_time: Option<DateTime<Utc>>,
}

/// Put and call ladders for one expiration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpirationChain {
    /// Calendar days until expiration.
    pub days_to_expiration: u32,
    /// Provider's monthly-cycle flag, when it supplies one.
    #[serde(default)]
    pub regular: Option<bool>,
    /// Put strikes.
    #[serde(default)]
    pub puts: Vec<OptionQuote>,
    /// Call strikes.
    #[serde(default)]
    pub calls: Vec<OptionQuote>,
}

impl ExpirationChain {
    /// Create an empty chain for a term.
    #[must_use]
    pub const fn new(days_to_expiration: u32) -> Self {
        Self {
            days_to_expiration,
            regular: None,
            puts: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Ladder for one side, sorted by ascending strike.
    #[must_use]
    pub fn ladder(&self, right: OptionRight) -> Vec<&OptionQuote> {
        let quotes = match right {
            OptionRight::Put => &self.puts,
            OptionRight::Call => &self.calls,
        };
        let mut ladder: Vec<&OptionQuote> = quotes.iter().collect();
        ladder.sort_by(|a, b| a.strike.cmp(&b.strike));
        ladder
    }
}

/// Option chain for one underlying as handed over by a chain fetcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Underlying symbol.
    pub symbol: Symbol,
    /// Company description.
    #[serde(default)]
    pub description: String,
    /// Underlying quote.
    pub underlying: UnderlyingQuote,
    /// Ladders keyed by expiration date.
    #[serde(default)]
    pub expirations: BTreeMap<NaiveDate, ExpirationChain>,
}

impl ChainSnapshot {
    /// Underlying price used for all evaluations.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.underlying.last
    }

    /// Drop expirations after `through`.
    ///
    /// Kept terms without a provider `regular` flag are tagged from the full
    /// listing first, so the cut cannot change what counts as monthly.
    #[must_use]
    pub fn through(mut self, through: NaiveDate) -> Self {
        let monthly: Vec<(NaiveDate, bool)> = self
            .expirations
            .range(..=through)
            .filter(|(_, chain)| chain.regular.is_none())
            .map(|(date, _)| (*date, is_monthly_expiration(*date, &self.expirations)))
            .collect();
        for (date, regular) in monthly {
            if let Some(chain) = self.expirations.get_mut(&date) {
                chain.regular = Some(regular);
            }
        }
        self.expirations.retain(|date, _| *date <= through);
        self
    }

    /// Check the snapshot is fit for evaluation.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying price is not positive, or a strike is
    /// not positive.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.underlying.last <= Decimal::ZERO {
            return Err(DomainError::invalid_value(
                "underlying.last",
                format!("price must be positive, got {}", self.underlying.last),
            ));
        }

        for (date, chain) in &self.expirations {
            let bad = chain
                .puts
                .iter()
                .chain(chain.calls.iter())
                .find(|q| q.strike <= Decimal::ZERO);
            if let Some(quote) = bad {
                return Err(DomainError::InvariantViolation {
                    invariant: "strikes are positive".to_string(),
                    state: format!("{date}: strike {}", quote.strike),
                });
            }
        }

        Ok(())
    }
}
