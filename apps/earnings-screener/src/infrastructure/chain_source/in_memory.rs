//! In-memory chain source for tests and dry runs.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::application::ports::{ChainFetchError, ChainFetcherPort};
use crate::domain::chain::ChainSnapshot;
use crate::domain::shared::Symbol;

/// Chain source backed by a map of snapshots.
///
/// Can be scripted to fail a symbol permanently or to rate-limit its first
/// few requests.
#[derive(Debug, Default)]
pub struct InMemoryChainSource {
    snapshots: HashMap<Symbol, ChainSnapshot>,
    failures: HashMap<Symbol, ChainFetchError>,
    rate_limits: Mutex<HashMap<Symbol, (u32, u64)>>,
    calls: Mutex<HashMap<Symbol, u32>>,
}

impl InMemoryChainSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `snapshot` for its symbol.
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: ChainSnapshot) -> Self {
        self.snapshots.insert(snapshot.symbol.clone(), snapshot);
        self
    }

    /// Always fail `symbol` with `error`.
    #[must_use]
    pub fn with_failure(mut self, symbol: impl Into<Symbol>, error: ChainFetchError) -> Self {
        self.failures.insert(symbol.into(), error);
        self
    }

    /// Rate-limit the first `count` requests for `symbol`.
    #[must_use]
    pub fn with_rate_limits(
        self,
        symbol: impl Into<Symbol>,
        count: u32,
        retry_after_secs: u64,
    ) -> Self {
        self.rate_limits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol.into(), (count, retry_after_secs));
        self
    }

    /// Requests seen for `symbol`.
    #[must_use]
    pub fn call_count(&self, symbol: &Symbol) -> u32 {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(symbol)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ChainFetcherPort for InMemoryChainSource {
    async fn fetch_chain(
        &self,
        symbol: &Symbol,
        through: NaiveDate,
    ) -> Result<ChainSnapshot, ChainFetchError> {
        *self
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(symbol.clone())
            .or_insert(0) += 1;

        {
            let mut rate_limits = self
                .rate_limits
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some((remaining, retry_after_secs)) = rate_limits.get_mut(symbol) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(ChainFetchError::RateLimited {
                        retry_after_secs: *retry_after_secs,
                    });
                }
            }
        }

        if let Some(error) = self.failures.get(symbol) {
            return Err(error.clone());
        }

        self.snapshots
            .get(symbol)
            .map(|snapshot| snapshot.clone().through(through))
            .ok_or_else(|| ChainFetchError::NotFound {
                symbol: symbol.to_string(),
            })
    }
}
