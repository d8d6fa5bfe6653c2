//! Chain Fetcher Port (Driven Port)
//!
//! Interface for obtaining option-chain snapshots from a provider.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::chain::ChainSnapshot;
use crate::domain::shared::Symbol;

/// Chain fetch error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainFetchError {
    /// Provider has no chain for the symbol.
    #[error("No option chain for {symbol}")]
    NotFound {
        /// The unknown symbol.
        symbol: String,
    },

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Provider reachable but the chain could not be served.
    #[error("Chain data unavailable: {message}")]
    DataUnavailable {
        /// Error details.
        message: String,
    },

    /// Response did not match the snapshot contract.
    #[error("Malformed chain for {symbol}: {message}")]
    Malformed {
        /// Symbol requested.
        symbol: String,
        /// Parse error.
        message: String,
    },

    /// Local I/O failure.
    #[error("I/O error: {message}")]
    Io {
        /// Error details.
        message: String,
    },
}

impl ChainFetchError {
    /// Whether waiting and retrying can succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::DataUnavailable { .. })
    }

    /// Provider-requested wait, in seconds.
    #[must_use]
    pub const fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

/// Port for fetching option chains.
///
/// Implementations return every expiration up to and including `through`.
#[async_trait]
pub trait ChainFetcherPort: Send + Sync {
    /// Fetch the chain snapshot for one underlying.
    async fn fetch_chain(
        &self,
        symbol: &Symbol,
        through: NaiveDate,
    ) -> Result<ChainSnapshot, ChainFetchError>;
}
