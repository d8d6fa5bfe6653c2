//! Screen Earnings Use Case
//!
//! Fetches a chain per candidate with bounded concurrency, retries transient
//! provider failures, then evaluates every snapshot on the rayon pool.
//! Results come back in candidate order.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Days, NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::application::ports::{ChainFetchError, ChainFetcherPort};
use crate::application::retry::{ExponentialBackoffCalculator, FetchRetryPolicy};
use crate::domain::chain::ChainSnapshot;
use crate::domain::screening::{
    Diagnostic, EarningsCandidate, EarningsList, EarningsRecord, StrangleEvaluator,
};
use crate::domain::shared::Symbol;

/// How chains are fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Fetches in flight at once (default: 4).
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Retry policy for transient failures.
    #[serde(default)]
    pub retry: FetchRetryPolicy,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            retry: FetchRetryPolicy::default(),
        }
    }
}

const fn default_concurrency() -> usize {
    4
}

/// Errors that stop a whole screening run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreeningError {
    /// `as_of + max_dte` is past the last representable date.
    #[error("expiration window of {max_dte} days from {as_of} is out of range")]
    WindowOutOfRange {
        /// Run date.
        as_of: NaiveDate,
        /// Configured ceiling.
        max_dte: u32,
    },
}

/// Use case for screening a list of earnings candidates.
pub struct ScreenEarningsUseCase<F>
where
    F: ChainFetcherPort,
{
    fetcher: Arc<F>,
    evaluator: StrangleEvaluator,
    settings: FetchSettings,
}

impl<F> ScreenEarningsUseCase<F>
where
    F: ChainFetcherPort,
{
    /// Create a new ScreenEarningsUseCase.
    pub const fn new(fetcher: Arc<F>, evaluator: StrangleEvaluator, settings: FetchSettings) -> Self {
        Self {
            fetcher,
            evaluator,
            settings,
        }
    }

    /// Screen `candidates` as of `as_of`.
    ///
    /// One record per candidate, in input order. A failed fetch or a
    /// failed evaluation only marks its own record.
    pub async fn execute(
        &self,
        candidates: &[EarningsCandidate],
        as_of: DateTime<Utc>,
    ) -> Result<EarningsList, ScreeningError> {
        let start = Instant::now();
        let max_dte = self.evaluator.config().max_dte;
        let through = as_of
            .date_naive()
            .checked_add_days(Days::new(u64::from(max_dte)))
            .ok_or(ScreeningError::WindowOutOfRange {
                as_of: as_of.date_naive(),
                max_dte,
            })?;

        info!(
            candidates = candidates.len(),
            concurrency = self.settings.concurrency,
            %through,
            "Screening started"
        );

        let fetched: Vec<Result<ChainSnapshot, ChainFetchError>> = stream::iter(candidates)
            .map(|candidate| self.fetch_with_retry(&candidate.symbol, through))
            .buffered(self.settings.concurrency.max(1))
            .collect()
            .await;

        let indexed: Vec<(usize, EarningsRecord)> = candidates
            .par_iter()
            .zip(fetched.par_iter())
            .enumerate()
            .map(|(index, (candidate, result))| {
                let record = match result {
                    Ok(snapshot) => self.evaluate_isolated(candidate, snapshot, as_of),
                    Err(e) => EarningsRecord::failed(
                        candidate,
                        Diagnostic::FetchFailed {
                            message: e.to_string(),
                        },
                        as_of,
                    ),
                };
                (index, record)
            })
            .collect();

        let list = EarningsList::from_indexed(indexed);
        let summary = list.summary();

        info!(
            total = summary.total,
            evaluated = summary.evaluated,
            failed = summary.failed,
            tradeable = summary.tradeable,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Screening complete"
        );

        Ok(list)
    }

    /// Evaluate one snapshot, turning a panic into a failed record.
    fn evaluate_isolated(
        &self,
        candidate: &EarningsCandidate,
        snapshot: &ChainSnapshot,
        as_of: DateTime<Utc>,
    ) -> EarningsRecord {
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.evaluator.evaluate(candidate, snapshot, as_of)
        }))
        .unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            error!(symbol = %candidate.symbol, %message, "Evaluation aborted");
            EarningsRecord::failed(
                candidate,
                Diagnostic::InvalidSnapshot {
                    message: format!("evaluation aborted: {message}"),
                },
                as_of,
            )
        })
    }

    async fn fetch_with_retry(
        &self,
        symbol: &Symbol,
        through: NaiveDate,
    ) -> Result<ChainSnapshot, ChainFetchError> {
        let mut backoff = ExponentialBackoffCalculator::new(&self.settings.retry);
        loop {
            match self.fetcher.fetch_chain(symbol, through).await {
                Ok(snapshot) => {
                    debug!(%symbol, expirations = snapshot.expirations.len(), "Chain fetched");
                    return Ok(snapshot);
                }
                Err(e) => match backoff.delay_for(&e) {
                    Some(delay) => {
                        warn!(
                            %symbol,
                            error = %e,
                            attempt = backoff.current_attempt(),
                            delay_ms = delay.as_millis() as u64,
                            "Chain fetch failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    None => {
                        warn!(%symbol, error = %e, "Chain fetch failed");
                        return Err(e);
                    }
                },
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic".to_string())
}
