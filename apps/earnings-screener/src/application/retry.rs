//! Retry policy with exponential backoff for chain fetches.
//!
//! Only retryable [`ChainFetchError`]s are retried. A rate-limit response
//! waits at least as long as the provider asked.
//!
//! # Example
//!
//! ```rust,ignore
//! use earnings_screener::application::retry::{ExponentialBackoffCalculator, FetchRetryPolicy};
//!
//! let policy = FetchRetryPolicy::default();
//! let mut backoff = ExponentialBackoffCalculator::new(&policy);
//!
//! let delay1 = backoff.next_backoff(); // ~250ms with jitter
//! let delay2 = backoff.next_backoff(); // ~500ms with jitter
//! ```

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::application::ports::ChainFetchError;

/// Retry policy for chain fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchRetryPolicy {
    /// Retries after the first attempt (default: 4).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Initial backoff in milliseconds (default: 250).
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Backoff ceiling in milliseconds (default: 30000).
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Growth per attempt (default: 2.0).
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    /// Randomization, ±fraction of the delay (default: 0.2).
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

impl Default for FetchRetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter_factor: default_jitter_factor(),
        }
    }
}

const fn default_max_attempts() -> u32 {
    4
}
const fn default_initial_backoff_ms() -> u64 {
    250
}
const fn default_max_backoff_ms() -> u64 {
    30_000
}
const fn default_backoff_multiplier() -> f64 {
    2.0
}
const fn default_jitter_factor() -> f64 {
    0.2
}

impl FetchRetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 0,
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
            backoff_multiplier: 1.0,
            jitter_factor: 0.0,
        }
    }
}

/// Calculator for exponential backoff with jitter.
#[derive(Debug)]
pub struct ExponentialBackoffCalculator {
    current_attempt: u32,
    max_attempts: u32,
    initial_backoff_ms: u64,
    max_backoff_ms: u64,
    backoff_multiplier: f64,
    jitter_factor: f64,
}

impl ExponentialBackoffCalculator {
    /// Create a new backoff calculator from a retry policy.
    #[must_use]
    pub const fn new(policy: &FetchRetryPolicy) -> Self {
        Self {
            current_attempt: 0,
            max_attempts: policy.max_attempts,
            initial_backoff_ms: policy.initial_backoff_ms,
            max_backoff_ms: policy.max_backoff_ms,
            backoff_multiplier: policy.backoff_multiplier,
            jitter_factor: policy.jitter_factor,
        }
    }

    /// Next backoff with jitter, or `None` once attempts are used up.
    pub fn next_backoff(&mut self) -> Option<Duration> {
        if self.current_attempt >= self.max_attempts {
            return None;
        }

        let base_backoff_ms = self.calculate_base_backoff_ms();
        let jittered_ms = self.apply_jitter(base_backoff_ms);
        let capped_ms = jittered_ms.min(self.max_backoff_ms);

        self.current_attempt += 1;

        Some(Duration::from_millis(capped_ms))
    }

    /// Delay before retrying after `error`, or `None` to give up.
    pub fn delay_for(&mut self, error: &ChainFetchError) -> Option<Duration> {
        if !error.is_retryable() {
            return None;
        }
        let backoff = self.next_backoff()?;
        let requested = Duration::from_secs(error.retry_after_secs().unwrap_or(0));
        Some(backoff.max(requested))
    }

    fn calculate_base_backoff_ms(&self) -> u64 {
        let multiplier = self.backoff_multiplier.powi(self.current_attempt as i32);
        let backoff = (self.initial_backoff_ms as f64 * multiplier) as u64;
        backoff.min(self.max_backoff_ms)
    }

    /// Random value in `[backoff * (1 - jitter), backoff * (1 + jitter)]`.
    fn apply_jitter(&self, backoff_ms: u64) -> u64 {
        if self.jitter_factor <= 0.0 || backoff_ms == 0 {
            return backoff_ms;
        }
        let mut rng = rand::rng();
        let jitter_range = backoff_ms as f64 * self.jitter_factor;
        let min = (backoff_ms as f64 - jitter_range).max(0.0);
        let max = backoff_ms as f64 + jitter_range;

        rng.random_range(min..=max) as u64
    }

    /// Retries handed out so far.
    #[must_use]
    pub const fn current_attempt(&self) -> u32 {
        self.current_attempt
    }

    /// Check if more retries are available.
    #[must_use]
    pub const fn has_remaining_attempts(&self) -> bool {
        self.current_attempt < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_jitter() -> FetchRetryPolicy {
        FetchRetryPolicy {
            jitter_factor: 0.0,
            ..FetchRetryPolicy::default()
        }
    }

    #[test]
    fn exponential_sequence() {
        let mut backoff = ExponentialBackoffCalculator::new(&no_jitter());
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(250)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(500)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(1000)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(2000)));
        assert!(backoff.next_backoff().is_none());
        assert!(!backoff.has_remaining_attempts());
    }

    #[test]
    fn capped_at_max_backoff() {
        let policy = FetchRetryPolicy {
            max_attempts: 5,
            initial_backoff_ms: 1_000,
            max_backoff_ms: 5_000,
            backoff_multiplier: 10.0,
            jitter_factor: 0.0,
        };
        let mut backoff = ExponentialBackoffCalculator::new(&policy);
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(1)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(5)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn jitter_stays_in_range() {
        let policy = FetchRetryPolicy::default();
        for _ in 0..100 {
            let mut backoff = ExponentialBackoffCalculator::new(&policy);
            let d = backoff.next_backoff().unwrap();
            assert!(d >= Duration::from_millis(200) && d <= Duration::from_millis(300));
        }
    }

    #[test]
    fn rate_limit_waits_at_least_retry_after() {
        let mut backoff = ExponentialBackoffCalculator::new(&no_jitter());
        let delay = backoff.delay_for(&ChainFetchError::RateLimited {
            retry_after_secs: 3,
        });
        assert_eq!(delay, Some(Duration::from_secs(3)));
        assert_eq!(backoff.current_attempt(), 1);
    }

    #[test]
    fn permanent_errors_are_not_retried() {
        let mut backoff = ExponentialBackoffCalculator::new(&no_jitter());
        let delay = backoff.delay_for(&ChainFetchError::NotFound {
            symbol: "ZZZ".to_string(),
        });
        assert_eq!(delay, None);
        assert_eq!(backoff.current_attempt(), 0);
    }

    #[test]
    fn none_policy_never_retries() {
        let mut backoff = ExponentialBackoffCalculator::new(&FetchRetryPolicy::none());
        assert_eq!(
            backoff.delay_for(&ChainFetchError::RateLimited {
                retry_after_secs: 0
            }),
            None
        );
    }
}
