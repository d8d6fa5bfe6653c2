//! Chain fetch configuration.

use serde::{Deserialize, Serialize};

use crate::application::retry::FetchRetryPolicy;
use crate::application::use_cases::FetchSettings;

/// Where chains and candidates come from, and how hard to push the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Directory of `{SYMBOL}.json` chain snapshots.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,
    /// JSON list of earnings candidates.
    #[serde(default = "default_candidates_file")]
    pub candidates_file: String,
    /// Fetches in flight at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Backoff for rate-limited fetches.
    #[serde(default)]
    pub retry: FetchRetryPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
            candidates_file: default_candidates_file(),
            concurrency: default_concurrency(),
            retry: FetchRetryPolicy::default(),
        }
    }
}

impl FetchConfig {
    /// Settings for the screening use case.
    #[must_use]
    pub fn settings(&self) -> FetchSettings {
        FetchSettings {
            concurrency: self.concurrency,
            retry: self.retry.clone(),
        }
    }
}

fn default_snapshot_dir() -> String {
    "chains".to_string()
}

fn default_candidates_file() -> String {
    "candidates.json".to_string()
}

const fn default_concurrency() -> usize {
    4
}
