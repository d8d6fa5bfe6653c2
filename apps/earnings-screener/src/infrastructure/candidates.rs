//! Earnings candidate list loading.
//!
//! The list is a JSON array of `{"symbol": "NFLX", "timing": "AMC"}` objects,
//! as produced by the calendar scraper. A comma-separated symbol list is
//! accepted for ad hoc runs.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::domain::screening::{EarningsCandidate, EarningsTiming};

/// Candidate list error.
#[derive(Debug, Error)]
pub enum CandidateError {
    /// File could not be read.
    #[error("Failed to read candidates from {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File is not a candidate list.
    #[error("Failed to parse candidates: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load candidates from a JSON file.
pub async fn load_candidates(path: &Path) -> Result<Vec<EarningsCandidate>, CandidateError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CandidateError::Io {
            path: path.display().to_string(),
            source,
        })?;
    parse_candidates(&contents)
}

/// Parse a JSON candidate list, dropping invalid and repeated symbols.
pub fn parse_candidates(json: &str) -> Result<Vec<EarningsCandidate>, CandidateError> {
    let candidates: Vec<EarningsCandidate> = serde_json::from_str(json)?;
    Ok(dedup_valid(candidates))
}

/// Candidates from `"NFLX, tsla,AAPL"` with unknown timing.
#[must_use]
pub fn parse_symbol_list(list: &str) -> Vec<EarningsCandidate> {
    dedup_valid(
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| EarningsCandidate::new(s, EarningsTiming::Unknown))
            .collect(),
    )
}

fn dedup_valid(candidates: Vec<EarningsCandidate>) -> Vec<EarningsCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| match c.symbol.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(symbol = %c.symbol, error = %e, "Skipping candidate");
                false
            }
        })
        .filter(|c| seen.insert(c.symbol.clone()))
        .collect()
}
