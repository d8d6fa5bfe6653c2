//! Report output.
//!
//! Writes one screening run to a directory:
//!
//! | File | Contents |
//! |------|----------|
//! | `earnings-all.json` | Every record, in input order |
//! | `earnings.json` | Tradeable records only |
//! | `symbols.txt` | Watchlist, one symbol per line |
//! | `config.yaml` | Effective configuration (optional) |

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::{Config, ConfigError, to_yaml};
use crate::domain::screening::{EarningsList, EarningsRecord};

/// All records.
pub const ALL_RECORDS_FILE: &str = "earnings-all.json";
/// Tradeable records.
pub const TRADEABLE_FILE: &str = "earnings.json";
/// Watchlist.
pub const WATCHLIST_FILE: &str = "symbols.txt";
/// Effective configuration.
pub const CONFIG_FILE: &str = "config.yaml";

/// Report writing error.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem failure.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Path being written.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding failure.
    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration encoding failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Writes screening reports into a directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer for `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the report, returning the files written.
    pub async fn write(
        &self,
        list: &EarningsList,
        config: Option<&Config>,
    ) -> Result<Vec<PathBuf>, ReportError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ReportError::Io {
                path: self.dir.display().to_string(),
                source,
            })?;

        let tradeable: Vec<&EarningsRecord> = list.tradeable().collect();
        let watchlist: String = list
            .watchlist()
            .iter()
            .map(|symbol| format!("{symbol}\n"))
            .collect();

        let mut written = vec![
            self.write_file(ALL_RECORDS_FILE, serde_json::to_string_pretty(list)?)
                .await?,
            self.write_file(TRADEABLE_FILE, serde_json::to_string_pretty(&tradeable)?)
                .await?,
            self.write_file(WATCHLIST_FILE, watchlist).await?,
        ];
        if let Some(config) = config {
            written.push(self.write_file(CONFIG_FILE, to_yaml(config)?).await?);
        }

        info!(
            dir = %self.dir.display(),
            records = list.len(),
            tradeable = tradeable.len(),
            "Report written"
        );

        Ok(written)
    }

    async fn write_file(&self, name: &str, contents: String) -> Result<PathBuf, ReportError> {
        let path = self.dir.join(name);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|source| ReportError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::domain::screening::{Diagnostic, EarningsCandidate, EarningsTiming, Expiration};

    fn list() -> EarningsList {
        let failed = EarningsRecord::failed(
            &EarningsCandidate::new("BBB", EarningsTiming::BeforeOpen),
            Diagnostic::FetchFailed {
                message: "timeout".to_string(),
            },
            Utc::now(),
        );
        let mut good = EarningsRecord::failed(
            &EarningsCandidate::new("AAA", EarningsTiming::AfterClose),
            Diagnostic::FetchFailed {
                message: String::new(),
            },
            Utc::now(),
        );
        good.success = true;
        good.diagnostics.clear();
        good.expirations.push(Expiration::new(
            NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
            32,
            true,
        ));
        EarningsList::new(vec![good, failed])
    }

    #[tokio::test]
    async fn writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("run"));

        let written = writer.write(&list(), Some(&Config::default())).await.unwrap();
        assert_eq!(written.len(), 4);

        let all: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("run").join(ALL_RECORDS_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(all.as_array().map(Vec::len), Some(2));

        let tradeable: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("run").join(TRADEABLE_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(tradeable[0]["symbol"], "AAA");
        assert_eq!(tradeable.as_array().map(Vec::len), Some(1));

        let symbols =
            std::fs::read_to_string(dir.path().join("run").join(WATCHLIST_FILE)).unwrap();
        assert_eq!(symbols, "AAA\n");
    }

    #[tokio::test]
    async fn config_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        let written = writer.write(&list(), None).await.unwrap();
        assert_eq!(written.len(), 3);
        assert!(!dir.path().join(CONFIG_FILE).exists());
    }
}
