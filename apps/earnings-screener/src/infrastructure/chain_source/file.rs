//! File-backed chain source.
//!
//! Reads `{dir}/{SYMBOL}.json` snapshots written by an upstream downloader.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::application::ports::{ChainFetchError, ChainFetcherPort};
use crate::domain::chain::ChainSnapshot;
use crate::domain::shared::Symbol;

/// Chain source reading JSON snapshots from a directory.
#[derive(Debug, Clone)]
pub struct FileChainSource {
    dir: PathBuf,
}

impl FileChainSource {
    /// Create a source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, symbol: &Symbol) -> PathBuf {
        self.dir.join(format!("{symbol}.json"))
    }
}

#[async_trait]
impl ChainFetcherPort for FileChainSource {
    async fn fetch_chain(
        &self,
        symbol: &Symbol,
        through: NaiveDate,
    ) -> Result<ChainSnapshot, ChainFetchError> {
        symbol.validate().map_err(|e| ChainFetchError::Malformed {
            symbol: symbol.to_string(),
            message: e.to_string(),
        })?;

        let path = self.path_for(symbol);
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ChainFetchError::NotFound {
                    symbol: symbol.to_string(),
                },
                _ => ChainFetchError::Io {
                    message: format!("{}: {e}", path.display()),
                },
            })?;

        let snapshot: ChainSnapshot =
            serde_json::from_str(&contents).map_err(|e| ChainFetchError::Malformed {
                symbol: symbol.to_string(),
                message: e.to_string(),
            })?;

        if snapshot.symbol != *symbol {
            return Err(ChainFetchError::Malformed {
                symbol: symbol.to_string(),
                message: format!("file contains {}", snapshot.symbol),
            });
        }

        Ok(snapshot.through(through))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "symbol": "ACME",
        "description": "Acme Corp",
        "underlying": {"last": 42.5, "volume": 300000},
        "expirations": {
            "2026-11-20": {"days_to_expiration": 32},
            "2027-01-15": {"days_to_expiration": 88}
        }
    }"#;

    fn through() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 12, 3).unwrap()
    }

    #[tokio::test]
    async fn reads_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ACME.json"), SNAPSHOT).unwrap();

        let source = FileChainSource::new(dir.path());
        let snap = source
            .fetch_chain(&Symbol::new("acme"), through())
            .await
            .unwrap();
        assert_eq!(snap.description, "Acme Corp");
        assert_eq!(snap.expirations.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileChainSource::new(dir.path());
        assert!(matches!(
            source.fetch_chain(&Symbol::new("ZZZ"), through()).await,
            Err(ChainFetchError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn bad_json_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ACME.json"), "{not json").unwrap();
        let source = FileChainSource::new(dir.path());
        let err = source
            .fetch_chain(&Symbol::new("ACME"), through())
            .await
            .unwrap_err();
        assert!(matches!(err, ChainFetchError::Malformed { .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn rejects_mismatched_symbol() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("OTHER.json"), SNAPSHOT).unwrap();
        let source = FileChainSource::new(dir.path());
        assert!(matches!(
            source.fetch_chain(&Symbol::new("OTHER"), through()).await,
            Err(ChainFetchError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn rejects_path_like_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileChainSource::new(dir.path());
        assert!(matches!(
            source.fetch_chain(&Symbol::new("../etc"), through()).await,
            Err(ChainFetchError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn window_ending_on_thursday_keeps_it_weekly() {
        use crate::domain::screening::StrangleConfig;
        use crate::domain::screening::services::select_expirations;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ACME.json"),
            r#"{
                "symbol": "ACME",
                "underlying": {"last": 42.5},
                "expirations": {
                    "2026-10-23": {"days_to_expiration": 4},
                    "2026-11-19": {"days_to_expiration": 31},
                    "2026-11-20": {"days_to_expiration": 32}
                }
            }"#,
        )
        .unwrap();

        let source = FileChainSource::new(dir.path());
        let snap = source
            .fetch_chain(&Symbol::new("ACME"), NaiveDate::from_ymd_opt(2026, 11, 19).unwrap())
            .await
            .unwrap();
        let config = StrangleConfig {
            max_dte: 31,
            ..StrangleConfig::default()
        };
        let terms = select_expirations(&snap.expirations, &config);
        let tagged: Vec<(NaiveDate, bool)> = terms.iter().map(|t| (t.date, t.is_regular)).collect();
        assert_eq!(
            tagged,
            vec![(NaiveDate::from_ymd_opt(2026, 10, 23).unwrap(), false)]
        );
    }
}
