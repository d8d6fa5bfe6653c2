//! Earnings Screener Binary
//!
//! Screens the day's earnings candidates for short strangles and writes the
//! report.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin earnings-screener
//! ```
//!
//! # Environment Variables
//!
//! - `SCREENER_CONFIG`: Config file path (default: `screener.yaml` if present)
//! - `SCREENER_SYMBOLS`: Comma-separated symbols, overriding the candidates file
//! - `RUST_LOG`: Log filter (default: `earnings_screener=<logging.level>`)

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use chrono::Utc;
use earnings_screener::config::{Config, load_config, load_config_from_string};
use earnings_screener::infrastructure::candidates::{load_candidates, parse_symbol_list};
use earnings_screener::telemetry::init_tracing;
use earnings_screener::{
    EarningsCandidate, FileChainSource, ReportWriter, ScreenEarningsUseCase, StrangleEvaluator,
};

/// Config file used when `SCREENER_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "screener.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = read_config()?;
    init_tracing(&config.observability.logging).map_err(|e| anyhow!(e))?;

    tracing::info!(
        max_dte = config.screening.max_dte,
        snapshot_dir = %config.fetch.snapshot_dir,
        output_dir = %config.output.dir,
        "Starting earnings screener"
    );

    let candidates = read_candidates(&config).await?;
    if candidates.is_empty() {
        tracing::warn!("No earnings candidates to screen");
    }

    let use_case = ScreenEarningsUseCase::new(
        Arc::new(FileChainSource::new(&config.fetch.snapshot_dir)),
        StrangleEvaluator::new(config.screening.clone()),
        config.fetch.settings(),
    );
    let list = use_case
        .execute(&candidates, Utc::now())
        .await
        .context("screening candidates")?;

    for record in list.tradeable() {
        tracing::info!(
            symbol = %record.symbol,
            name = %record.clean_name(),
            timing = %record.timing,
            price = %record.price,
            "Tradeable"
        );
    }

    let writer = ReportWriter::new(&config.output.dir);
    writer
        .write(&list, config.output.write_config.then_some(&config))
        .await
        .context("writing report")?;

    let summary = list.summary();
    tracing::info!(
        total = summary.total,
        tradeable = summary.tradeable,
        failed = summary.failed,
        warnings = summary.warnings,
        errors = summary.errors,
        "Earnings screener finished"
    );
    Ok(())
}

/// Load the config named by `SCREENER_CONFIG`, the default file, or defaults.
fn read_config() -> anyhow::Result<Config> {
    if let Ok(path) = std::env::var("SCREENER_CONFIG") {
        return load_config(Some(&path)).with_context(|| format!("loading {path}"));
    }
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return load_config(Some(DEFAULT_CONFIG_PATH))
            .with_context(|| format!("loading {DEFAULT_CONFIG_PATH}"));
    }
    load_config_from_string("").context("building default config")
}

/// Candidates from `SCREENER_SYMBOLS`, else the configured candidates file.
async fn read_candidates(config: &Config) -> anyhow::Result<Vec<EarningsCandidate>> {
    if let Ok(symbols) = std::env::var("SCREENER_SYMBOLS") {
        let candidates = parse_symbol_list(&symbols);
        tracing::info!(count = candidates.len(), "Candidates from SCREENER_SYMBOLS");
        return Ok(candidates);
    }

    let path = Path::new(&config.fetch.candidates_file);
    let candidates = load_candidates(path).await?;
    tracing::info!(count = candidates.len(), path = %path.display(), "Candidates loaded");
    Ok(candidates)
}
