//! Configuration module for the earnings screener.
//!
//! YAML configuration with `${VAR}` / `${VAR:-default}` environment
//! interpolation. Every field has a default, so an empty file is a valid
//! configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use earnings_screener::config::load_config;
//!
//! let config = load_config(Some("screener.yaml"))?;
//! println!("max DTE: {}", config.screening.max_dte);
//! ```

mod fetch;
mod observability;
mod output;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fetch::FetchConfig;
pub use observability::{LOG_FORMATS, LOG_LEVELS, LoggingConfig, ObservabilityConfig};
pub use output::OutputConfig;

use crate::domain::screening::StrangleConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Strangle screening limits.
    #[serde(default)]
    pub screening: StrangleConfig,
    /// Chain and candidate sources.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Report output.
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file (default: `screener.yaml`).
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("screener.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Serialize the effective configuration.
pub fn to_yaml(config: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml_bw::to_string(config)?)
}

/// Replace `${VAR}` and `${VAR:-default}` with environment values.
///
/// Unset or empty variables take the default, or the empty string.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    config
        .screening
        .validate()
        .map_err(|e| ConfigError::ValidationError(format!("screening: {e}")))?;

    if config.fetch.concurrency == 0 {
        return Err(ConfigError::ValidationError(
            "fetch.concurrency must be at least 1".to_string(),
        ));
    }

    if config.fetch.snapshot_dir.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "fetch.snapshot_dir must be set".to_string(),
        ));
    }

    let retry = &config.fetch.retry;
    if !(0.0..=1.0).contains(&retry.jitter_factor) {
        return Err(ConfigError::ValidationError(
            "fetch.retry.jitter_factor must be between 0.0 and 1.0".to_string(),
        ));
    }
    if !(retry.backoff_multiplier.is_finite() && retry.backoff_multiplier >= 1.0) {
        return Err(ConfigError::ValidationError(
            "fetch.retry.backoff_multiplier must be at least 1.0".to_string(),
        ));
    }
    if retry.initial_backoff_ms > retry.max_backoff_ms {
        return Err(ConfigError::ValidationError(
            "fetch.retry.initial_backoff_ms exceeds max_backoff_ms".to_string(),
        ));
    }

    if config.output.dir.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "output.dir must be set".to_string(),
        ));
    }

    let logging = &config.observability.logging;
    if !LOG_LEVELS.contains(&logging.level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.level must be one of: {LOG_LEVELS:?}"
        )));
    }
    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}
