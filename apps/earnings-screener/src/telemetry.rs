//! Tracing Setup
//!
//! Console logging through `tracing-subscriber`.
//!
//! # Configuration
//!
//! - `RUST_LOG`: Overrides the filter (e.g. `earnings_screener=debug`)
//! - `observability.logging` in the config file: default level and format
//!
//! # Usage
//!
//! ```rust,ignore
//! use earnings_screener::telemetry::init_tracing;
//!
//! init_tracing(&config.observability.logging)?;
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::config::LoggingConfig;

/// Filter from `RUST_LOG`, falling back to `earnings_screener={level}`.
pub fn env_filter(logging: &LoggingConfig) -> Result<EnvFilter, ParseError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(format!("earnings_screener={}", logging.level)),
    }
}

/// Install the global subscriber.
///
/// Fails if the filter does not parse or a subscriber is already set.
pub fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = env_filter(logging)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(logging.include_target);

    match logging.format.as_str() {
        "json" => builder.json().try_init(),
        "pretty" => builder.pretty().try_init(),
        _ => builder.compact().try_init(),
    }
}
