//! Strangle screening parameters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::DomainError;

/// Thresholds and tuning for one screening run.
///
/// Built once at startup and shared read-only by every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrangleConfig {
    /// Maximum days to expiration for a term to be considered.
    #[serde(default = "default_max_dte")]
    pub max_dte: u32,
    /// Maximum absolute delta for either short strike.
    #[serde(default = "default_max_delta")]
    pub max_delta: f64,
    /// Minimum daily share volume of the underlying.
    #[serde(default = "default_volume_threshold")]
    pub volume_threshold: u64,
    /// Minimum credit for the strangle (put mark + call mark).
    #[serde(default = "default_min_strangle_credit")]
    pub min_strangle_credit: Decimal,
    /// Maximum spread as a fraction of the option mark.
    #[serde(default = "default_max_spread_frac")]
    pub max_spread_frac: Decimal,
    /// Minimum contracts on both bid and ask.
    #[serde(default = "default_min_size")]
    pub min_size: u32,
    /// Strike distance from price in multiples of the expected move.
    #[serde(default = "default_strangle_em_width")]
    pub strangle_em_width: Decimal,
    /// Neighbouring strikes on each side averaged into `spread_frac`.
    #[serde(default = "default_spread_neighbors")]
    pub spread_neighbors: usize,
    /// Weights of concentric straddles in the straddle estimate, ATM first.
    #[serde(default = "default_straddle_weights")]
    pub straddle_weights: Vec<Decimal>,
    /// Scale applied to the implied-volatility move (1.0 = one standard deviation).
    #[serde(default = "default_implied_move_factor")]
    pub implied_move_factor: f64,
    /// Keep every term within `max_dte` instead of front + monthly terms.
    #[serde(default)]
    pub include_weeklies: bool,
}

impl Default for StrangleConfig {
    fn default() -> Self {
        Self {
            max_dte: default_max_dte(),
            max_delta: default_max_delta(),
            volume_threshold: default_volume_threshold(),
            min_strangle_credit: default_min_strangle_credit(),
            max_spread_frac: default_max_spread_frac(),
            min_size: default_min_size(),
            strangle_em_width: default_strangle_em_width(),
            spread_neighbors: default_spread_neighbors(),
            straddle_weights: default_straddle_weights(),
            implied_move_factor: default_implied_move_factor(),
            include_weeklies: false,
        }
    }
}

/// Largest accepted `max_dte`; no listed option runs past ten years.
pub const MAX_DTE_LIMIT: u32 = 3650;

const fn default_max_dte() -> u32 {
    45
}
const fn default_max_delta() -> f64 {
    0.16
}
const fn default_volume_threshold() -> u64 {
    200_000
}
fn default_min_strangle_credit() -> Decimal {
    Decimal::new(50, 2)
}
fn default_max_spread_frac() -> Decimal {
    Decimal::new(15, 2)
}
const fn default_min_size() -> u32 {
    10
}
fn default_strangle_em_width() -> Decimal {
    Decimal::new(22, 1)
}
const fn default_spread_neighbors() -> usize {
    1
}
fn default_straddle_weights() -> Vec<Decimal> {
    vec![Decimal::ONE]
}
const fn default_implied_move_factor() -> f64 {
    1.0
}

impl StrangleConfig {
    /// Strike width as a Decimal multiplier of the expected move.
    #[must_use]
    pub const fn width(&self) -> Decimal {
        self.strangle_em_width
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range parameter.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_dte > MAX_DTE_LIMIT {
            return Err(DomainError::invalid_value(
                "max_dte",
                format!("must be at most {MAX_DTE_LIMIT}, got {}", self.max_dte),
            ));
        }
        if !(self.max_delta.is_finite() && self.max_delta > 0.0 && self.max_delta <= 1.0) {
            return Err(DomainError::invalid_value(
                "max_delta",
                format!("must be in (0, 1], got {}", self.max_delta),
            ));
        }
        if self.strangle_em_width <= Decimal::ZERO {
            return Err(DomainError::invalid_value(
                "strangle_em_width",
                "must be positive",
            ));
        }
        if self.min_strangle_credit < Decimal::ZERO {
            return Err(DomainError::invalid_value(
                "min_strangle_credit",
                "cannot be negative",
            ));
        }
        if self.max_spread_frac <= Decimal::ZERO {
            return Err(DomainError::invalid_value(
                "max_spread_frac",
                "must be positive",
            ));
        }
        if self.straddle_weights.is_empty() {
            return Err(DomainError::invalid_value(
                "straddle_weights",
                "needs at least the ATM weight",
            ));
        }
        if self.straddle_weights.iter().any(|w| *w < Decimal::ZERO) {
            return Err(DomainError::invalid_value(
                "straddle_weights",
                "weights cannot be negative",
            ));
        }
        if !(self.implied_move_factor.is_finite() && self.implied_move_factor > 0.0) {
            return Err(DomainError::invalid_value(
                "implied_move_factor",
                "must be a positive number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_are_valid() {
        assert!(StrangleConfig::default().validate().is_ok());
    }

    #[test]
    fn default_width() {
        assert_eq!(StrangleConfig::default().width(), dec!(2.2));
    }

    #[test]
    fn rejects_zero_width() {
        let config = StrangleConfig {
            strangle_em_width: Decimal::ZERO,
            ..StrangleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_weights() {
        let config = StrangleConfig {
            straddle_weights: vec![dec!(0.6), dec!(-0.3)],
            ..StrangleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_delta_above_one() {
        let config = StrangleConfig {
            max_delta: 1.5,
            ..StrangleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_max_dte_past_limit() {
        let config = StrangleConfig {
            max_dte: 200_000_000,
            ..StrangleConfig::default()
        };
        assert!(config.validate().is_err());

        let config = StrangleConfig {
            max_dte: MAX_DTE_LIMIT,
            ..StrangleConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let config: StrangleConfig = serde_yaml_bw::from_str("max_dte: 30\nmin_size: 5\n").unwrap();
        assert_eq!(config.max_dte, 30);
        assert_eq!(config.min_size, 5);
        assert_eq!(config.volume_threshold, 200_000);
        assert_eq!(config.straddle_weights, vec![Decimal::ONE]);
    }
}
