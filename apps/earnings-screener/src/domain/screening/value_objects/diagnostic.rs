//! Typed evaluation diagnostics.
//!
//! Diagnostics never reject a name; they annotate it. Errors mean some value
//! could not be computed, warnings mean a computed value breaks a threshold.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::chain::OptionRight;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticSeverity {
    /// Some value could not be computed.
    Error,
    /// A computed value breaks a threshold.
    Warning,
}

/// One annotation on a record or an expiration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The chain could not be fetched.
    FetchFailed {
        /// Fetcher error message.
        message: String,
    },

    /// The chain was fetched but cannot be evaluated.
    InvalidSnapshot {
        /// Validation message.
        message: String,
    },

    /// No term within the day-count ceiling.
    NoExpirations {
        /// Configured ceiling.
        max_dte: u32,
    },

    /// No quoted at-the-money strike on one side.
    MissingAtmData {
        /// Side without an ATM quote.
        side: OptionRight,
    },

    /// Fewer than two usable strikes on one side.
    InsufficientStrikes {
        /// Side of the strangle.
        side: OptionRight,
        /// Usable strikes found.
        usable: usize,
    },

    /// No delta at the strike and none to interpolate from.
    MissingDelta {
        /// Side of the strangle.
        side: OptionRight,
    },

    /// Underlying volume below threshold.
    LowVolume {
        /// Configured minimum.
        threshold: u64,
        /// Observed volume.
        actual: u64,
    },

    /// Short strike delta above threshold.
    DeltaTooHigh {
        /// Side of the strangle.
        side: OptionRight,
        /// Observed delta.
        delta: f64,
        /// Configured maximum (absolute).
        max_delta: f64,
    },

    /// Strangle credit below threshold.
    CreditsTooLow {
        /// Put mark + call mark.
        credit: Decimal,
        /// Configured minimum.
        min_credit: Decimal,
    },

    /// Local spread fraction above threshold.
    SpreadTooWide {
        /// Side of the strangle.
        side: OptionRight,
        /// Observed local spread fraction.
        spread_frac: Decimal,
        /// Configured maximum.
        max_spread_frac: Decimal,
    },

    /// Not enough contracts on the bid or ask.
    SizeTooThin {
        /// Side of the strangle.
        side: OptionRight,
        /// Contracts on the bid.
        bid_size: u32,
        /// Contracts on the ask.
        ask_size: u32,
        /// Configured minimum.
        min_size: u32,
    },
}

impl Diagnostic {
    /// Severity of this diagnostic.
    #[must_use]
    pub const fn severity(&self) -> DiagnosticSeverity {
        match self {
            Self::FetchFailed { .. }
            | Self::InvalidSnapshot { .. }
            | Self::NoExpirations { .. }
            | Self::MissingAtmData { .. }
            | Self::InsufficientStrikes { .. }
            | Self::MissingDelta { .. } => DiagnosticSeverity::Error,

            Self::LowVolume { .. }
            | Self::DeltaTooHigh { .. }
            | Self::CreditsTooLow { .. }
            | Self::SpreadTooWide { .. }
            | Self::SizeTooThin { .. } => DiagnosticSeverity::Warning,
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::FetchFailed { .. } => "FETCH_FAILED",
            Self::InvalidSnapshot { .. } => "INVALID_SNAPSHOT",
            Self::NoExpirations { .. } => "NO_EXPIRATIONS",
            Self::MissingAtmData { .. } => "MISSING_ATM_DATA",
            Self::InsufficientStrikes { .. } => "INSUFFICIENT_STRIKES",
            Self::MissingDelta { .. } => "MISSING_DELTA",
            Self::LowVolume { .. } => "LOW_VOLUME",
            Self::DeltaTooHigh { .. } => "DELTA_TOO_HIGH",
            Self::CreditsTooLow { .. } => "CREDITS_TOO_LOW",
            Self::SpreadTooWide { .. } => "SPREAD_TOO_WIDE",
            Self::SizeTooThin { .. } => "SIZE_TOO_THIN",
        }
    }

    /// Short human label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FetchFailed { .. } => "fetch failed",
            Self::InvalidSnapshot { .. } => "invalid snapshot",
            Self::NoExpirations { .. } => "no expirations",
            Self::MissingAtmData { .. } => "missing ATM data",
            Self::InsufficientStrikes { .. } => "insufficient strikes",
            Self::MissingDelta { .. } => "missing delta",
            Self::LowVolume { .. } => "low volume",
            Self::DeltaTooHigh { .. } => "delta too high",
            Self::CreditsTooLow { .. } => "credits too low",
            Self::SpreadTooWide { .. } => "spread too wide",
            Self::SizeTooThin { .. } => "size too thin",
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity() {
            DiagnosticSeverity::Error => "ERROR",
            DiagnosticSeverity::Warning => "WARNING",
        };
        write!(f, "{severity}: {}", self.label())?;
        match self {
            Self::FetchFailed { message } | Self::InvalidSnapshot { message } => {
                write!(f, " ({message})")
            }
            Self::NoExpirations { max_dte } => write!(f, " (none within {max_dte} days)"),
            Self::MissingAtmData { side } | Self::MissingDelta { side } => {
                write!(f, " on {side}")
            }
            Self::InsufficientStrikes { side, usable } => {
                write!(f, " on {side} ({usable} usable)")
            }
            Self::LowVolume { threshold, actual } => write!(f, " ({actual} < {threshold})"),
            Self::DeltaTooHigh {
                side,
                delta,
                max_delta,
            } => write!(f, " on {side} (|{delta:.2}| > {max_delta})"),
            Self::CreditsTooLow { credit, min_credit } => {
                write!(f, " ({credit} < {min_credit})")
            }
            Self::SpreadTooWide {
                side,
                spread_frac,
                max_spread_frac,
            } => write!(f, " on {side} ({spread_frac} > {max_spread_frac})"),
            Self::SizeTooThin {
                side,
                bid_size,
                ask_size,
                min_size,
            } => write!(f, " on {side} ({bid_size} x {ask_size}, min {min_size})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn severity_split() {
        assert_eq!(
            Diagnostic::MissingAtmData {
                side: OptionRight::Put
            }
            .severity(),
            DiagnosticSeverity::Error
        );
        assert_eq!(
            Diagnostic::LowVolume {
                threshold: 200_000,
                actual: 150_000
            }
            .severity(),
            DiagnosticSeverity::Warning
        );
    }

    #[test]
    fn display_low_volume() {
        let d = Diagnostic::LowVolume {
            threshold: 200_000,
            actual: 150_000,
        };
        assert_eq!(d.to_string(), "WARNING: low volume (150000 < 200000)");
    }

    #[test]
    fn display_size_too_thin() {
        let d = Diagnostic::SizeTooThin {
            side: OptionRight::Call,
            bid_size: 3,
            ask_size: 40,
            min_size: 10,
        };
        assert_eq!(
            d.to_string(),
            "WARNING: size too thin on CALL (3 x 40, min 10)"
        );
    }

    #[test]
    fn serializes_tagged() {
        let d = Diagnostic::CreditsTooLow {
            credit: dec!(0.35),
            min_credit: dec!(0.50),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "credits_too_low");
        assert_eq!(d.code(), "CREDITS_TOO_LOW");
    }
}
