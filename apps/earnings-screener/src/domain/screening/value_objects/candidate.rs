//! Earnings candidate input.

use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// When the company reports relative to the trading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EarningsTiming {
    /// Before market open.
    #[serde(rename = "BMO")]
    BeforeOpen,
    /// After market close.
    #[serde(rename = "AMC")]
    AfterClose,
    /// Timing not published.
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl std::fmt::Display for EarningsTiming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BeforeOpen => write!(f, "BMO"),
            Self::AfterClose => write!(f, "AMC"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A name reporting earnings in the screening window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsCandidate {
    /// Underlying symbol.
    pub symbol: Symbol,
    /// Announcement timing.
    #[serde(default)]
    pub timing: EarningsTiming,
}

impl EarningsCandidate {
    /// Create a new candidate.
    pub fn new(symbol: impl Into<Symbol>, timing: EarningsTiming) -> Self {
        Self {
            symbol: symbol.into(),
            timing,
        }
    }
}
