//! Evaluation of one option term.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Diagnostic, Strike};

/// Strangle evaluation for one expiration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expiration {
    /// Expiration date.
    pub date: NaiveDate,
    /// Calendar days to expiration.
    pub days: u32,
    /// Standard monthly cycle date.
    pub is_regular: bool,
    /// Put mark + call mark, when both sides were selected.
    pub strangle_credit: Option<Decimal>,
    /// Mean of the ATM put and call implied vols.
    pub atm_iv: Option<f64>,
    /// Expected move from straddle prices.
    pub em_straddle: Option<Decimal>,
    /// Expected move from ATM implied vol.
    pub em_implied: Option<Decimal>,
    /// Expected move picked from the two estimates.
    pub em_effective: Option<Decimal>,
    /// Expected move used for strike targets.
    pub em: Option<Decimal>,
    /// Short put.
    pub put: Option<Strike>,
    /// Short call.
    pub call: Option<Strike>,
    /// Annotations for this term.
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Expiration {
    /// Create an unevaluated term.
    #[must_use]
    pub const fn new(date: NaiveDate, days: u32, is_regular: bool) -> Self {
        Self {
            date,
            days,
            is_regular,
            strangle_credit: None,
            atm_iv: None,
            em_straddle: None,
            em_implied: None,
            em_effective: None,
            em: None,
            put: None,
            call: None,
            diagnostics: Vec::new(),
        }
    }

    /// Whether the term carries no diagnostics at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Whether both legs were selected.
    #[must_use]
    pub const fn has_both_legs(&self) -> bool {
        self.put.is_some() && self.call.is_some()
    }
}
