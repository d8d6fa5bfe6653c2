//! Per-underlying screening result.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Diagnostic, EarningsCandidate, EarningsTiming, Expiration, clean_company_name};
use crate::domain::shared::Symbol;

/// Screening result for one underlying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsRecord {
    /// Underlying symbol.
    pub symbol: Symbol,
    /// Company name as reported by the chain provider.
    pub name: String,
    /// Underlying price.
    pub price: Decimal,
    /// 52-week high.
    pub year_high: Decimal,
    /// 52-week low.
    pub year_low: Decimal,
    /// Percent change on the day.
    pub percent_change: f64,
    /// Shares traded on the day.
    pub volume: u64,
    /// Quote timestamp.
    pub quote_time: Option<DateTime<Utc>>,
    /// Announcement timing.
    pub timing: EarningsTiming,
    /// Whether the chain was fetched and evaluated.
    pub success: bool,
    /// Record-level annotations.
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
    /// Evaluated terms, nearest first.
    #[serde(default)]
    pub expirations: Vec<Expiration>,
    /// When the evaluation ran.
    pub evaluated_at: DateTime<Utc>,
}

impl EarningsRecord {
    /// Record for a name whose chain could not be obtained or evaluated.
    #[must_use]
    pub fn failed(
        candidate: &EarningsCandidate,
        diagnostic: Diagnostic,
        evaluated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: candidate.symbol.clone(),
            name: String::new(),
            price: Decimal::ZERO,
            year_high: Decimal::ZERO,
            year_low: Decimal::ZERO,
            percent_change: 0.0,
            volume: 0,
            quote_time: None,
            timing: candidate.timing,
            success: false,
            diagnostics: vec![diagnostic],
            expirations: Vec::new(),
            evaluated_at,
        }
    }

    /// Company name without listing boilerplate.
    #[must_use]
    pub fn clean_name(&self) -> String {
        clean_company_name(&self.name)
    }

    /// Evaluated, no record-level diagnostics, and at least one clean term.
    #[must_use]
    pub fn is_tradeable(&self) -> bool {
        self.success
            && self.diagnostics.is_empty()
            && self.expirations.iter().any(Expiration::is_clean)
    }

    /// Every diagnostic on the record and its terms.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .chain(self.expirations.iter().flat_map(|x| x.diagnostics.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candidate() -> EarningsCandidate {
        EarningsCandidate::new("acme", EarningsTiming::AfterClose)
    }

    #[test]
    fn failed_record_shape() {
        let record = EarningsRecord::failed(
            &candidate(),
            Diagnostic::FetchFailed {
                message: "timeout".to_string(),
            },
            Utc::now(),
        );
        assert!(!record.success);
        assert!(record.expirations.is_empty());
        assert_eq!(record.diagnostics.len(), 1);
        assert!(!record.is_tradeable());
    }

    #[test]
    fn tradeable_needs_one_clean_term() {
        let mut record = EarningsRecord::failed(
            &candidate(),
            Diagnostic::NoExpirations { max_dte: 45 },
            Utc::now(),
        );
        record.success = true;
        record.diagnostics.clear();

        let date = NaiveDate::from_ymd_opt(2026, 11, 20).unwrap();
        let mut dirty = Expiration::new(date, 32, true);
        dirty.diagnostics.push(Diagnostic::NoExpirations { max_dte: 45 });
        record.expirations.push(dirty);
        assert!(!record.is_tradeable());

        record.expirations.push(Expiration::new(date, 32, true));
        assert!(record.is_tradeable());
        assert_eq!(record.all_diagnostics().count(), 1);
    }
}
