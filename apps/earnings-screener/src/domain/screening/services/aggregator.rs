//! Ordered collection of screening results.

use serde::{Deserialize, Serialize};

use crate::domain::screening::value_objects::{DiagnosticSeverity, EarningsRecord};
use crate::domain::shared::Symbol;

/// Screening results in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EarningsList {
    records: Vec<EarningsRecord>,
}

/// Counts for a screening run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningSummary {
    /// Names screened.
    pub total: usize,
    /// Names whose chain was fetched and evaluated.
    pub evaluated: usize,
    /// Names that could not be evaluated.
    pub failed: usize,
    /// Names with at least one clean term.
    pub tradeable: usize,
    /// Warnings across all records and terms.
    pub warnings: usize,
    /// Errors across all records and terms.
    pub errors: usize,
}

impl EarningsList {
    /// Wrap records that are already in input order.
    #[must_use]
    pub const fn new(records: Vec<EarningsRecord>) -> Self {
        Self { records }
    }

    /// Collect `(input index, record)` pairs produced in any order.
    #[must_use]
    pub fn from_indexed(mut indexed: Vec<(usize, EarningsRecord)>) -> Self {
        indexed.sort_by_key(|(index, _)| *index);
        Self {
            records: indexed.into_iter().map(|(_, record)| record).collect(),
        }
    }

    /// All records.
    #[must_use]
    pub fn records(&self) -> &[EarningsRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with at least one clean term.
    pub fn tradeable(&self) -> impl Iterator<Item = &EarningsRecord> {
        self.records.iter().filter(|r| r.is_tradeable())
    }

    /// Symbols of the tradeable records, in input order.
    #[must_use]
    pub fn watchlist(&self) -> Vec<Symbol> {
        self.tradeable().map(|r| r.symbol.clone()).collect()
    }

    /// Counts for logging and reporting.
    #[must_use]
    pub fn summary(&self) -> ScreeningSummary {
        let mut summary = ScreeningSummary {
            total: self.records.len(),
            ..ScreeningSummary::default()
        };
        for record in &self.records {
            if record.success {
                summary.evaluated += 1;
            } else {
                summary.failed += 1;
            }
            if record.is_tradeable() {
                summary.tradeable += 1;
            }
            for diagnostic in record.all_diagnostics() {
                match diagnostic.severity() {
                    DiagnosticSeverity::Warning => summary.warnings += 1,
                    DiagnosticSeverity::Error => summary.errors += 1,
                }
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::domain::screening::value_objects::{
        Diagnostic, EarningsCandidate, EarningsTiming, Expiration,
    };

    fn record(symbol: &str, tradeable: bool) -> EarningsRecord {
        let candidate = EarningsCandidate::new(symbol, EarningsTiming::BeforeOpen);
        let mut record = EarningsRecord::failed(
            &candidate,
            Diagnostic::FetchFailed {
                message: "down".to_string(),
            },
            Utc::now(),
        );
        if tradeable {
            record.success = true;
            record.diagnostics.clear();
            record.expirations.push(Expiration::new(
                NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
                32,
                true,
            ));
        }
        record
    }

    #[test]
    fn from_indexed_restores_input_order() {
        let list = EarningsList::from_indexed(vec![
            (2, record("CCC", false)),
            (0, record("AAA", true)),
            (1, record("BBB", true)),
        ]);
        let symbols: Vec<&str> = list.records().iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAA", "BBB", "CCC"]);
    }

    #[test]
    fn watchlist_and_summary() {
        let list = EarningsList::new(vec![
            record("AAA", true),
            record("BBB", false),
            record("CCC", true),
        ]);
        assert_eq!(
            list.watchlist(),
            vec![Symbol::new("AAA"), Symbol::new("CCC")]
        );

        let summary = list.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.evaluated, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.tradeable, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 0);
    }

    #[test]
    fn serializes_as_plain_list() {
        let list = EarningsList::new(vec![record("AAA", false)]);
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["symbol"], "AAA");
    }
}
