//! Expiration Selector Domain Service
//!
//! Picks the option terms worth evaluating for an earnings trade: the front
//! term (which usually straddles the announcement) and the standard monthly
//! terms after it.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::chain::{ExpirationChain, is_monthly_expiration};
use crate::domain::screening::value_objects::StrangleConfig;

/// A term selected for evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermCandidate<'a> {
    /// Expiration date.
    pub date: NaiveDate,
    /// Calendar days to expiration.
    pub days: u32,
    /// Standard monthly cycle date.
    pub is_regular: bool,
    /// Ladders for the term.
    pub chain: &'a ExpirationChain,
}

/// Select the terms to evaluate, nearest first.
///
/// Every returned term has `days <= config.max_dte`. The front term is always
/// kept; after it only monthly terms, unless weeklies are enabled.
#[must_use]
pub fn select_expirations<'a>(
    expirations: &'a BTreeMap<NaiveDate, ExpirationChain>,
    config: &StrangleConfig,
) -> Vec<TermCandidate<'a>> {
    expirations
        .iter()
        .filter(|(_, chain)| chain.days_to_expiration <= config.max_dte)
        .map(|(date, chain)| TermCandidate {
            date: *date,
            days: chain.days_to_expiration,
            is_regular: chain
                .regular
                .unwrap_or_else(|| is_monthly_expiration(*date, expirations)),
            chain,
        })
        .enumerate()
        .filter(|(index, term)| *index == 0 || term.is_regular || config.include_weeklies)
        .map(|(_, term)| term)
        .collect()
}
