//! Strangle Evaluator Domain Service
//!
//! Turns one option-chain snapshot into an [`EarningsRecord`]:
//!
//! 1. Select the terms within `max_dte`
//! 2. Estimate the expected move per term
//! 3. Place the short put and call around it
//! 4. Annotate liquidity and pricing problems
//!
//! Evaluation never fails. Anything that cannot be computed becomes a
//! diagnostic on the record or on the affected term.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use super::expected_move::{ExpectedMoveError, estimate_expected_move};
use super::expiration_selector::{TermCandidate, select_expirations};
use super::strike_selector::{StrikeSelectionError, select_strike, strangle_targets};
use super::tradeability::{annotate_expiration, annotate_record};
use crate::domain::chain::{ChainSnapshot, OptionRight};
use crate::domain::screening::value_objects::{
    Diagnostic, EarningsCandidate, EarningsRecord, Expiration, StrangleConfig, Strike,
};

/// Evaluates earnings candidates for short strangles.
#[derive(Debug, Clone, Default)]
pub struct StrangleEvaluator {
    config: StrangleConfig,
}

impl StrangleEvaluator {
    /// Create an evaluator with the given limits.
    #[must_use]
    pub const fn new(config: StrangleConfig) -> Self {
        Self { config }
    }

    /// Screening limits in use.
    #[must_use]
    pub const fn config(&self) -> &StrangleConfig {
        &self.config
    }

    /// Evaluate one candidate against its chain snapshot.
    #[must_use]
    pub fn evaluate(
        &self,
        candidate: &EarningsCandidate,
        snapshot: &ChainSnapshot,
        evaluated_at: DateTime<Utc>,
    ) -> EarningsRecord {
        let span = tracing::debug_span!("evaluate", symbol = %candidate.symbol);
        let _enter = span.enter();

        if let Err(e) = snapshot.validate() {
            debug!(error = %e, "Snapshot rejected");
            return EarningsRecord::failed(
                candidate,
                Diagnostic::InvalidSnapshot {
                    message: e.to_string(),
                },
                evaluated_at,
            );
        }

        let underlying = &snapshot.underlying;
        let mut record = EarningsRecord {
            symbol: candidate.symbol.clone(),
            name: snapshot.description.clone(),
            price: underlying.last,
            year_high: underlying.high_52w,
            year_low: underlying.low_52w,
            percent_change: underlying.percent_change,
            volume: underlying.volume,
            quote_time: underlying.quote_time,
            timing: candidate.timing,
            success: true,
            diagnostics: Vec::new(),
            expirations: Vec::new(),
            evaluated_at,
        };

        let terms = select_expirations(&snapshot.expirations, &self.config);
        if terms.is_empty() {
            record.diagnostics.push(Diagnostic::NoExpirations {
                max_dte: self.config.max_dte,
            });
        }

        record.expirations = terms
            .iter()
            .map(|term| self.evaluate_term(snapshot, term))
            .collect();

        annotate_record(&mut record, &self.config);

        debug!(
            terms = record.expirations.len(),
            priced = record.expirations.iter().filter(|x| x.has_both_legs()).count(),
            diagnostics = record.all_diagnostics().count(),
            tradeable = record.is_tradeable(),
            "Evaluated"
        );

        record
    }

    fn evaluate_term(&self, snapshot: &ChainSnapshot, term: &TermCandidate<'_>) -> Expiration {
        let mut expiration = Expiration::new(term.date, term.days, term.is_regular);
        let price = snapshot.price();

        let em = match estimate_expected_move(price, term.days, term.chain, &self.config) {
            Ok(em) => em,
            Err(ExpectedMoveError::MissingAtmQuote { side }) => {
                debug!(expiration = %term.date, %side, "No ATM quote");
                expiration
                    .diagnostics
                    .push(Diagnostic::MissingAtmData { side });
                return expiration;
            }
        };

        expiration.atm_iv = em.atm_iv;
        expiration.em_straddle = Some(em.em_straddle);
        expiration.em_implied = em.em_implied;
        expiration.em_effective = Some(em.em_effective);
        expiration.em = Some(em.em_effective);

        let (put_target, call_target) =
            strangle_targets(price, em.em_effective, self.config.width());

        let put = self.select_side(&mut expiration, term, OptionRight::Put, price, put_target);
        let call = self.select_side(&mut expiration, term, OptionRight::Call, price, call_target);
        expiration.put = put;
        expiration.call = call;

        if let (Some(put), Some(call)) = (&expiration.put, &expiration.call) {
            expiration.strangle_credit = Some(put.mark + call.mark);
        }

        annotate_expiration(&mut expiration, &self.config);
        expiration
    }

    fn select_side(
        &self,
        expiration: &mut Expiration,
        term: &TermCandidate<'_>,
        side: OptionRight,
        price: Decimal,
        target: Decimal,
    ) -> Option<Strike> {
        let ladder = term.chain.ladder(side);
        match select_strike(&ladder, side, price, target, self.config.spread_neighbors) {
            Ok(strike) => {
                if strike.delta.is_none() {
                    expiration.diagnostics.push(Diagnostic::MissingDelta { side });
                }
                Some(strike)
            }
            Err(StrikeSelectionError::InsufficientStrikes { side, usable }) => {
                debug!(expiration = %term.date, %side, usable, "Not enough strikes");
                expiration
                    .diagnostics
                    .push(Diagnostic::InsufficientStrikes { side, usable });
                None
            }
        }
    }
}
