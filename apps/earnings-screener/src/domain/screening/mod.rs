//! Screening Bounded Context
//!
//! Evaluates names with an imminent earnings announcement for a short
//! strangle: which terms to trade, how far the market expects the stock to
//! move, where to place the legs, and what is wrong with the resulting
//! trade.

pub mod services;
pub mod value_objects;

pub use services::{EarningsList, ScreeningSummary, StrangleEvaluator};
pub use value_objects::{
    Diagnostic, DiagnosticSeverity, EarningsCandidate, EarningsRecord, EarningsTiming, Expiration,
    StrangleConfig, Strike, clean_company_name,
};
