// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Earnings Screener - Rust Core Library
//!
//! Screens names with imminent earnings announcements for short strangles.
//!
//! # Architecture
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure evaluation logic, no I/O
//!   - `chain`: Option-chain snapshot contract
//!   - `screening`: Expiration selection, expected move, strike selection,
//!     tradeability diagnostics and the per-symbol evaluator
//!
//! - **Application**: Orchestration
//!   - `ports`: `ChainFetcherPort` for snapshot providers
//!   - `use_cases`: `ScreenEarningsUseCase` (fetch, evaluate, aggregate)
//!   - `retry`: Backoff for rate-limited fetches
//!
//! - **Infrastructure**: Adapters
//!   - `chain_source`: File-backed and in-memory snapshot providers
//!   - `candidates`: Earnings candidate list loader
//!   - `report`: Output writer

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - Core evaluation logic with no I/O.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Configuration loading and validation.
pub mod config;

/// Tracing subscriber setup.
pub mod telemetry;

// Domain re-exports
pub use domain::chain::{ChainSnapshot, ExpirationChain, OptionQuote, OptionRight, UnderlyingQuote};
pub use domain::screening::{
    Diagnostic, DiagnosticSeverity, EarningsCandidate, EarningsList, EarningsRecord,
    EarningsTiming, Expiration, StrangleConfig, StrangleEvaluator, Strike,
};
pub use domain::shared::{DomainError, Symbol};

// Application re-exports
pub use application::ports::{ChainFetchError, ChainFetcherPort};
pub use application::use_cases::{FetchSettings, ScreenEarningsUseCase, ScreeningError};

// Infrastructure re-exports
pub use infrastructure::chain_source::{FileChainSource, InMemoryChainSource};
pub use infrastructure::report::ReportWriter;
