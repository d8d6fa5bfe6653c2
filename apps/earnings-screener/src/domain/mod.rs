//! Domain Layer
//!
//! Business logic with zero infrastructure dependencies. Everything here is a
//! pure transform from an option-chain snapshot to an earnings record.
//!
//! # Bounded Contexts
//!
//! - [`chain`]: The option-chain snapshot supplied by a chain fetcher
//! - [`screening`]: Strangle evaluation and diagnostics
//! - [`shared`]: Symbols and domain errors

pub mod chain;
pub mod screening;
pub mod shared;
