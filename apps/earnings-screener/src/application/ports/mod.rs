//! Application Ports (Driven)
//!
//! Ports define how the application reaches external systems.

mod chain_fetcher_port;

pub use chain_fetcher_port::{ChainFetchError, ChainFetcherPort};
