//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer, plus the file
//! formats the screener reads and writes:
//!
//! - `chain_source/`: `ChainFetcherPort` adapters (JSON snapshot files, in-memory)
//! - `candidates`: Earnings candidate list loader
//! - `report/`: Output directory writer

pub mod candidates;
pub mod chain_source;
pub mod report;
