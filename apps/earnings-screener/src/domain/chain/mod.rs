//! Option Chain Bounded Context
//!
//! The snapshot a chain fetcher hands to the evaluator: the underlying quote
//! and, per expiration date, the put and call strike ladders.

mod calendar;
mod quote;
mod snapshot;

pub use calendar::is_monthly_expiration;
pub use quote::{OptionQuote, OptionRight};
pub use snapshot::{ChainSnapshot, ExpirationChain, UnderlyingQuote};
