//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for interacting with chain providers
//! - **Use Cases**: The screening run
//! - **Retry**: Backoff for transient provider failures

pub mod ports;
pub mod retry;
pub mod use_cases;

pub use ports::*;
pub use retry::{ExponentialBackoffCalculator, FetchRetryPolicy};
pub use use_cases::*;
