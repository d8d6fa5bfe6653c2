//! Shared Kernel
//!
//! Types shared across bounded contexts.

mod errors;
mod symbol;

pub use errors::DomainError;
pub use symbol::Symbol;
