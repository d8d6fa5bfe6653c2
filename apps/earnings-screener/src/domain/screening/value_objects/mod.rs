//! Screening value objects.

mod candidate;
mod company_name;
mod diagnostic;
mod earnings_record;
mod expiration;
mod strangle_config;
mod strike;

pub use candidate::{EarningsCandidate, EarningsTiming};
pub use company_name::clean_company_name;
pub use diagnostic::{Diagnostic, DiagnosticSeverity};
pub use earnings_record::EarningsRecord;
pub use expiration::Expiration;
pub use strangle_config::{MAX_DTE_LIMIT, StrangleConfig};
pub use strike::Strike;
