//! Screening domain services.

mod aggregator;
mod evaluator;
pub mod expected_move;
pub mod expiration_selector;
pub mod strike_selector;
pub mod tradeability;

pub use aggregator::{EarningsList, ScreeningSummary};
pub use evaluator::StrangleEvaluator;
pub use expected_move::{ExpectedMove, ExpectedMoveError, estimate_expected_move};
pub use expiration_selector::{TermCandidate, select_expirations};
pub use strike_selector::{StrikeSelectionError, select_strike, strangle_targets};
