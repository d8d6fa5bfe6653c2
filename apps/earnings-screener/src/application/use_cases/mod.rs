//! Application Use Cases

mod screen_earnings;

pub use screen_earnings::{FetchSettings, ScreenEarningsUseCase, ScreeningError};
