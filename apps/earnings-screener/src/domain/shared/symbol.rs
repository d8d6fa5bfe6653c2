//! Symbol value object for underlying tickers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DomainError;

/// An equity ticker.
///
/// Examples: "AAPL", "MSFT", "BRK.B"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new Symbol.
    ///
    /// The symbol is trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_uppercase())
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Validate the symbol as a file-safe ticker.
    ///
    /// # Errors
    ///
    /// Returns error if symbol is empty, too long or contains characters
    /// other than alphanumerics, `.` and `-`.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::invalid_value("symbol", "Symbol cannot be empty"));
        }

        if self.0.len() > 10 {
            return Err(DomainError::invalid_value(
                "symbol",
                "Symbol exceeds maximum length",
            ));
        }

        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
        {
            return Err(DomainError::invalid_value(
                "symbol",
                "Symbol contains invalid characters",
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_normalized_uppercase() {
        let sym = Symbol::new(" aapl ");
        assert_eq!(sym.as_str(), "AAPL");
    }

    #[test]
    fn symbol_validate_ok() {
        assert!(Symbol::new("AAPL").validate().is_ok());
        assert!(Symbol::new("BRK.B").validate().is_ok());
    }

    #[test]
    fn symbol_validate_empty() {
        assert!(Symbol::new("").validate().is_err());
    }

    #[test]
    fn symbol_validate_path_traversal() {
        assert!(Symbol::new("../etc").validate().is_err());
    }

    #[test]
    fn symbol_serde_transparent() {
        let sym = Symbol::new("msft");
        let json = serde_json::to_string(&sym).unwrap();
        assert_eq!(json, "\"MSFT\"");
    }
}
