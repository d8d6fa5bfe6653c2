//! Domain errors for the screener.

use std::fmt;

/// Domain-level errors that can occur while validating inputs.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Snapshot invariant violated.
    InvariantViolation {
        /// Invariant that was violated.
        invariant: String,
        /// Current state description.
        state: String,
    },
}

impl DomainError {
    /// Shorthand for [`DomainError::InvalidValue`].
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::InvariantViolation { invariant, state } => {
                write!(f, "Invariant violated: {invariant} (state: {state})")
            }
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_value() {
        let err = DomainError::invalid_value("price", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'price': must be positive"
        );
    }

    #[test]
    fn display_invariant_violation() {
        let err = DomainError::InvariantViolation {
            invariant: "strikes sorted".to_string(),
            state: "duplicate 100".to_string(),
        };
        assert!(err.to_string().contains("strikes sorted"));
    }
}
