//! Validation error types

use thiserror::Error;

/// Validation error for domain records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Numeric field must be strictly greater than zero
    #[error("{field} must be greater than 0 (got {value})")]
    NotPositive { field: &'static str, value: i64 },

    /// String doesn't parse into the expected shape
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Value parses but the derived result cannot be represented
    #[error("{field} is out of range")]
    OutOfRange { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::NotPositive {
            field: "seats",
            value: 0,
        };
        assert_eq!(err.to_string(), "seats must be greater than 0 (got 0)");

        let err = ValidationError::Empty {
            field: "customer_name",
        };
        assert_eq!(err.to_string(), "customer_name cannot be empty");
    }
}
