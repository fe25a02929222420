//! Error types for constrained values
//!
//! Construction of a [`NewType`](crate::NewType) is the only place a value
//! can be rejected. Equality, ordering and hashing never fail.

use thiserror::Error;

/// Result type alias for validating constructors
pub type Result<T> = std::result::Result<T, ValidationError>;

/// A raw value was refused by a wrapper's predicate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{newtype} rejected value: {predicate}")]
pub struct ValidationError {
    /// Type name of the wrapper that refused the value
    pub newtype: &'static str,
    /// Description of the predicate that failed
    pub predicate: &'static str,
}

impl ValidationError {
    /// Create a validation error for wrapper `newtype`
    pub fn new(newtype: &'static str, predicate: &'static str) -> Self {
        ValidationError { newtype, predicate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::new("PositiveInt", "must be greater than zero");
        let msg = err.to_string();
        assert!(msg.contains("PositiveInt"));
        assert!(msg.contains("greater than zero"));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = ValidationError::new("Name", "must not be empty");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<i32> {
            Err(ValidationError::new("Port", "must be within the allowed range"))
        }

        assert!(matches!(
            returns_error(),
            Err(ValidationError { newtype: "Port", .. })
        ));
    }
}
