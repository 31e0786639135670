//! Field-level schema validation
//!
//! Entities expose a `validate()` that checks minimum-length and range
//! constraints before a store mutation. A failed check aborts the operation
//! and leaves all state unchanged.

use thiserror::Error;

/// A schema constraint violation on a single field
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Field '{field}' must be at least {min} characters (got {len})")]
    TooShort {
        field: &'static str,
        min: usize,
        len: usize,
    },

    #[error("Field '{field}' must be non-negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("Field '{field}' must be numeric: {value}")]
    NotNumeric { field: &'static str, value: String },
}

impl ValidationError {
    /// Require a minimum character count on a string field
    pub fn require_min(field: &'static str, value: &str, min: usize) -> Result<(), Self> {
        let len = value.trim().chars().count();
        if len < min {
            return Err(ValidationError::TooShort { field, min, len });
        }
        Ok(())
    }

    /// Require a non-negative numeric field
    pub fn require_non_negative(field: &'static str, value: f64) -> Result<(), Self> {
        if value < 0.0 {
            return Err(ValidationError::Negative { field, value });
        }
        Ok(())
    }

    /// Require a digits-only string field (phone numbers, pincodes)
    pub fn require_numeric(field: &'static str, value: &str) -> Result<(), Self> {
        if value.trim().is_empty() || !value.trim().chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::NotNumeric {
                field,
                value: value.to_string(),
            });
        }
        Ok(())
    }
}
