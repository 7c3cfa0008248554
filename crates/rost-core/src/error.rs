//! # Error Types
//!
//! Domain-specific error types for rost-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rost-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rost-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP clients see (JSON body + status)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, id, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - Product id doesn't exist in database
    /// - Product was deactivated (soft delete)
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category cannot be found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// A discounted price does not qualify as an offer.
    ///
    /// ## When This Occurs
    /// - Discount is zero or negative
    /// - Discount is not strictly below the regular price
    #[error("Invalid offer price for {code}: regular {regular_cents}, discounted {discount_cents}")]
    InvalidOfferPrice {
        code: String,
        regular_cents: i64,
        discount_cents: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Used for early validation before any query runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Too many elements in a list argument.
    #[error("{field} must have at most {max} entries")]
    TooMany { field: String, max: usize },

    /// Invalid format (e.g., invalid id, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidOfferPrice {
            code: "ROST-1001".to_string(),
            regular_cents: 1000,
            discount_cents: 1200,
        };
        assert_eq!(
            err.to_string(),
            "Invalid offer price for ROST-1001: regular 1000, discounted 1200"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::TooShort {
            field: "q".to_string(),
            min: 2,
        };
        assert_eq!(err.to_string(), "q must be at least 2 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
