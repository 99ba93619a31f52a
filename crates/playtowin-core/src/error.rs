//! # Error Types
//!
//! Domain-specific error types for playtowin-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  playtowin-core errors (this file)                                      │
//! │  ├── CoreError        - Wraps the two below                             │
//! │  ├── ValidationError  - Request field validation failures              │
//! │  └── DiscountError    - Discount engine precondition failures          │
//! │                                                                         │
//! │  playtowin-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (in app)                                                    │
//! │  └── ApiError         - HTTP status + envelope message                 │
//! │                                                                         │
//! │  Flow: ValidationError / DiscountError → CoreError → ApiError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Discount calculation error (wraps DiscountError).
    #[error("{0}")]
    Discount(#[from] DiscountError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the field validators before anything is persisted.
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

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Discount Error
// =============================================================================

/// Discount engine failures.
///
/// A closed set: every strategy either returns a non-negative total or one of
/// these. Nothing is partially computed.
///
/// ## Check Order
/// ```text
/// validate_line_items ──► EmptyCart / InvalidLineItem
///        │
///        ▼
/// strategy parameters ──► InvalidAmount / InvalidPercentage / InvalidCategory
///        │                InvalidPoints / InvalidThreshold
///        ▼
/// subtotal            ──► TotalOverflow
///        │
///        ▼
/// category scan       ──► CategoryNotFound
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountError {
    /// No line items supplied.
    #[error("cart is empty")]
    EmptyCart,

    /// A line item has a non-positive quantity, unit price or total price.
    #[error("invalid cart item at index {index}: quantity, unit price and total price must be positive")]
    InvalidLineItem { index: usize },

    /// Negative fixed amount, or non-positive threshold discount amount.
    #[error("discount amount is invalid")]
    InvalidAmount,

    /// Percentage outside 0..=100.
    #[error("discount percentage must be between 0 and 100")]
    InvalidPercentage,

    /// Empty category filter.
    #[error("category must not be empty")]
    InvalidCategory,

    /// The category filter matched no line item.
    #[error("no cart item in category '{0}'")]
    CategoryNotFound(String),

    /// Negative loyalty points.
    #[error("points must not be negative")]
    InvalidPoints,

    /// Non-positive threshold.
    #[error("threshold must be positive")]
    InvalidThreshold,

    /// The line totals do not fit in a single amount.
    #[error("cart total is too large")]
    TotalOverflow,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result of a discount calculation.
pub type DiscountResult<T> = Result<T, DiscountError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_error_messages() {
        assert_eq!(DiscountError::EmptyCart.to_string(), "cart is empty");
        assert_eq!(
            DiscountError::CategoryNotFound("shoes".to_string()).to_string(),
            "no cart item in category 'shoes'"
        );
        assert_eq!(
            DiscountError::InvalidLineItem { index: 2 }.to_string(),
            "invalid cart item at index 2: quantity, unit price and total price must be positive"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "email".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = DiscountError::InvalidPoints.into();
        assert!(matches!(core_err, CoreError::Discount(DiscountError::InvalidPoints)));
        assert_eq!(core_err.to_string(), "points must not be negative");
    }
}
