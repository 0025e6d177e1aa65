//! # Error Types
//!
//! Domain-specific error types for kirana-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kirana-core errors (this file)                                         │
//! │  ├── CartError        - Billing engine precondition failures            │
//! │  └── ValidationError  - Product form validation failures                │
//! │                                                                         │
//! │  kirana-api errors (separate crate)                                     │
//! │  └── ClientError      - Transport / non-2xx collaborator responses      │
//! │                                                                         │
//! │  Counter app errors                                                     │
//! │  └── ApiError         - What the operator sees (code + message)         │
//! │                                                                         │
//! │  Flow: CartError → ApiError → operator message                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product code, available stock)
//! 3. Errors are enum variants, never String
//! 4. Every variant is a distinct, stable identifier the caller can match on

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Billing engine errors.
///
/// These are the synchronous precondition failures of the cart engine.
/// None of them ever reach the network; they are reported to the operator
/// before any collaborator call is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    /// No product with this code exists in the catalog snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Quantity must be a positive integer.
    #[error("Quantity must be greater than 0 (got {qty})")]
    InvalidQuantity { qty: i64 },

    /// Requested quantity exceeds the snapshot stock.
    ///
    /// ## Note
    /// The snapshot may be stale relative to the server; this check is a
    /// UX convenience, the authoritative stock check happens server-side.
    #[error("Only {available} of {code} available in stock (requested {requested})")]
    InsufficientStock {
        code: String,
        available: i64,
        requested: i64,
    },

    /// Effective unit rate must be positive.
    #[error("Invalid product rate: {rate}")]
    InvalidRate { rate: f64 },

    /// Finalizing requires at least one cart line.
    #[error("Cart is empty")]
    EmptyCart,

    /// Finalizing requires a non-blank customer name.
    #[error("Customer name is required")]
    MissingCustomer,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when product form input doesn't meet requirements.
/// Used for early validation before the collaborator is called.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. disallowed characters in a product code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_messages() {
        let err = CartError::InsufficientStock {
            code: "A1".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Only 3 of A1 available in stock (requested 5)"
        );

        let err = CartError::InvalidQuantity { qty: 0 };
        assert_eq!(err.to_string(), "Quantity must be greater than 0 (got 0)");
    }

    #[test]
    fn test_cart_errors_are_distinct_identifiers() {
        // The operator-facing layer matches on variants, so equality must
        // distinguish every failure category.
        assert_ne!(
            CartError::EmptyCart,
            CartError::MissingCustomer,
        );
        assert_ne!(
            CartError::InvalidQuantity { qty: 0 },
            CartError::InvalidRate { rate: 0.0 },
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        };
        assert_eq!(err.to_string(), "stock must not be negative");
    }
}
