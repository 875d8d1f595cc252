//! # Error Types
//!
//! Domain-specific error types for almacen-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  almacen-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  almacen-db errors (separate crate)                                    │
//! │  └── DbError          - Storage failures; wraps CoreError so the       │
//! │                         transactional engines return one result type   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → GUI message             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, id, available stock)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message the GUI shows verbatim

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations. The transactional engines
/// guarantee that any of these raised mid-operation leaves no partial writes.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id does not exist (deleted, or never existed).
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Taking the requested quantity would drive stock below zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Confirm sale (line: 5 × Sliced Ham)
    ///      │
    ///      ▼
    /// Re-read stock inside the transaction: available = 3
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Sliced Ham", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Whole sale rolls back; UI shows: "Insufficient stock for Sliced Ham"
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Sale id does not exist.
    #[error("Sale not found: {0}")]
    SaleNotFound(i64),

    /// Attempted to collect a sale that is already settled.
    #[error("Sale {0} is already paid")]
    SaleAlreadyPaid(i64),

    /// The customer id given at sale registration does not exist.
    /// Fails the entire registration transaction.
    #[error("Customer not found: {0}")]
    CustomerNotFound(i64),

    /// A refund targeted no live line items (already refunded, or wrong ids).
    #[error("Nothing to refund on sale {0}")]
    NothingToRefund(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements. Used for early
/// validation before any write is attempted.
#[derive(Debug, Error)]
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

    /// Invalid format (e.g., characters outside the allowed set).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
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
        let err = CoreError::InsufficientStock {
            product: "Sliced Ham 200g".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Sliced Ham 200g: available 3, requested 5"
        );

        let err = CoreError::SaleAlreadyPaid(42);
        assert_eq!(err.to_string(), "Sale 42 is already paid");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
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
