//! # Error Types
//!
//! Domain-specific error types for kiosk-core.
//!
//! ## Error Hierarchy
//! ```text
//! kiosk-core errors (this file)
//! ├── CoreError        - Business rule violations
//! └── ValidationError  - Input validation failures
//!
//! kiosk-store errors (separate crate)
//! └── StoreError       - Persistence failures
//!
//! kiosk-engine errors
//! └── EngineError      - Core | Store, what the operator sees
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, never manual impls
//! 2. Context in every message (product code, quantities)
//! 3. Errors are enum variants, never String
//! 4. Every condition here is recoverable: the caller corrects input or
//!    retries, and state is exactly what it was before the failed call

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
///
/// All expected, user-facing, and non-fatal: the engine returns to its prior
/// state and reports the condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No product with this code exists in the catalog.
    #[error("Product not found: {code}")]
    NotFound { code: String },

    /// Inserting a product whose code is already taken.
    #[error("Product '{code}' already exists")]
    Duplicate { code: String },

    /// A stock movement with a non-positive quantity.
    #[error("Invalid quantity: {qty} (must be greater than zero)")]
    InvalidQuantity { qty: i64 },

    /// Stock cannot cover the requested quantity.
    ///
    /// Raised by `issue`, by `scan` when the cart already holds all available
    /// units, and by checkout re-validation when stock changed after scanning.
    #[error("Insufficient stock for {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: String,
        available: i64,
        requested: i64,
    },

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Malformed input (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for a product code.
    pub fn not_found(code: impl Into<String>) -> Self {
        CoreError::NotFound { code: code.into() }
    }

    /// Creates a Duplicate error for a product code.
    pub fn duplicate(code: impl Into<String>) -> Self {
        CoreError::Duplicate { code: code.into() }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before business logic runs, when user input doesn't meet the basic
/// field requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Initial stock below zero would break the stock invariant from birth.
    #[error("stock cannot be negative (got {value})")]
    NegativeStock { value: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience alias for Results with CoreError.
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
            code: "KOPI-01".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for KOPI-01: available 3, requested 5"
        );

        assert_eq!(
            CoreError::not_found("TEH-02").to_string(),
            "Product not found: TEH-02"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
