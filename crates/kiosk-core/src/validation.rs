//! # Validation Module
//!
//! Field-level input validation, run before any business rule.
//!
//! The catalog and stock ledger call these internally; they are public so a
//! frontend can pre-validate a form before issuing the command.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty after trimming
pub fn validate_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }
    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be strictly positive (free items are not a thing at this till)
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates an initial stock level.
///
/// ## Rules
/// - Must be zero or more; the `stock >= 0` invariant holds from birth
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::NegativeStock { value: stock });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
