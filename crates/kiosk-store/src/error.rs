//! # Store Error Types
//!
//! Error types for the persistence boundary.
//!
//! ## Error Flow
//! ```text
//! sqlx::Error ──► StoreError (this module) ──► EngineError::Store
//!                      │
//!                      └── definitely_not_applied() tells the engine
//!                          whether the write can be ruled out
//! ```
//!
//! The engine treats an ambiguous outcome exactly like a definite failure:
//! nothing is applied locally, and the operator retries. The distinction
//! exists for diagnostics, not for behavior.

use thiserror::Error;

/// Persistence failures.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The write was definitely not applied (connection refused, constraint
    /// rejected, statement failed before commit).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The outcome is unknown (failure racing the commit itself). Callers
    /// must assume the write did not happen.
    #[error("Store outcome unknown: {0}")]
    Ambiguous(String),

    /// Stored data could not be decoded back into domain types.
    #[error("Store data corrupt: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// True when the failed write can be ruled out entirely.
    ///
    /// `Ambiguous` returns false; callers still roll forward as if the write
    /// never happened, but diagnostics should flag the uncertainty.
    pub fn definitely_not_applied(&self) -> bool {
        !matches!(self, StoreError::Ambiguous(_))
    }
}

/// Maps sqlx errors conservatively.
///
/// Everything that fails before a commit is issued is `Unavailable`;
/// decode failures are `Corrupt`. Commit-phase failures are wrapped as
/// `Ambiguous` at the call site, where the phase is known.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Corrupt(err.to_string())
            }
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitely_not_applied() {
        assert!(StoreError::Unavailable("refused".into()).definitely_not_applied());
        assert!(StoreError::Corrupt("bad json".into()).definitely_not_applied());
        assert!(!StoreError::Ambiguous("commit timed out".into()).definitely_not_applied());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            StoreError::Unavailable("refused".into()).to_string(),
            "Store unavailable: refused"
        );
    }
}
