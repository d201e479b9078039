//! # Engine Error Type
//!
//! What the operator-facing layer sees from any command.
//!
//! ## Error Flow
//! ```text
//! ValidationError ─► CoreError ──┐
//!                                ├─► EngineError ─► renderer message
//! sqlx/adapter ───► StoreError ──┘
//! ```
//!
//! Nothing here is fatal: a Core variant means the operator corrects the
//! input, a Store variant means the durable write did not take effect and
//! the operator retries. Either way the engine is in its exact prior state.

use thiserror::Error;

use kiosk_core::CoreError;
use kiosk_store::StoreError;

/// Unified command error.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Business rule or validation failure; correct the input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Durable write failed (or outcome unknown, treated the same); no
    /// local or durable state changed, retry is safe.
    #[error("Persistence failed: {0}")]
    Store(#[from] StoreError),
}

/// Result type for engine commands.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================
