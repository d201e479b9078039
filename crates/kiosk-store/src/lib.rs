//! # kiosk-store: Persistence Boundary for Kiosk POS
//!
//! The engine never talks to storage directly; it talks to the
//! [`PersistenceAdapter`] trait defined here. Two implementations ship:
//!
//! - [`SqliteStore`] - durable local store (sqlx + SQLite, WAL mode)
//! - [`MemoryStore`] - order-preserving in-memory store with one-shot
//!   failure injection, for engine tests and demos
//!
//! ## The Contract
//! ```text
//! load()                       bulk hydrate, order-preserving
//! upsert_product / delete_product   single-record writes
//! commit_checkout(tx, updates)      atomic: 1 new transaction record
//!                                   + N stock updates, all or nothing
//! ```
//!
//! Failures distinguish "definitely not applied" from "outcome unknown";
//! callers must treat unknown as not-applied (conservative, never assume
//! success).

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adapter;
pub mod error;
pub mod memory;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use adapter::{PersistenceAdapter, StoreSnapshot};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
