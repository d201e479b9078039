//! # kiosk-engine: The Till's Inventory & Transaction Engine
//!
//! A single logical actor owning all mutable till state. External callers
//! (a renderer, a CLI) issue discrete commands and read immutable snapshots;
//! they never hold mutable references into the engine.
//!
//! ## Command Surface
//! ```text
//! Catalog:   upsert_product, remove_product
//! Stock:     receive, issue
//! Cart:      scan, remove_line, abandon_cart
//! Checkout:  checkout
//! Reports:   dashboard, filter_transactions
//! Snapshots: catalog, cart, transactions, movements
//! ```
//!
//! ## The Atomicity Guarantee
//! ```text
//!   prepare (pure, kiosk-core)      nothing changed on failure
//!        │
//!        ▼
//!   commit (kiosk-store adapter)    may fail / suspend; nothing changed
//!        │                          on failure, cart kept for retry
//!        ▼
//!   apply (in-memory)               infallible
//! ```
//!
//! Commit-first-then-apply means local state never shows a sale the durable
//! store doesn't have, and a failed commit never partially decrements stock.
//! Checkout is serialized by construction: mutating commands take
//! `&mut self`, so a checkout awaiting its commit exclusively borrows the
//! engine until it resolves.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod engine;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
