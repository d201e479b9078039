//! # kiosk-core: Pure Business Logic for Kiosk POS
//!
//! This crate is the heart of the till. It contains every business rule as
//! pure functions and plain data, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Renderer / CLI (reads snapshots, issues commands)              │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────▼─────────────────────────────────┐
//! │  kiosk-engine (owns state, coordinates persistence)             │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────▼─────────────────────────────────┐
//! │  ★ kiosk-core (THIS CRATE) ★                                    │
//! │                                                                 │
//! │   catalog   stock    cart    money    aggregator   validation   │
//! │                                                                 │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, Transaction, StockMovement)
//! - [`money`] - Integer money arithmetic (no floating point!)
//! - [`catalog`] - The product set with its uniqueness/immutability rules
//! - [`stock`] - Stock ledger: receive/issue with the non-negativity invariant
//! - [`cart`] - Scan/remove/clear/total over snapshot lines
//! - [`aggregator`] - Pure dashboard statistics over the transaction log
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output - no hidden state
//! 2. **Prepare/apply split**: fallible validation is separated from
//!    infallible mutation so the engine can persist in between
//! 3. **Integer money**: all amounts are in the smallest currency unit (i64)
//! 4. **Explicit errors**: all errors are typed enums, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregator;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregator::{DashboardSummary, TodayTotals, TopSeller};
pub use cart::Cart;
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use stock::StockLedger;
pub use types::{CartLine, Product, StockDirection, StockMovement, Transaction};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level at or below which a product lands on the reorder list.
///
/// The default for [`aggregator::reorder_list`]; the engine exposes it as a
/// configuration knob.
pub const DEFAULT_REORDER_THRESHOLD: i64 = 5;

/// Number of products shown in the top-sellers ranking.
///
/// Default for [`aggregator::top_sellers`]; configurable at the engine level.
pub const DEFAULT_TOP_SELLER_COUNT: usize = 5;
