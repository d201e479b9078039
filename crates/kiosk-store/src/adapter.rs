//! # Persistence Adapter Trait
//!
//! The seam between the engine and whatever durable store backs the till.
//! The engine calls exactly four operations; everything else (connection
//! handling, schema, retries) is the implementation's business.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use kiosk_core::{Product, Transaction};

use crate::error::StoreResult;

// =============================================================================
// Snapshot
// =============================================================================

/// Bulk read result used to hydrate the engine at startup.
///
/// Order matters: `products` is catalog insertion order, `transactions` is
/// commit order. A hydrate-then-restore round trip must be lossless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub products: Vec<Product>,
    pub transactions: Vec<Transaction>,
}

// =============================================================================
// Adapter Trait
// =============================================================================

/// Durable storage operations the engine depends on.
///
/// ## Failure Contract
/// Every method either fully applies or reports a [`StoreError`]
/// (`crate::StoreError`). When the error is ambiguous the caller must assume
/// the write did not happen - the engine never mutates local state on any
/// store error.
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    /// Reads the full persisted state, order-preserving.
    async fn load(&self) -> StoreResult<StoreSnapshot>;

    /// Writes a single product record (insert or replace by code).
    ///
    /// Also used to mirror stock-ledger movements: the engine sends the
    /// whole record with the prospective stock level.
    async fn upsert_product(&self, product: &Product) -> StoreResult<()>;

    /// Deletes a single product record by code.
    async fn delete_product(&self, code: &str) -> StoreResult<()>;

    /// Atomically writes one new transaction record plus the decremented
    /// stock for every sold product. All records apply or none do.
    async fn commit_checkout(
        &self,
        transaction: &Transaction,
        stock_updates: &[Product],
    ) -> StoreResult<()>;
}
