//! # In-Memory Store
//!
//! Order-preserving adapter backed by a mutex-guarded snapshot. Used by
//! engine tests and demos; supports one-shot failure injection so the
//! engine's rollback discipline can be exercised without a real outage.

use std::sync::Mutex;

use async_trait::async_trait;

use kiosk_core::{Product, Transaction};

use crate::adapter::{PersistenceAdapter, StoreSnapshot};
use crate::error::{StoreError, StoreResult};

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory persistence adapter.
///
/// Interior mutability lets tests keep a shared reference for inspection and
/// failure injection while the engine owns the adapter through the trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    snapshot: StoreSnapshot,
    fail_next: Option<StoreError>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store pre-loaded with state (hydration tests).
    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        MemoryStore {
            inner: Mutex::new(Inner {
                snapshot,
                fail_next: None,
            }),
        }
    }

    /// Arms the store to fail its next mutating call with `err`, applying
    /// nothing. One-shot: the call after that succeeds again.
    pub fn fail_next(&self, err: StoreError) {
        self.lock().fail_next = Some(err);
    }

    /// Current persisted state (round-trip assertions).
    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock().snapshot.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Lock poisoning would mean a panic mid-test; propagating it as a
        // StoreError has no useful recovery.
        self.inner.lock().expect("memory store mutex poisoned")
    }

    fn take_injected_failure(&self) -> Option<StoreError> {
        self.lock().fail_next.take()
    }
}

// =============================================================================
// PersistenceAdapter Implementation
// =============================================================================

#[async_trait]
impl PersistenceAdapter for MemoryStore {
    async fn load(&self) -> StoreResult<StoreSnapshot> {
        Ok(self.snapshot())
    }

    async fn upsert_product(&self, product: &Product) -> StoreResult<()> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }

        let mut inner = self.lock();
        let products = &mut inner.snapshot.products;
        match products.iter_mut().find(|p| p.code == product.code) {
            Some(existing) => *existing = product.clone(),
            None => products.push(product.clone()),
        }
        Ok(())
    }

    async fn delete_product(&self, code: &str) -> StoreResult<()> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }

        self.lock().snapshot.products.retain(|p| p.code != code);
        Ok(())
    }

    async fn commit_checkout(
        &self,
        transaction: &Transaction,
        stock_updates: &[Product],
    ) -> StoreResult<()> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }

        let mut inner = self.lock();

        // All-or-nothing: verify every record exists before touching any.
        for update in stock_updates {
            if !inner.snapshot.products.iter().any(|p| p.code == update.code) {
                return Err(StoreError::Unavailable(format!(
                    "product record missing for {}",
                    update.code
                )));
            }
        }

        for update in stock_updates {
            if let Some(p) = inner
                .snapshot
                .products
                .iter_mut()
                .find(|p| p.code == update.code)
            {
                p.stock = update.stock;
            }
        }
        inner.snapshot.transactions.push(transaction.clone());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
