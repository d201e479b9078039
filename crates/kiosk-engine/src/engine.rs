//! # The Engine
//!
//! Owns every piece of mutable till state and coordinates the persistence
//! adapter. See the crate docs for the command surface and the
//! commit-first-then-apply discipline; this module is where that discipline
//! is actually enforced, one command at a time.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use kiosk_core::{
    aggregator, stock, Cart, Catalog, CoreError, DashboardSummary, Product, StockDirection,
    StockLedger, Transaction,
};
use kiosk_store::{PersistenceAdapter, StoreSnapshot};

use crate::config::EngineConfig;
use crate::error::EngineResult;

// =============================================================================
// Engine
// =============================================================================

/// The single-till inventory & transaction engine.
///
/// ## Ownership
/// Catalog, stock ledger, cart, and transaction log are exclusively owned
/// here. Accessors hand out shared references or clones; callers must treat
/// returned data as immutable once rendered.
///
/// ## Ordering Guarantee
/// Transaction log append order equals commit-success order: the log is
/// only pushed after the adapter reports a successful commit, under the
/// exclusive borrow the command already holds.
pub struct Engine<S: PersistenceAdapter> {
    store: S,
    config: EngineConfig,
    catalog: Catalog,
    ledger: StockLedger,
    cart: Cart,
    log: Vec<Transaction>,
    checkout_seq: u64,
}

impl<S: PersistenceAdapter> Engine<S> {
    /// Hydrates an engine from the store's bulk read.
    ///
    /// The cart always starts empty (it is session state, never persisted);
    /// catalog and log come back in their persisted order.
    pub async fn hydrate(store: S, config: EngineConfig) -> EngineResult<Self> {
        let StoreSnapshot {
            products,
            transactions,
        } = store.load().await?;

        info!(
            products = products.len(),
            transactions = transactions.len(),
            "Engine hydrated"
        );

        Ok(Engine {
            store,
            config,
            catalog: Catalog::hydrate(products),
            ledger: StockLedger::new(),
            cart: Cart::new(),
            log: transactions,
            checkout_seq: 0,
        })
    }

    // -------------------------------------------------------------------------
    // Catalog commands
    // -------------------------------------------------------------------------

    /// Inserts (`editing == false`) or edits (`editing == true`) a product.
    ///
    /// Validation runs first (nothing changed on failure), the record is
    /// persisted next (nothing changed on failure), and only then does the
    /// in-memory catalog pick it up.
    pub async fn upsert_product(
        &mut self,
        code: &str,
        name: &str,
        price: i64,
        stock: i64,
        editing: bool,
    ) -> EngineResult<Product> {
        debug!(code = %code, editing = editing, "upsert_product command");

        let product = self
            .catalog
            .prepare_upsert(code, name, price, stock, editing)?;
        self.store.upsert_product(&product).await?;
        self.catalog.apply_upsert(product.clone());

        info!(code = %product.code, editing = editing, "Product saved");
        Ok(product)
    }

    /// Removes a product. Unconditional beyond existence: transaction
    /// history keeps its own snapshots, so past receipts stay intact.
    pub async fn remove_product(&mut self, code: &str) -> EngineResult<Product> {
        debug!(code = %code, "remove_product command");

        self.catalog.prepare_remove(code)?;
        self.store.delete_product(code).await?;
        // prepare_remove just verified presence under the same borrow.
        let removed = self
            .catalog
            .apply_remove(code)
            .ok_or_else(|| CoreError::not_found(code))?;

        info!(code = %code, "Product removed");
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Stock commands
    // -------------------------------------------------------------------------

    /// Receives goods into stock. Returns the new stock level.
    pub async fn receive(&mut self, code: &str, qty: i64) -> EngineResult<i64> {
        debug!(code = %code, qty = qty, "receive command");
        self.move_stock(code, qty, StockDirection::In).await
    }

    /// Issues goods out of stock. Returns the new stock level.
    pub async fn issue(&mut self, code: &str, qty: i64) -> EngineResult<i64> {
        debug!(code = %code, qty = qty, "issue command");
        self.move_stock(code, qty, StockDirection::Out).await
    }

    /// Shared receive/issue path: prepare the prospective level, mirror it
    /// to the store, then apply and record the audit entry. A failed mirror
    /// write leaves memory at the pre-call value - there is nothing to roll
    /// back because nothing was applied.
    async fn move_stock(
        &mut self,
        code: &str,
        qty: i64,
        direction: StockDirection,
    ) -> EngineResult<i64> {
        let new_stock = match direction {
            StockDirection::In => stock::prepare_receive(&self.catalog, code, qty)?,
            StockDirection::Out => stock::prepare_issue(&self.catalog, code, qty)?,
        };

        let mut record = self.catalog.find(code)?.clone();
        record.stock = new_stock;

        if let Err(err) = self.store.upsert_product(&record).await {
            warn!(code = %code, error = %err, "Stock mirror write failed; movement dropped");
            return Err(err.into());
        }

        self.catalog.apply_stock(code, new_stock);
        self.ledger.record(code, direction, qty, Utc::now());

        info!(code = %code, qty = qty, ?direction, new_stock = new_stock, "Stock moved");
        Ok(new_stock)
    }

    // -------------------------------------------------------------------------
    // Cart commands
    // -------------------------------------------------------------------------

    /// Scans one unit of a product into the cart.
    ///
    /// Pure in-memory: the cart is scratch state, so nothing is persisted
    /// until checkout.
    pub fn scan(&mut self, code: &str) -> EngineResult<()> {
        let product = self.catalog.find(code)?.clone();
        self.cart.scan(&product)?;
        debug!(code = %code, qty = self.cart.line_qty(code), "Line scanned");
        Ok(())
    }

    /// Removes a cart line. Idempotent.
    pub fn remove_line(&mut self, code: &str) {
        self.cart.remove_line(code);
    }

    /// Explicitly abandons the cart.
    pub fn abandon_cart(&mut self) {
        debug!(lines = self.cart.lines().len(), "Cart abandoned");
        self.cart.clear();
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Converts the cart into a durable transaction.
    ///
    /// ## Steps
    /// 1. Reject an empty cart.
    /// 2. Re-validate every line against the live catalog (stock may have
    ///    moved since scanning); any shortfall aborts the whole checkout.
    /// 3. Synthesize the transaction (fresh sortable id, current time,
    ///    snapshot of the lines).
    /// 4. Ask the adapter for an all-or-nothing commit of the transaction
    ///    plus every decremented stock record. On failure, surface the
    ///    error with the cart intact so the operator can retry.
    /// 5. Apply the same mutation in memory and clear the cart.
    ///
    /// Once the durable commit is issued there is no cancellation: the call
    /// either fully succeeds or fully fails.
    pub async fn checkout(&mut self) -> EngineResult<Transaction> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        // Step 2: fresh stock check per line.
        let mut stock_updates: Vec<Product> = Vec::with_capacity(self.cart.lines().len());
        for line in self.cart.lines() {
            let product = self.catalog.find(&line.code)?;
            if line.qty > product.stock {
                return Err(CoreError::InsufficientStock {
                    code: line.code.clone(),
                    available: product.stock,
                    requested: line.qty,
                }
                .into());
            }
            let mut updated = product.clone();
            updated.stock -= line.qty;
            stock_updates.push(updated);
        }

        // Step 3: synthesize.
        let now = Utc::now();
        let transaction = Transaction::new(self.next_transaction_id(now), now, self.cart.snapshot());

        debug!(
            id = %transaction.id,
            items = transaction.items.len(),
            total = transaction.total,
            "Committing checkout"
        );

        // Step 4: durable commit first. Ambiguous outcomes count as failure;
        // never assume success.
        if let Err(err) = self.store.commit_checkout(&transaction, &stock_updates).await {
            warn!(id = %transaction.id, error = %err, "Checkout commit failed; cart preserved");
            return Err(err.into());
        }

        // Step 5: apply locally.
        for update in &stock_updates {
            self.catalog.apply_stock(&update.code, update.stock);
        }
        self.log.push(transaction.clone());
        self.cart.clear();

        info!(id = %transaction.id, total = transaction.total, "Checkout committed");
        Ok(transaction)
    }

    /// Time-derived opaque id, unique and sortable by creation.
    ///
    /// The per-engine sequence disambiguates checkouts landing in the same
    /// millisecond.
    fn next_transaction_id(&mut self, now: DateTime<Utc>) -> String {
        self.checkout_seq += 1;
        format!("TX{}-{:04}", now.timestamp_millis(), self.checkout_seq)
    }

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    /// Dashboard snapshot for the calendar day of `now`.
    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardSummary {
        aggregator::dashboard(
            &self.catalog,
            &self.log,
            now,
            self.config.reorder_threshold,
            self.config.top_seller_count,
        )
    }

    /// Transactions within an inclusive date range; `None` bounds are open.
    pub fn filter_transactions(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<Transaction> {
        aggregator::filter_by_date_range(&self.log, from, to)
            .into_iter()
            .cloned()
            .collect()
    }

    // -------------------------------------------------------------------------
    // Read-only snapshots
    // -------------------------------------------------------------------------

    /// The live catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The append-only transaction log, commit order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.log
    }

    /// Stock movement audit entries from this session.
    pub fn movements(&self) -> &[kiosk_core::StockMovement] {
        self.ledger.movements()
    }

    /// The underlying store (tests and shutdown hooks).
    pub fn store(&self) -> &S {
        &self.store
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
