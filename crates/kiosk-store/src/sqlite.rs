//! # SQLite Store
//!
//! Durable local persistence for the till, built on sqlx + SQLite.
//!
//! ## Connection Setup
//! Mirrors what a single-till deployment wants:
//! - WAL journal: readers and the one writer don't block each other
//! - NORMAL synchronous: safe from corruption, fast enough for a till
//! - create-if-missing: first run bootstraps the file and schema
//!
//! ## Schema
//! ```sql
//! products     (position INTEGER PK AUTOINCREMENT, code TEXT UNIQUE,
//!               name TEXT, price INTEGER, stock INTEGER)
//! transactions (seq INTEGER PK AUTOINCREMENT, id TEXT UNIQUE,
//!               date TEXT, items TEXT /* JSON lines */, total INTEGER)
//! ```
//!
//! `position`/`seq` keep catalog insertion order and commit order stable
//! across hydration round trips. An upsert by code keeps the original
//! position, matching the in-memory catalog's edit behavior.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use kiosk_core::{CartLine, Product, Transaction};

use crate::adapter::{PersistenceAdapter, StoreSnapshot};
use crate::error::{StoreError, StoreResult};

// =============================================================================
// SqliteStore
// =============================================================================

/// SQLite-backed persistence adapter.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if missing) a database file and ensures the schema.
    pub async fn connect(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening till database");

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        let store = SqliteStore { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Opens an isolated in-memory database (for tests).
    ///
    /// A single connection is required: each `:memory:` connection would
    /// otherwise be its own empty database.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = SqliteStore { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Creates the tables on first run. Idempotent.
    async fn init_schema(&self) -> StoreResult<()> {
        debug!("Ensuring till schema");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                position INTEGER PRIMARY KEY AUTOINCREMENT,
                code     TEXT    NOT NULL UNIQUE,
                name     TEXT    NOT NULL,
                price    INTEGER NOT NULL,
                stock    INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                seq   INTEGER PRIMARY KEY AUTOINCREMENT,
                id    TEXT    NOT NULL UNIQUE,
                date  TEXT    NOT NULL,
                items TEXT    NOT NULL,
                total INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Closes the connection pool (application shutdown).
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> StoreResult<Product> {
    Ok(Product {
        code: row.try_get("code")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        stock: row.try_get("stock")?,
    })
}

fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> StoreResult<Transaction> {
    let items_json: String = row.try_get("items")?;
    let items: Vec<CartLine> = serde_json::from_str(&items_json)?;
    let date: DateTime<Utc> = row.try_get("date")?;

    Ok(Transaction {
        id: row.try_get("id")?,
        date,
        items,
        total: row.try_get("total")?,
    })
}

// =============================================================================
// PersistenceAdapter Implementation
// =============================================================================

#[async_trait]
impl PersistenceAdapter for SqliteStore {
    async fn load(&self) -> StoreResult<StoreSnapshot> {
        debug!("Hydrating from SQLite");

        let product_rows =
            sqlx::query("SELECT code, name, price, stock FROM products ORDER BY position")
                .fetch_all(&self.pool)
                .await?;
        let products = product_rows
            .iter()
            .map(row_to_product)
            .collect::<StoreResult<Vec<_>>>()?;

        let tx_rows = sqlx::query("SELECT id, date, items, total FROM transactions ORDER BY seq")
            .fetch_all(&self.pool)
            .await?;
        let transactions = tx_rows
            .iter()
            .map(row_to_transaction)
            .collect::<StoreResult<Vec<_>>>()?;

        info!(
            products = products.len(),
            transactions = transactions.len(),
            "Hydrated till state"
        );

        Ok(StoreSnapshot {
            products,
            transactions,
        })
    }

    async fn upsert_product(&self, product: &Product) -> StoreResult<()> {
        debug!(code = %product.code, "Upserting product record");

        // ON CONFLICT keeps the original position, so catalog order survives
        // edits and stock mirrors.
        sqlx::query(
            r#"
            INSERT INTO products (code, name, price, stock)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(code) DO UPDATE SET
                name  = excluded.name,
                price = excluded.price,
                stock = excluded.stock
            "#,
        )
        .bind(&product.code)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_product(&self, code: &str) -> StoreResult<()> {
        debug!(code = %code, "Deleting product record");

        sqlx::query("DELETE FROM products WHERE code = ?1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn commit_checkout(
        &self,
        transaction: &Transaction,
        stock_updates: &[Product],
    ) -> StoreResult<()> {
        debug!(
            id = %transaction.id,
            items = transaction.items.len(),
            "Committing checkout batch"
        );

        let items_json = serde_json::to_string(&transaction.items)?;

        // Everything below runs inside one database transaction: if any
        // statement fails the batch rolls back on drop and nothing applied.
        let mut txn = self.pool.begin().await?;

        sqlx::query("INSERT INTO transactions (id, date, items, total) VALUES (?1, ?2, ?3, ?4)")
            .bind(&transaction.id)
            .bind(transaction.date)
            .bind(&items_json)
            .bind(transaction.total)
            .execute(&mut *txn)
            .await?;

        for product in stock_updates {
            let result = sqlx::query("UPDATE products SET stock = ?2 WHERE code = ?1")
                .bind(&product.code)
                .bind(product.stock)
                .execute(&mut *txn)
                .await?;

            if result.rows_affected() == 0 {
                // Missing record: abort the whole batch.
                return Err(StoreError::Unavailable(format!(
                    "product record missing for {}",
                    product.code
                )));
            }
        }

        // Only the commit itself can leave the outcome in doubt.
        txn.commit()
            .await
            .map_err(|e| StoreError::Ambiguous(e.to_string()))?;

        info!(id = %transaction.id, total = transaction.total, "Checkout batch committed");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str, price: i64, stock: i64) -> Product {
        Product {
            code: code.to_string(),
            name: format!("Product {}", code),
            price,
            stock,
        }
    }

    #[tokio::test]
    async fn test_upsert_and_load_preserves_order() {
        let store = SqliteStore::in_memory().await.unwrap();

        store.upsert_product(&product("B", 2_000, 9)).await.unwrap();
        store.upsert_product(&product("A", 3_500, 2)).await.unwrap();
        // Edit B: position must not move.
        store
            .upsert_product(&Product {
                name: "Renamed".to_string(),
                ..product("B", 2_500, 4)
            })
            .await
            .unwrap();

        let snapshot = store.load().await.unwrap();
        let codes: Vec<&str> = snapshot.products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["B", "A"]);
        assert_eq!(snapshot.products[0].name, "Renamed");
        assert_eq!(snapshot.products[0].stock, 4);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.upsert_product(&product("A", 3_500, 2)).await.unwrap();

        store.delete_product("A").await.unwrap();
        let snapshot = store.load().await.unwrap();
        assert!(snapshot.products.is_empty());
    }

    #[tokio::test]
    async fn test_commit_checkout_round_trip() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.upsert_product(&product("A", 3_500, 2)).await.unwrap();

        let tx = Transaction::new(
            "TX1700000000000-0001".to_string(),
            Utc::now(),
            vec![CartLine {
                code: "A".to_string(),
                name: "Product A".to_string(),
                price: 3_500,
                qty: 2,
            }],
        );

        store
            .commit_checkout(&tx, &[product("A", 3_500, 0)])
            .await
            .unwrap();

        let snapshot = store.load().await.unwrap();
        assert_eq!(snapshot.products[0].stock, 0);
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.transactions[0], tx);
    }

    #[tokio::test]
    async fn test_commit_checkout_missing_product_rolls_back() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.upsert_product(&product("A", 3_500, 2)).await.unwrap();

        let tx = Transaction::new(
            "TX1".to_string(),
            Utc::now(),
            vec![CartLine {
                code: "GHOST".to_string(),
                name: "Ghost".to_string(),
                price: 1,
                qty: 1,
            }],
        );

        let err = store
            .commit_checkout(&tx, &[product("GHOST", 1, 0)])
            .await
            .unwrap_err();
        assert!(err.definitely_not_applied());

        // Nothing applied: no transaction row, stock untouched.
        let snapshot = store.load().await.unwrap();
        assert!(snapshot.transactions.is_empty());
        assert_eq!(snapshot.products[0].stock, 2);
    }
}
