//! # Domain Types
//!
//! Core domain types used throughout Kiosk POS.
//!
//! ## Ownership Rules
//! - The [`Catalog`](crate::catalog::Catalog) exclusively owns [`Product`]
//!   records.
//! - A [`CartLine`] holds an independent snapshot of name/price taken at
//!   scan time, insulated from later catalog edits.
//! - A [`Transaction`] holds independent snapshots of the cart lines taken at
//!   commit time, and is immutable once created.
//!
//! No layer hands out shared mutable references to another layer's data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// `code` is the business identifier (scanned at the till) and is unique and
/// immutable within the catalog. `stock` never goes below zero; the stock
/// ledger and the transaction processor both enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, immutable product code (barcode or SKU).
    pub code: String,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Unit price in the smallest currency unit. Always positive.
    pub price: i64,

    /// Current stock level. Never negative.
    pub stock: i64,
}

impl Product {
    /// Returns the unit price as a Money value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_units(self.price)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A candidate sale line in the cart.
///
/// Name and price are frozen copies captured when the product was first
/// scanned, so a catalog edit mid-sale cannot change what the customer was
/// quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product code this line refers to.
    pub code: String,

    /// Product name at scan time (frozen).
    pub name: String,

    /// Unit price at scan time (frozen).
    pub price: i64,

    /// Quantity in the cart. Always positive.
    pub qty: i64,
}

impl CartLine {
    /// Creates a line with quantity 1, snapshotting the product's name/price.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            code: product.code.clone(),
            name: product.name.clone(),
            price: product.price,
            qty: 1,
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_units(self.price).multiply_quantity(self.qty)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A committed sale.
///
/// Immutable once created: this core never edits or deletes history. The
/// invariant `total == Σ items[i].price * items[i].qty` is established at
/// construction and preserved by immutability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque unique identifier, sortable by creation time.
    pub id: String,

    /// When the sale was committed.
    pub date: DateTime<Utc>,

    /// Snapshot of the cart lines at commit time, unique by code, in cart
    /// insertion order.
    pub items: Vec<CartLine>,

    /// Sum of `price * qty` over all items, in the smallest currency unit.
    pub total: i64,
}

impl Transaction {
    /// Builds a transaction from snapshot lines, computing the total.
    pub fn new(id: String, date: DateTime<Utc>, items: Vec<CartLine>) -> Self {
        let total = items.iter().map(|l| l.line_total()).sum::<Money>().units();
        Transaction {
            id,
            date,
            items,
            total,
        }
    }

    /// The total as a Money value.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_units(self.total)
    }

    /// Number of distinct items on the receipt.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Stock Movement
// =============================================================================

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockDirection {
    /// Goods received into stock.
    In,
    /// Goods issued out of stock.
    Out,
}

/// Operator-facing audit entry for an accepted stock movement.
///
/// Additive bookkeeping only: the stock invariant lives on [`Product`], this
/// record just makes the movement observable in the operator log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    /// Unique entry id (UUID v4).
    pub id: String,

    /// Product code the movement applied to.
    pub code: String,

    /// Whether stock went in or out.
    pub direction: StockDirection,

    /// Moved quantity. Always positive.
    pub qty: i64,

    /// When the movement was applied.
    pub at: DateTime<Utc>,
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

    #[test]
    fn test_cart_line_snapshots_product() {
        let p = product("A", 3_500, 2);
        let line = CartLine::from_product(&p);

        assert_eq!(line.code, "A");
        assert_eq!(line.price, 3_500);
        assert_eq!(line.qty, 1);
        assert_eq!(line.line_total().units(), 3_500);
    }

    #[test]
    fn test_transaction_total_matches_items() {
        let p = product("A", 3_500, 2);
        let mut line = CartLine::from_product(&p);
        line.qty = 2;

        let tx = Transaction::new("TX1".to_string(), Utc::now(), vec![line]);
        assert_eq!(tx.total, 7_000);
        assert_eq!(tx.item_count(), 1);
    }

    #[test]
    fn test_line_edit_does_not_touch_product() {
        let p = product("A", 3_500, 2);
        let mut line = CartLine::from_product(&p);
        line.name = "Renamed".to_string();
        line.price = 1;

        assert_eq!(p.name, "Product A");
        assert_eq!(p.price, 3_500);
    }
}
