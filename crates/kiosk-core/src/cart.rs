//! # Cart
//!
//! The scratch mapping of candidate sale lines.
//!
//! ## Lifecycle
//! ```text
//! created empty ──► scan / remove_line ──► checkout commits ──► cleared
//!                         │                                       ▲
//!                         └──────────── abandon ──────────────────┘
//! ```
//!
//! Lines are unique by product code and keep the name/price snapshot taken
//! at first scan. A line's quantity never exceeds the product's live stock
//! *at scan time*; stock changing between scan and checkout is caught by the
//! transaction processor's re-validation pass.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, Product};

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: unique-by-code lines in first-scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Scans one unit of a product into the cart.
    ///
    /// Fails with `InsufficientStock` when the line already holds every
    /// available unit (the existing quantity is `>= product.stock`), so one
    /// more would oversell. Otherwise increments the line, creating it with
    /// a name/price snapshot at quantity 1 if absent.
    pub fn scan(&mut self, product: &Product) -> CoreResult<()> {
        let current_qty = self.line_qty(&product.code);
        if current_qty >= product.stock {
            return Err(CoreError::InsufficientStock {
                code: product.code.clone(),
                available: product.stock,
                requested: current_qty + 1,
            });
        }

        match self.lines.iter_mut().find(|l| l.code == product.code) {
            Some(line) => line.qty += 1,
            None => self.lines.push(CartLine::from_product(product)),
        }
        Ok(())
    }

    /// Deletes the line for `code` if present.
    ///
    /// Idempotent: removing an absent line is not an error.
    pub fn remove_line(&mut self, code: &str) {
        self.lines.retain(|l| l.code != code);
    }

    /// Empties the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price * qty` over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Quantity currently carted for `code` (0 if no line).
    pub fn line_qty(&self, code: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.code == code)
            .map_or(0, |l| l.qty)
    }

    /// Lines in first-scan order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total unit count across all lines (the cart badge figure).
    pub fn total_qty(&self) -> i64 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Independent copy of the lines, for freezing into a transaction.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.clone()
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

    #[test]
    fn test_scan_creates_then_increments() {
        let mut cart = Cart::new();
        let p = product("A", 3_500, 2);

        cart.scan(&p).unwrap();
        cart.scan(&p).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line_qty("A"), 2);
        assert_eq!(cart.total().units(), 7_000);
    }

    #[test]
    fn test_scan_beyond_stock_rejected() {
        let mut cart = Cart::new();
        let p = product("A", 3_500, 2);

        cart.scan(&p).unwrap();
        cart.scan(&p).unwrap();
        let err = cart.scan(&p).unwrap_err();

        assert_eq!(
            err,
            CoreError::InsufficientStock {
                code: "A".to_string(),
                available: 2,
                requested: 3,
            }
        );
        // Failed scan left the cart alone.
        assert_eq!(cart.line_qty("A"), 2);
    }

    #[test]
    fn test_scan_zero_stock_product_rejected() {
        let mut cart = Cart::new();
        let p = product("A", 3_500, 0);
        assert!(cart.scan(&p).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_line_is_idempotent() {
        let mut cart = Cart::new();
        let p = product("A", 3_500, 2);

        cart.scan(&p).unwrap();
        cart.remove_line("A");
        assert!(cart.is_empty());

        // Absent line: no error, no effect.
        cart.remove_line("A");
        cart.remove_line("NEVER-SEEN");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.scan(&product("A", 3_500, 2)).unwrap();
        cart.scan(&product("B", 2_000, 9)).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total().units(), 0);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut cart = Cart::new();
        cart.scan(&product("A", 3_500, 2)).unwrap();

        let snap = cart.snapshot();
        cart.clear();

        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].qty, 1);
    }

    #[test]
    fn test_totals_across_lines() {
        let mut cart = Cart::new();
        let a = product("A", 3_500, 5);
        let b = product("B", 2_000, 5);

        cart.scan(&a).unwrap();
        cart.scan(&a).unwrap();
        cart.scan(&b).unwrap();

        assert_eq!(cart.total_qty(), 3);
        assert_eq!(cart.total().units(), 9_000);
    }
}
