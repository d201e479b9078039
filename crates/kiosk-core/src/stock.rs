//! # Stock Ledger
//!
//! Receive/issue movements on top of the catalog, plus the operator-facing
//! audit log of accepted movements.
//!
//! The chief correctness risk of a till is desynchronizing memory and the
//! durable store: mutate in memory first, persist second, and a persistence
//! failure leaves the two disagreeing. The ledger therefore only *prepares*
//! movements (pure validation returning the prospective stock level); the
//! engine persists that level and applies it to the catalog afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::types::{StockDirection, StockMovement};

// =============================================================================
// Prepare functions (pure)
// =============================================================================

/// Validates a goods-receipt and returns the stock level it would produce.
///
/// ## Preconditions
/// - `qty > 0`, else `InvalidQuantity`
/// - the product exists, else `NotFound`
pub fn prepare_receive(catalog: &Catalog, code: &str, qty: i64) -> CoreResult<i64> {
    if qty <= 0 {
        return Err(CoreError::InvalidQuantity { qty });
    }
    let product = catalog.find(code)?;
    Ok(product.stock + qty)
}

/// Validates a goods-issue and returns the stock level it would produce.
///
/// ## Preconditions
/// - `qty > 0`, else `InvalidQuantity`
/// - the product exists, else `NotFound`
/// - `stock >= qty`, else `InsufficientStock` (stock is unchanged)
pub fn prepare_issue(catalog: &Catalog, code: &str, qty: i64) -> CoreResult<i64> {
    if qty <= 0 {
        return Err(CoreError::InvalidQuantity { qty });
    }
    let product = catalog.find(code)?;
    if product.stock < qty {
        return Err(CoreError::InsufficientStock {
            code: code.to_string(),
            available: product.stock,
            requested: qty,
        });
    }
    Ok(product.stock - qty)
}

// =============================================================================
// Stock Ledger (audit log)
// =============================================================================

/// Append-only log of accepted stock movements.
///
/// Additive bookkeeping for the operator's IN/OUT panel; the stock invariant
/// itself lives on the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockLedger {
    movements: Vec<StockMovement>,
}

impl StockLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        StockLedger {
            movements: Vec::new(),
        }
    }

    /// Records an applied movement.
    pub fn record(&mut self, code: &str, direction: StockDirection, qty: i64, at: DateTime<Utc>) {
        self.movements.push(StockMovement {
            id: Uuid::new_v4().to_string(),
            code: code.to_string(),
            direction,
            qty,
            at,
        });
    }

    /// All movements in the order they were applied.
    pub fn movements(&self) -> &[StockMovement] {
        &self.movements
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with_stock(stock: i64) -> Catalog {
        let mut catalog = Catalog::new();
        let p = catalog
            .prepare_upsert("A", "Product A", 3_500, stock, false)
            .unwrap();
        catalog.apply_upsert(p);
        catalog
    }

    #[test]
    fn test_receive_adds() {
        let catalog = catalog_with_stock(2);
        assert_eq!(prepare_receive(&catalog, "A", 5).unwrap(), 7);
    }

    #[test]
    fn test_issue_subtracts() {
        let catalog = catalog_with_stock(5);
        assert_eq!(prepare_issue(&catalog, "A", 5).unwrap(), 0);
    }

    #[test]
    fn test_issue_beyond_stock_rejected_and_unchanged() {
        let catalog = catalog_with_stock(2);

        let err = prepare_issue(&catalog, "A", 3).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                code: "A".to_string(),
                available: 2,
                requested: 3,
            }
        );
        // Pure prepare: nothing moved.
        assert_eq!(catalog.find("A").unwrap().stock, 2);
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let catalog = catalog_with_stock(2);

        assert!(matches!(
            prepare_receive(&catalog, "A", 0),
            Err(CoreError::InvalidQuantity { qty: 0 })
        ));
        assert!(matches!(
            prepare_issue(&catalog, "A", -1),
            Err(CoreError::InvalidQuantity { qty: -1 })
        ));
    }

    #[test]
    fn test_unknown_product_rejected() {
        let catalog = Catalog::new();
        assert!(matches!(
            prepare_receive(&catalog, "A", 1),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_stock_never_negative_over_sequences() {
        let mut catalog = catalog_with_stock(0);
        let mut ledger = StockLedger::new();

        // Arbitrary mixed sequence; rejected issues must not change stock.
        let ops: &[(StockDirection, i64)] = &[
            (StockDirection::In, 3),
            (StockDirection::Out, 2),
            (StockDirection::Out, 5), // rejected
            (StockDirection::In, 1),
            (StockDirection::Out, 2),
            (StockDirection::Out, 1), // rejected
        ];

        for (direction, qty) in ops {
            let prepared = match direction {
                StockDirection::In => prepare_receive(&catalog, "A", *qty),
                StockDirection::Out => prepare_issue(&catalog, "A", *qty),
            };
            if let Ok(new_stock) = prepared {
                catalog.apply_stock("A", new_stock);
                ledger.record("A", *direction, *qty, Utc::now());
            }
            assert!(catalog.find("A").unwrap().stock >= 0);
        }

        assert_eq!(catalog.find("A").unwrap().stock, 0);
        assert_eq!(ledger.movements().len(), 4);
    }

    #[test]
    fn test_ledger_records_in_order() {
        let mut ledger = StockLedger::new();
        let now = Utc::now();
        ledger.record("A", StockDirection::In, 3, now);
        ledger.record("A", StockDirection::Out, 1, now);

        let moves = ledger.movements();
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].direction, StockDirection::In);
        assert_eq!(moves[1].direction, StockDirection::Out);
        assert_ne!(moves[0].id, moves[1].id);
    }
}
