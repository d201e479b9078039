//! # Catalog
//!
//! The product set: unique immutable codes, validated fields, insertion
//! order preserved (the reorder list and hydration round-trips rely on it).
//!
//! ## Prepare/Apply Split
//! ```text
//! prepare_upsert / prepare_remove     pure, fallible, no mutation
//!             │
//!             ▼
//!   engine persists the prospective record (may fail, nothing changed)
//!             │
//!             ▼
//! apply_upsert / apply_remove / apply_stock     infallible mutation
//! ```
//!
//! This is what lets the engine keep the "commit to durable store first,
//! mutate local state second" ordering without ever rolling back memory.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::validation::{validate_code, validate_name, validate_price, validate_stock};

// =============================================================================
// Catalog
// =============================================================================

/// The in-memory product set, exclusively owned by the engine.
///
/// ## Invariants
/// - Codes are unique
/// - Every product satisfies `price > 0` and `stock >= 0`
/// - Iteration order is insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog {
            products: Vec::new(),
        }
    }

    /// Rebuilds a catalog from store output, preserving order.
    ///
    /// Hydration trusts the store: records were validated on the way in.
    pub fn hydrate(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Finds a product by code.
    pub fn find(&self, code: &str) -> CoreResult<&Product> {
        self.get(code).ok_or_else(|| CoreError::not_found(code))
    }

    /// Finds a product by code, `None` if absent.
    pub fn get(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Sum of stock across all products (dashboard figure).
    pub fn total_stock(&self) -> i64 {
        self.products.iter().map(|p| p.stock).sum()
    }

    // -------------------------------------------------------------------------
    // Prepare (pure, fallible)
    // -------------------------------------------------------------------------

    /// Validates an insert or edit and returns the record that would be
    /// stored. Does not mutate.
    ///
    /// ## Rules
    /// - `name` non-empty, `price > 0`, `stock >= 0`
    /// - insert (`editing == false`): the code must be free
    /// - edit (`editing == true`): the product must exist; the code is
    ///   immutable, only the owned fields change
    pub fn prepare_upsert(
        &self,
        code: &str,
        name: &str,
        price: i64,
        stock: i64,
        editing: bool,
    ) -> CoreResult<Product> {
        validate_code(code)?;
        validate_name(name)?;
        validate_price(price)?;
        validate_stock(stock)?;

        if editing {
            // Existence check only; the code stays what it was.
            self.find(code)?;
        } else if self.get(code).is_some() {
            return Err(CoreError::duplicate(code));
        }

        Ok(Product {
            code: code.trim().to_string(),
            name: name.trim().to_string(),
            price,
            stock,
        })
    }

    /// Checks that a product exists before a removal is persisted.
    ///
    /// Removal is otherwise unconditional: history holds its own snapshots,
    /// so removing a product referenced by past transactions is fine.
    pub fn prepare_remove(&self, code: &str) -> CoreResult<&Product> {
        self.find(code)
    }

    // -------------------------------------------------------------------------
    // Apply (infallible once prepared)
    // -------------------------------------------------------------------------

    /// Inserts or replaces the record produced by [`Self::prepare_upsert`].
    /// An edit keeps the product's position; an insert appends.
    pub fn apply_upsert(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.code == product.code) {
            Some(existing) => *existing = product,
            None => self.products.push(product),
        }
    }

    /// Removes a product by code. Returns the removed record, if any.
    pub fn apply_remove(&mut self, code: &str) -> Option<Product> {
        let idx = self.products.iter().position(|p| p.code == code)?;
        Some(self.products.remove(idx))
    }

    /// Sets a product's stock to a level already validated by the stock
    /// ledger or transaction processor. Unknown codes are ignored.
    pub fn apply_stock(&mut self, code: &str, stock: i64) {
        if let Some(p) = self.products.iter_mut().find(|p| p.code == code) {
            p.stock = stock;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(codes: &[(&str, i64, i64)]) -> Catalog {
        let mut catalog = Catalog::new();
        for (code, price, stock) in codes {
            let p = catalog
                .prepare_upsert(code, &format!("Product {}", code), *price, *stock, false)
                .unwrap();
            catalog.apply_upsert(p);
        }
        catalog
    }

    #[test]
    fn test_insert_and_find() {
        let catalog = catalog_with(&[("A", 3_500, 2)]);

        let p = catalog.find("A").unwrap();
        assert_eq!(p.name, "Product A");
        assert_eq!(p.stock, 2);
        assert!(matches!(
            catalog.find("B"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let catalog = catalog_with(&[("A", 3_500, 2)]);

        let err = catalog
            .prepare_upsert("A", "Other", 1_000, 0, false)
            .unwrap_err();
        assert!(matches!(err, CoreError::Duplicate { .. }));
    }

    #[test]
    fn test_edit_keeps_code_and_position() {
        let mut catalog = catalog_with(&[("A", 3_500, 2), ("B", 2_000, 9)]);

        let edited = catalog
            .prepare_upsert("A", "Kopi Susu", 4_000, 7, true)
            .unwrap();
        catalog.apply_upsert(edited);

        assert_eq!(catalog.products()[0].code, "A");
        assert_eq!(catalog.products()[0].name, "Kopi Susu");
        assert_eq!(catalog.products()[0].price, 4_000);
        assert_eq!(catalog.products()[1].code, "B");
    }

    #[test]
    fn test_edit_of_missing_product_rejected() {
        let catalog = Catalog::new();
        assert!(matches!(
            catalog.prepare_upsert("A", "Kopi", 3_500, 2, true),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_field_validation() {
        let catalog = Catalog::new();

        assert!(matches!(
            catalog.prepare_upsert("A", "", 3_500, 2, false),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            catalog.prepare_upsert("A", "Kopi", 0, 2, false),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            catalog.prepare_upsert("A", "Kopi", 3_500, -1, false),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_remove() {
        let mut catalog = catalog_with(&[("A", 3_500, 2), ("B", 2_000, 9)]);

        catalog.prepare_remove("A").unwrap();
        let removed = catalog.apply_remove("A").unwrap();
        assert_eq!(removed.code, "A");
        assert_eq!(catalog.len(), 1);

        assert!(catalog.prepare_remove("A").is_err());
        assert!(catalog.apply_remove("A").is_none());
    }

    #[test]
    fn test_total_stock() {
        let catalog = catalog_with(&[("A", 3_500, 2), ("B", 2_000, 9)]);
        assert_eq!(catalog.total_stock(), 11);
    }
}
