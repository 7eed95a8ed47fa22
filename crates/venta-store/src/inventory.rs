//! # Inventory Store
//!
//! The catalog of sellable products and their stock levels.
//!
//! ## Write-Through
//! Every mutation is mirrored to the `products` record immediately. If the
//! write fails, the in-memory state stays authoritative for the rest of the
//! process lifetime; the failure is logged, not propagated.
//!
//! ## Load Behavior
//! A missing record means an empty catalog. A malformed record is treated
//! the same way (with a warning) - a corrupt host store must never crash
//! the application.

use tracing::{debug, warn};

use venta_core::types::Product;
use venta_core::validation::{
    validate_on_hand, validate_price_cents, validate_product_code, validate_product_name,
};

use crate::backend::{StorageBackend, PRODUCTS_KEY};
use crate::error::{StoreError, StoreResult};

/// The product catalog, keyed by product code, in insertion order.
#[derive(Debug)]
pub struct InventoryStore {
    products: Vec<Product>,
    backend: Box<dyn StorageBackend>,
}

impl InventoryStore {
    /// Opens the store, loading whatever the backend holds.
    pub fn open(backend: Box<dyn StorageBackend>) -> StoreResult<Self> {
        let products = match backend.load(PRODUCTS_KEY)? {
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(products) => products,
                Err(e) => {
                    warn!(key = PRODUCTS_KEY, error = %e, "Malformed record, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        debug!(count = products.len(), "Inventory loaded");
        Ok(InventoryStore { products, backend })
    }

    /// Gets a product by its code.
    pub fn get(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    /// All products in insertion order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    pub fn count(&self) -> usize {
        self.products.len()
    }

    /// Inserts a new product or replaces the one with the same code.
    ///
    /// On replace, `created_at` is preserved and `updated_at` is stamped.
    pub fn upsert(&mut self, product: Product) -> StoreResult<()> {
        validate_product_code(&product.code)?;
        validate_product_name(&product.name)?;
        validate_price_cents(product.price_cents)?;
        validate_on_hand(product.quantity_on_hand)?;

        debug!(code = %product.code, "Upserting product");

        if let Some(existing) = self.products.iter_mut().find(|p| p.code == product.code) {
            let created_at = existing.created_at;
            *existing = product;
            existing.created_at = created_at;
            existing.updated_at = chrono::Utc::now();
            self.persist();
            return Ok(());
        }

        self.products.push(product);
        self.persist();
        Ok(())
    }

    /// Deletes a product by code. Returns `true` if it existed.
    pub fn delete(&mut self, code: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.code != code);
        let removed = self.products.len() != before;

        if removed {
            debug!(code = %code, "Deleted product");
            self.persist();
        }
        removed
    }

    /// Applies a signed delta to a product's on-hand quantity.
    ///
    /// Returns the new quantity. The delta is applied as given; callers that
    /// must not drive stock negative (settlement) check before calling.
    pub fn adjust_quantity(&mut self, code: &str, delta: i64) -> StoreResult<i64> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.code == code)
            .ok_or_else(|| StoreError::not_found("Product", code))?;

        product.quantity_on_hand += delta;
        product.updated_at = chrono::Utc::now();
        let new_quantity = product.quantity_on_hand;

        debug!(code = %code, delta = %delta, on_hand = %new_quantity, "Adjusted stock");

        self.persist();
        Ok(new_quantity)
    }

    /// Mirrors the in-memory catalog to the backend.
    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.products) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = PRODUCTS_KEY, error = %e, "Failed to serialize catalog");
                return;
            }
        };

        if let Err(e) = self.backend.save(PRODUCTS_KEY, &payload) {
            warn!(key = PRODUCTS_KEY, error = %e, "Write-through failed; memory is authoritative");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn open_empty() -> InventoryStore {
        InventoryStore::open(Box::new(MemoryBackend::new())).unwrap()
    }

    #[test]
    fn test_upsert_and_get() {
        let mut store = open_empty();
        store.upsert(Product::new("P1", "Cola", 2000, 10)).unwrap();

        let product = store.get("P1").unwrap();
        assert_eq!(product.name, "Cola");
        assert_eq!(product.quantity_on_hand, 10);
        assert!(store.get("P9").is_none());
    }

    #[test]
    fn test_upsert_replaces_existing_code() {
        let mut store = open_empty();
        store.upsert(Product::new("P1", "Cola", 2000, 10)).unwrap();
        store
            .upsert(Product::new("P1", "Cola Zero", 2100, 4))
            .unwrap();

        assert_eq!(store.count(), 1);
        let product = store.get("P1").unwrap();
        assert_eq!(product.name, "Cola Zero");
        assert_eq!(product.price_cents, 2100);
        assert_eq!(product.quantity_on_hand, 4);
    }

    #[test]
    fn test_upsert_rejects_invalid_fields() {
        let mut store = open_empty();

        assert!(store.upsert(Product::new("", "Cola", 2000, 10)).is_err());
        assert!(store.upsert(Product::new("P1", "", 2000, 10)).is_err());
        assert!(store.upsert(Product::new("P1", "Cola", -5, 10)).is_err());
        assert!(store.upsert(Product::new("P1", "Cola", 2000, -1)).is_err());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_delete() {
        let mut store = open_empty();
        store.upsert(Product::new("P1", "Cola", 2000, 10)).unwrap();

        assert!(store.delete("P1"));
        assert!(!store.delete("P1"));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_adjust_quantity() {
        let mut store = open_empty();
        store.upsert(Product::new("P1", "Cola", 2000, 10)).unwrap();

        assert_eq!(store.adjust_quantity("P1", -3).unwrap(), 7);
        assert_eq!(store.adjust_quantity("P1", 5).unwrap(), 12);
        assert!(matches!(
            store.adjust_quantity("P9", 1),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_write_through_survives_reopen() {
        let backend = MemoryBackend::new();
        {
            let mut store = InventoryStore::open(Box::new(backend.clone())).unwrap();
            store.upsert(Product::new("P1", "Cola", 2000, 10)).unwrap();
            store.adjust_quantity("P1", -3).unwrap();
        }

        let store = InventoryStore::open(Box::new(backend)).unwrap();
        assert_eq!(store.count(), 1);
        assert_eq!(store.get("P1").unwrap().quantity_on_hand, 7);
    }

    #[test]
    fn test_malformed_record_loads_as_empty() {
        let backend = MemoryBackend::with_records([(
            PRODUCTS_KEY.to_string(),
            "{not json".to_string(),
        )]);

        let store = InventoryStore::open(Box::new(backend)).unwrap();
        assert_eq!(store.count(), 0);
    }
}
