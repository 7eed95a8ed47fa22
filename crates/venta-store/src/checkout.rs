//! # Cart Builder
//!
//! Accumulates the lines a customer intends to purchase, validated against
//! live inventory, and freezes them into a pedido on submission.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Flow                                │
//! │                                                                     │
//! │  add_line("P1", 3) ──► inventory has "P1"? ──► snapshot name+price  │
//! │                             │ no                                    │
//! │                             ▼                                       │
//! │                        UnknownProduct                               │
//! │                                                                     │
//! │  submit("Alice") ──► lines empty? ──► EmptyCart                     │
//! │                          │ no                                       │
//! │                          ▼                                          │
//! │                  fresh collision-checked id                         │
//! │                          │                                          │
//! │                          ▼                                          │
//! │                  ledger.put(Pending order), cart cleared            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are snapshotted at add time and never re-read: a price edit in
//! inventory does not retroactively change an open cart or a pending order.

use tracing::{debug, info};
use uuid::Uuid;

use venta_core::cart::{Cart, CartLine};
use venta_core::error::{CoreError, CoreResult};
use venta_core::money::Money;
use venta_core::types::{Order, OrderStatus};
use venta_core::validation::{validate_customer_name, validate_phone, validate_quantity};

use crate::inventory::InventoryStore;
use crate::ledger::OrderLedger;

/// Builds a cart against live inventory and submits it as a pedido.
#[derive(Debug, Default)]
pub struct CartBuilder {
    cart: Cart,
}

impl CartBuilder {
    /// Creates an empty cart builder.
    pub fn new() -> Self {
        CartBuilder { cart: Cart::new() }
    }

    /// Adds a product to the cart, merging into an existing line.
    ///
    /// The product's current name and unit price are captured at this
    /// moment (snapshot pattern).
    pub fn add_line(
        &mut self,
        inventory: &InventoryStore,
        product_code: &str,
        quantity: i64,
    ) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let product = inventory
            .get(product_code)
            .ok_or_else(|| CoreError::UnknownProduct(product_code.to_string()))?;

        self.cart.add_product(product, quantity)?;
        debug!(code = %product_code, quantity = %quantity, "Added cart line");
        Ok(())
    }

    /// Removes a line by product code. No-op when absent.
    pub fn remove_line(&mut self, product_code: &str) {
        self.cart.remove_line(product_code);
    }

    /// Sets the quantity of an existing line.
    pub fn set_line_quantity(&mut self, product_code: &str, quantity: i64) -> CoreResult<()> {
        self.cart.set_line_quantity(product_code, quantity)
    }

    /// The lines currently in the cart.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Grand total of the open cart.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Freezes the cart into a pending order in the ledger.
    ///
    /// Fails with `EmptyCart` before anything is generated or stored. On
    /// success the cart is cleared and the stored order returned.
    pub fn submit(
        &mut self,
        ledger: &mut OrderLedger,
        customer_name: &str,
        customer_phone: Option<&str>,
    ) -> CoreResult<Order> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        validate_customer_name(customer_name)?;
        if let Some(phone) = customer_phone {
            validate_phone(phone)?;
        }

        let order = Order {
            order_id: generate_order_id(ledger),
            customer_name: customer_name.trim().to_string(),
            customer_phone: customer_phone.map(|p| p.trim().to_string()),
            lines: self.cart.take_lines(),
            submitted_at: chrono::Utc::now(),
            status: OrderStatus::Pending,
        };

        info!(
            order_id = %order.order_id,
            customer = %order.customer_name,
            total = %order.total(),
            "Pedido submitted"
        );

        ledger.put(order.clone());
        Ok(order)
    }
}

/// Generates a fresh order id, guaranteed absent from the ledger.
///
/// UUID v4 makes a collision effectively impossible, but the ledger check
/// keeps uniqueness a property of the ledger rather than of luck - rapid
/// double-submits can never share a key.
fn generate_order_id(ledger: &OrderLedger) -> String {
    loop {
        let candidate = format!("pedido-{}", Uuid::new_v4());
        if !ledger.contains(&candidate) {
            return candidate;
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
    use venta_core::types::Product;

    fn fixtures() -> (InventoryStore, OrderLedger) {
        let mut inventory = InventoryStore::open(Box::new(MemoryBackend::new())).unwrap();
        inventory
            .upsert(Product::new("P1", "Cola", 2000, 10))
            .unwrap();
        inventory
            .upsert(Product::new("P2", "Chips", 500, 2))
            .unwrap();

        let ledger = OrderLedger::open(Box::new(MemoryBackend::new())).unwrap();
        (inventory, ledger)
    }

    #[test]
    fn test_add_line_unknown_product() {
        let (inventory, _) = fixtures();
        let mut cart = CartBuilder::new();

        assert!(matches!(
            cart.add_line(&inventory, "P9", 1),
            Err(CoreError::UnknownProduct(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_line_snapshots_price() {
        let (mut inventory, _) = fixtures();
        let mut cart = CartBuilder::new();

        cart.add_line(&inventory, "P1", 3).unwrap();

        // Price change after the fact does not reach the open cart
        inventory
            .upsert(Product::new("P1", "Cola", 9999, 10))
            .unwrap();
        assert_eq!(cart.total().cents(), 6000);
    }

    #[test]
    fn test_repeated_adds_merge() {
        let (inventory, _) = fixtures();
        let mut cart = CartBuilder::new();

        cart.add_line(&inventory, "P1", 2).unwrap();
        cart.add_line(&inventory, "P1", 3).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_submit_empty_cart_fails_and_ledger_unchanged() {
        let (_, mut ledger) = fixtures();
        let mut cart = CartBuilder::new();

        assert!(matches!(
            cart.submit(&mut ledger, "Alice", None),
            Err(CoreError::EmptyCart)
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_submit_freezes_lines_and_clears_cart() {
        let (inventory, mut ledger) = fixtures();
        let mut cart = CartBuilder::new();

        cart.add_line(&inventory, "P1", 3).unwrap();
        let order = cart.submit(&mut ledger, "Alice", Some("555-123-4567")).unwrap();

        assert!(cart.is_empty());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].unit_price_cents, 2000);
        assert_eq!(order.total().cents(), 6000);
        assert!(ledger.contains(&order.order_id));
    }

    #[test]
    fn test_submit_rejects_bad_customer_input() {
        let (inventory, mut ledger) = fixtures();
        let mut cart = CartBuilder::new();
        cart.add_line(&inventory, "P1", 1).unwrap();

        assert!(cart.submit(&mut ledger, "", None).is_err());
        assert!(cart.submit(&mut ledger, "Alice", Some("123")).is_err());
        assert!(ledger.is_empty());
        // Failed submits leave the cart intact
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique_per_submit() {
        let (inventory, mut ledger) = fixtures();

        let mut ids = Vec::new();
        for _ in 0..10 {
            let mut cart = CartBuilder::new();
            cart.add_line(&inventory, "P1", 1).unwrap();
            ids.push(cart.submit(&mut ledger, "Alice", None).unwrap().order_id);
        }

        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
        assert_eq!(ledger.len(), 10);
    }
}
