//! # Domain Types
//!
//! Core domain types used throughout VentaFacil.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │     Order       │   │    Movement     │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  code (key)     │   │  order_id (key) │   │  timestamp      │   │
//! │  │  name           │   │  customer_name  │   │  product_code   │   │
//! │  │  price_cents    │   │  lines          │   │  quantity_delta │   │
//! │  │  quantity_on_   │   │  status         │   │  direction      │   │
//! │  │    hand         │   │                 │   │  actor          │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘   │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌───────────────────┐                       │
//! │  │  OrderStatus    │   │ MovementDirection │                       │
//! │  │  Pending        │   │ Inbound (restock) │                       │
//! │  │  Settled        │   │ Outbound (sale)   │                       │
//! │  │  Cancelled      │   └───────────────────┘                       │
//! │  └─────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// The `code` is the business key: unique within inventory, chosen by the
/// operator, and referenced by cart lines and movements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product code (business identifier).
    pub code: String,

    /// Display name shown in carts, receipts, and the movement log.
    pub name: String,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Units currently available for sale. Non-negative at rest;
    /// only settlement decrements it, only restock and manual edits raise it.
    pub quantity_on_hand: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product stamped with the current time.
    pub fn new(code: impl Into<String>, name: impl Into<String>, price_cents: i64, quantity_on_hand: i64) -> Self {
        let now = Utc::now();
        Product {
            code: code.into(),
            name: name.into(),
            price_cents,
            quantity_on_hand,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the requested quantity can be filled from stock.
    #[inline]
    pub fn can_fill(&self, quantity: i64) -> bool {
        self.quantity_on_hand >= quantity
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of an order.
///
/// Pending orders live in the order ledger. `Settled` and `Cancelled` are
/// terminal: they are stamped on the order as it leaves the ledger, so a
/// caller holding the returned order can tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Submitted, awaiting settlement.
    Pending,
    /// Settled against inventory; stock was deducted and movements recorded.
    Settled,
    /// Removed without touching inventory.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order
// =============================================================================

/// A submitted, not-yet-settled shopping cart (a "pedido").
///
/// ## Snapshot Pattern
/// The lines are a frozen copy of the cart at submission time. Product names
/// and prices inside them never change afterwards, even if inventory does.
///
/// ## Legacy Shapes
/// Earlier revisions stored a pedido as either a bare line array or as
/// `{cartItems, username, phoneNumber}`. The serde aliases and defaults here
/// let both deserialize into the canonical record; the ledger rewrites them
/// canonically on the next write-through.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Opaque unique order identifier (the ledger key).
    #[serde(default)]
    pub order_id: String,

    /// Name of the customer the pedido is for.
    #[serde(default, alias = "username")]
    pub customer_name: String,

    /// Customer contact phone, if given.
    #[serde(default, alias = "phoneNumber")]
    pub customer_phone: Option<String>,

    /// Frozen cart lines.
    #[serde(alias = "cartItems")]
    pub lines: Vec<CartLine>,

    /// When the cart was submitted.
    #[serde(default = "Utc::now")]
    pub submitted_at: DateTime<Utc>,

    /// Lifecycle status. Always `Pending` while stored in the ledger.
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Grand total over all lines.
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total())
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Movement
// =============================================================================

/// Which way stock moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementDirection {
    /// Stock received (restock).
    Inbound,
    /// Stock sold (settlement).
    Outbound,
}

/// One audited inventory quantity change.
///
/// Movements are append-only: once recorded they are never mutated or
/// deleted. `quantity_delta` is signed (negative for outbound).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    /// When the change happened.
    pub timestamp: DateTime<Utc>,

    /// Code of the product whose stock changed.
    pub product_code: String,

    /// Product name at the time of the change (frozen).
    pub product_name: String,

    /// Signed change in units: negative for outbound, positive for inbound.
    pub quantity_delta: i64,

    /// Direction of the change.
    pub direction: MovementDirection,

    /// Operator identity that triggered the change, if a session was active.
    pub actor: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(code: &str, price_cents: i64, quantity: i64) -> CartLine {
        CartLine {
            product_code: code.to_string(),
            name: format!("Product {}", code),
            unit_price_cents: price_cents,
            quantity,
        }
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_order_total() {
        let order = Order {
            order_id: "pedido-1".to_string(),
            customer_name: "Alice".to_string(),
            customer_phone: None,
            lines: vec![line("P1", 2000, 3), line("P2", 500, 2)],
            submitted_at: Utc::now(),
            status: OrderStatus::Pending,
        };

        assert_eq!(order.total().cents(), 7000);
        assert_eq!(order.total_quantity(), 5);
    }

    #[test]
    fn test_order_reads_legacy_record_shape() {
        // The {cartItems, username, phoneNumber} revision
        let json = r#"{
            "cartItems": [
                {"productCode": "P1", "name": "Cola", "unitPriceCents": 2000, "quantity": 3}
            ],
            "username": "Alice",
            "phoneNumber": "555-1234"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.customer_name, "Alice");
        assert_eq!(order.customer_phone.as_deref(), Some("555-1234"));
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.order_id.is_empty()); // ledger key fills this in
    }

    #[test]
    fn test_product_can_fill() {
        let product = Product::new("P1", "Cola", 2000, 10);
        assert!(product.can_fill(10));
        assert!(!product.can_fill(11));
    }
}
