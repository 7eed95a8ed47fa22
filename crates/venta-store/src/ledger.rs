//! # Order Ledger
//!
//! The durable record of submitted-but-unsettled carts ("pedidos"), keyed
//! by order id.
//!
//! ## Ledger Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Ledger Lifecycle                              │
//! │                                                                     │
//! │  CartBuilder::submit() ──► put(order)       (order is Pending)      │
//! │                                                                     │
//! │  SettlementEngine::settle() ──► remove(id)  (stamped Settled)       │
//! │  SettlementEngine::cancel() ──► remove(id)  (stamped Cancelled)     │
//! │                                                                     │
//! │  A removed order is gone: a second settle or cancel on the same     │
//! │  id reports OrderNotFound.                                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Legacy Shapes
//! Earlier revisions persisted a pedido as a bare line array, later as
//! `{cartItems, username, phoneNumber}`. Loading normalizes both into the
//! canonical Order record; the map key is always the authoritative order id.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, warn};

use venta_core::cart::CartLine;
use venta_core::types::{Order, OrderStatus};

use crate::backend::{StorageBackend, PEDIDOS_KEY};
use crate::error::{StoreError, StoreResult};

/// One stored pedido in any of its historical shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredOrder {
    /// Canonical record, or the `{cartItems, username, phoneNumber}`
    /// revision (handled by serde aliases on `Order`).
    Record(Order),
    /// Oldest revision: the cart lines alone.
    Lines(Vec<CartLine>),
}

impl StoredOrder {
    /// Normalizes into the canonical record under the given ledger key.
    fn into_order(self, order_id: &str) -> Order {
        let mut order = match self {
            StoredOrder::Record(order) => order,
            StoredOrder::Lines(lines) => Order {
                order_id: String::new(),
                customer_name: String::new(),
                customer_phone: None,
                lines,
                submitted_at: chrono::Utc::now(),
                status: OrderStatus::Pending,
            },
        };
        // The map key wins over whatever the record carried
        order.order_id = order_id.to_string();
        order.status = OrderStatus::Pending;
        order
    }
}

/// Pending orders, keyed by order id.
#[derive(Debug)]
pub struct OrderLedger {
    orders: BTreeMap<String, Order>,
    backend: Box<dyn StorageBackend>,
}

impl OrderLedger {
    /// Opens the ledger, normalizing any legacy-shape records.
    pub fn open(backend: Box<dyn StorageBackend>) -> StoreResult<Self> {
        let orders = match backend.load(PEDIDOS_KEY)? {
            Some(payload) => match serde_json::from_str::<BTreeMap<String, StoredOrder>>(&payload)
            {
                Ok(stored) => stored
                    .into_iter()
                    .map(|(id, record)| {
                        let order = record.into_order(&id);
                        (id, order)
                    })
                    .collect(),
                Err(e) => {
                    warn!(key = PEDIDOS_KEY, error = %e, "Malformed record, starting empty");
                    BTreeMap::new()
                }
            },
            None => BTreeMap::new(),
        };

        debug!(count = orders.len(), "Order ledger loaded");
        Ok(OrderLedger { orders, backend })
    }

    /// Stores an order under its id, replacing any previous entry.
    pub fn put(&mut self, order: Order) {
        debug!(order_id = %order.order_id, lines = order.lines.len(), "Storing pedido");
        self.orders.insert(order.order_id.clone(), order);
        self.persist();
    }

    /// Gets a pending order by id.
    pub fn get(&self, order_id: &str) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Checks whether an id is present.
    pub fn contains(&self, order_id: &str) -> bool {
        self.orders.contains_key(order_id)
    }

    /// Removes and returns the order under `order_id`.
    pub fn remove(&mut self, order_id: &str) -> StoreResult<Order> {
        let order = self
            .orders
            .remove(order_id)
            .ok_or_else(|| StoreError::not_found("Order", order_id))?;

        debug!(order_id = %order_id, "Removed pedido");
        self.persist();
        Ok(order)
    }

    /// All pending orders.
    pub fn list(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Number of pending orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Checks if the ledger has no pending orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Mirrors the in-memory ledger to the backend.
    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.orders) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = PEDIDOS_KEY, error = %e, "Failed to serialize ledger");
                return;
            }
        };

        if let Err(e) = self.backend.save(PEDIDOS_KEY, &payload) {
            warn!(key = PEDIDOS_KEY, error = %e, "Write-through failed; memory is authoritative");
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
    use chrono::Utc;

    fn order(id: &str, customer: &str) -> Order {
        Order {
            order_id: id.to_string(),
            customer_name: customer.to_string(),
            customer_phone: None,
            lines: vec![CartLine {
                product_code: "P1".to_string(),
                name: "Cola".to_string(),
                unit_price_cents: 2000,
                quantity: 3,
            }],
            submitted_at: Utc::now(),
            status: OrderStatus::Pending,
        }
    }

    #[test]
    fn test_put_get_remove() {
        let mut ledger = OrderLedger::open(Box::new(MemoryBackend::new())).unwrap();

        ledger.put(order("pedido-1", "Alice"));
        assert!(ledger.contains("pedido-1"));
        assert_eq!(ledger.get("pedido-1").unwrap().customer_name, "Alice");
        assert_eq!(ledger.len(), 1);

        let removed = ledger.remove("pedido-1").unwrap();
        assert_eq!(removed.order_id, "pedido-1");
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_remove_absent_is_not_found() {
        let mut ledger = OrderLedger::open(Box::new(MemoryBackend::new())).unwrap();

        assert!(matches!(
            ledger.remove("pedido-9"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_write_through_survives_reopen() {
        let backend = MemoryBackend::new();
        {
            let mut ledger = OrderLedger::open(Box::new(backend.clone())).unwrap();
            ledger.put(order("pedido-1", "Alice"));
            ledger.put(order("pedido-2", "Bob"));
            ledger.remove("pedido-2").unwrap();
        }

        let ledger = OrderLedger::open(Box::new(backend)).unwrap();
        assert_eq!(ledger.len(), 1);
        assert!(ledger.contains("pedido-1"));
    }

    #[test]
    fn test_legacy_bare_array_normalizes() {
        let payload = r#"{
            "pedido_1700000000000": [
                {"productCode": "P1", "name": "Cola", "unitPriceCents": 2000, "quantity": 2}
            ]
        }"#;
        let backend =
            MemoryBackend::with_records([(PEDIDOS_KEY.to_string(), payload.to_string())]);

        let ledger = OrderLedger::open(Box::new(backend)).unwrap();
        let order = ledger.get("pedido_1700000000000").unwrap();

        assert_eq!(order.order_id, "pedido_1700000000000");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.lines.len(), 1);
        assert!(order.customer_name.is_empty());
    }

    #[test]
    fn test_legacy_record_shape_normalizes() {
        let payload = r#"{
            "pedido_1700000000001": {
                "cartItems": [
                    {"productCode": "P2", "name": "Chips", "unitPriceCents": 500, "quantity": 1}
                ],
                "username": "Alice",
                "phoneNumber": "555-123-4567"
            }
        }"#;
        let backend =
            MemoryBackend::with_records([(PEDIDOS_KEY.to_string(), payload.to_string())]);

        let ledger = OrderLedger::open(Box::new(backend)).unwrap();
        let order = ledger.get("pedido_1700000000001").unwrap();

        assert_eq!(order.customer_name, "Alice");
        assert_eq!(order.customer_phone.as_deref(), Some("555-123-4567"));
        assert_eq!(order.lines[0].product_code, "P2");
    }

    #[test]
    fn test_malformed_record_loads_as_empty() {
        let backend =
            MemoryBackend::with_records([(PEDIDOS_KEY.to_string(), "not json".to_string())]);

        let ledger = OrderLedger::open(Box::new(backend)).unwrap();
        assert!(ledger.is_empty());
    }
}
