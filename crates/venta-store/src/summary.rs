//! # Dashboard Summary
//!
//! The at-a-glance counts the home screen shows: catalog size, units on
//! hand, and the pending pedido queue with its value. Pure reads; nothing
//! here mutates a store.

use serde::Serialize;

use venta_core::money::Money;

use crate::inventory::InventoryStore;
use crate::ledger::OrderLedger;

/// A snapshot of the current state of the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Distinct products in the catalog.
    pub product_count: usize,
    /// Total units on hand across the catalog.
    pub units_on_hand: i64,
    /// Pedidos awaiting settlement.
    pub pending_orders: usize,
    /// Combined value of all pending pedidos, in cents.
    pub pending_total_cents: i64,
}

/// Computes the dashboard counts over current store state.
pub fn dashboard_summary(inventory: &InventoryStore, ledger: &OrderLedger) -> DashboardSummary {
    let pending_total = ledger
        .list()
        .fold(Money::zero(), |acc, order| acc + order.total());

    DashboardSummary {
        product_count: inventory.count(),
        units_on_hand: inventory.list().iter().map(|p| p.quantity_on_hand).sum(),
        pending_orders: ledger.len(),
        pending_total_cents: pending_total.cents(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::checkout::CartBuilder;
    use venta_core::types::Product;

    #[test]
    fn test_summary_over_stores() {
        let mut inventory = InventoryStore::open(Box::new(MemoryBackend::new())).unwrap();
        inventory
            .upsert(Product::new("P1", "Cola", 2000, 10))
            .unwrap();
        inventory
            .upsert(Product::new("P2", "Chips", 500, 4))
            .unwrap();

        let mut ledger = OrderLedger::open(Box::new(MemoryBackend::new())).unwrap();
        let mut cart = CartBuilder::new();
        cart.add_line(&inventory, "P1", 2).unwrap();
        cart.submit(&mut ledger, "Alice", None).unwrap();

        let summary = dashboard_summary(&inventory, &ledger);
        assert_eq!(
            summary,
            DashboardSummary {
                product_count: 2,
                units_on_hand: 14,
                pending_orders: 1,
                pending_total_cents: 4000,
            }
        );
    }

    #[test]
    fn test_summary_of_empty_shop() {
        let inventory = InventoryStore::open(Box::new(MemoryBackend::new())).unwrap();
        let ledger = OrderLedger::open(Box::new(MemoryBackend::new())).unwrap();

        let summary = dashboard_summary(&inventory, &ledger);
        assert_eq!(summary.product_count, 0);
        assert_eq!(summary.pending_total_cents, 0);
    }
}
