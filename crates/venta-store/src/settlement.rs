//! # Settlement Engine
//!
//! Converts a pending pedido into inventory deductions and audit records,
//! or rejects it leaving every store untouched.
//!
//! ## Order State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Order State Machine                            │
//! │                                                                     │
//! │                   ┌──────────► Settled   (stock deducted,           │
//! │                   │                       movements recorded)       │
//! │     Pending ──────┤                                                 │
//! │                   ├──────────► Cancelled (nothing else touched)     │
//! │                   │                                                 │
//! │                   └──────────► Rejected  (stays Pending in ledger,  │
//! │                                           reason returned)          │
//! │                                                                     │
//! │  Settled and Cancelled are terminal: the order leaves the ledger    │
//! │  and the same id can never settle again.                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! `settle` validates every line before deducting anything. A failure at
//! any point of the validation pass returns before the first mutation, so
//! the inventory store, the movement log, and the ledger always change
//! together or not at all.

use chrono::Utc;
use tracing::{debug, info};

use venta_core::error::{CoreError, CoreResult};
use venta_core::receipt::Receipt;
use venta_core::types::{Movement, MovementDirection, Order, OrderStatus};
use venta_core::validation::validate_quantity;

use crate::inventory::InventoryStore;
use crate::ledger::OrderLedger;
use crate::movements::MovementLog;

/// Settles, cancels, and restocks across the three stores.
///
/// This is the only component that mutates more than one store within a
/// single logical operation. It borrows the stores for the duration of a
/// call sequence; construct one where settlement happens and let it go.
#[derive(Debug)]
pub struct SettlementEngine<'a> {
    inventory: &'a mut InventoryStore,
    ledger: &'a mut OrderLedger,
    movements: &'a mut MovementLog,
}

impl<'a> SettlementEngine<'a> {
    /// Creates an engine over the three stores.
    pub fn new(
        inventory: &'a mut InventoryStore,
        ledger: &'a mut OrderLedger,
        movements: &'a mut MovementLog,
    ) -> Self {
        SettlementEngine {
            inventory,
            ledger,
            movements,
        }
    }

    /// Settles a pending order against current inventory.
    ///
    /// ## What This Does
    /// 1. Looks up the order; `OrderNotFound` if absent
    /// 2. Re-resolves every line against inventory; `ProductMissing` if a
    ///    referenced product was deleted since submission
    /// 3. Checks every line fits in stock; `InsufficientStock` if any
    ///    would drive the on-hand quantity negative - no partial deduction
    /// 4. Deducts stock per line, appends one Outbound movement per line,
    ///    removes the order from the ledger
    /// 5. Returns the receipt for the settled order
    ///
    /// On any failure nothing is mutated and the order stays pending.
    pub fn settle(&mut self, order_id: &str, actor: Option<&str>) -> CoreResult<Receipt> {
        // Validation pass: no store is touched until every line clears
        {
            let order = self
                .ledger
                .get(order_id)
                .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

            for line in &order.lines {
                let product = self
                    .inventory
                    .get(&line.product_code)
                    .ok_or_else(|| CoreError::ProductMissing(line.product_code.clone()))?;

                if !product.can_fill(line.quantity) {
                    return Err(CoreError::InsufficientStock {
                        code: line.product_code.clone(),
                        available: product.quantity_on_hand,
                        requested: line.quantity,
                    });
                }
            }
        }

        // Apply pass: every step below is guaranteed to succeed
        let mut order = self
            .ledger
            .remove(order_id)
            .map_err(|_| CoreError::OrderNotFound(order_id.to_string()))?;
        let settled_at = Utc::now();

        for line in &order.lines {
            self.inventory
                .adjust_quantity(&line.product_code, -line.quantity)
                .map_err(|_| CoreError::ProductMissing(line.product_code.clone()))?;

            self.movements.append(Movement {
                timestamp: settled_at,
                product_code: line.product_code.clone(),
                product_name: line.name.clone(),
                quantity_delta: -line.quantity,
                direction: MovementDirection::Outbound,
                actor: actor.map(str::to_string),
            });
        }

        order.status = OrderStatus::Settled;
        info!(
            order_id = %order_id,
            total = %order.total(),
            lines = order.lines.len(),
            "Pedido settled"
        );

        Ok(Receipt::from_order(&order, settled_at))
    }

    /// Cancels a pending order.
    ///
    /// Removes it from the ledger without touching inventory or the
    /// movement log. Returns the cancelled order.
    pub fn cancel(&mut self, order_id: &str) -> CoreResult<Order> {
        let mut order = self
            .ledger
            .remove(order_id)
            .map_err(|_| CoreError::OrderNotFound(order_id.to_string()))?;

        order.status = OrderStatus::Cancelled;
        info!(order_id = %order_id, "Pedido cancelled");
        Ok(order)
    }

    /// Receives stock for an existing product.
    ///
    /// Raises the on-hand quantity and appends one Inbound movement.
    /// Returns the new on-hand quantity.
    pub fn restock(&mut self, product_code: &str, quantity: i64, actor: Option<&str>) -> CoreResult<i64> {
        validate_quantity(quantity)?;

        let product_name = self
            .inventory
            .get(product_code)
            .map(|p| p.name.clone())
            .ok_or_else(|| CoreError::UnknownProduct(product_code.to_string()))?;

        let new_quantity = self
            .inventory
            .adjust_quantity(product_code, quantity)
            .map_err(|_| CoreError::UnknownProduct(product_code.to_string()))?;

        self.movements.append(Movement {
            timestamp: Utc::now(),
            product_code: product_code.to_string(),
            product_name,
            quantity_delta: quantity,
            direction: MovementDirection::Inbound,
            actor: actor.map(str::to_string),
        });

        debug!(code = %product_code, on_hand = %new_quantity, "Stock received");
        Ok(new_quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
