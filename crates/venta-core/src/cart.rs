//! # Cart
//!
//! The cart aggregate: the lines a customer intends to purchase.
//!
//! ## Cart Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                             │
//! │                                                                     │
//! │  add_product(P, qty) ──► line for P exists?                         │
//! │                             │ yes: line.quantity += qty             │
//! │                             │ no:  push snapshot line               │
//! │                                                                     │
//! │  set_line_quantity(code, qty) ──► qty <= 0 is an error              │
//! │                                                                     │
//! │  remove_line(code) ──► no-op when the code is not in the cart       │
//! │                                                                     │
//! │  total() ──► Σ unit_price × quantity                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Freezing
//! A line snapshots the product's name and unit price at the moment it is
//! added. A later price change in inventory does not reach an open cart.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_quantity;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One line of a cart: a product reference plus a frozen name and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Code of the referenced product.
    pub product_code: String,

    /// Product name at the time of adding (frozen).
    pub name: String,

    /// Unit price in cents at the time of adding (frozen).
    pub unit_price_cents: i64,

    /// Units of this product in the cart. Always >= 1.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a line from a product, snapshotting its name and price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_code: product.code.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity,
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// An ordered sequence of cart lines, unique by product code.
///
/// ## Invariants
/// - One line per product code (adding the same product merges quantities)
/// - Every line quantity is >= 1
/// - At most [`MAX_CART_LINES`] lines, [`MAX_LINE_QUANTITY`] units per line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart or merges into its existing line.
    pub fn add_product(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_code == product.code)
        {
            let new_quantity = line.quantity + quantity;
            if new_quantity > MAX_LINE_QUANTITY {
                return Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: MAX_LINE_QUANTITY,
                }
                .into());
            }
            line.quantity = new_quantity;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine::from_product(product, quantity));
        Ok(())
    }

    /// Sets the quantity of an existing line.
    pub fn set_line_quantity(&mut self, product_code: &str, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_code == product_code)
            .ok_or_else(|| CoreError::UnknownProduct(product_code.to_string()))?;

        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line by product code. No-op when the code is not present.
    ///
    /// Returns `true` if a line was removed.
    pub fn remove_line(&mut self, product_code: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_code != product_code);
        self.lines.len() != before
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Moves the lines out, leaving the cart empty.
    ///
    /// Used at submission time to freeze the cart into an order.
    pub fn take_lines(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Grand total over all lines.
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(code: &str, price_cents: i64) -> Product {
        Product::new(code, format!("Product {}", code), price_cents, 100)
    }

    #[test]
    fn test_add_product() {
        let mut cart = Cart::new();
        let product = test_product("P1", 999);

        cart.add_product(&product, 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total().cents(), 1998);
    }

    #[test]
    fn test_add_same_product_merges_quantities() {
        let mut cart = Cart::new();
        let product = test_product("P1", 999);

        cart.add_product(&product, 2).unwrap();
        cart.add_product(&product, 3).unwrap();
        cart.add_product(&product, 1).unwrap();

        // One line whose quantity is the sum of every add
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 6);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        let product = test_product("P1", 999);

        assert!(cart.add_product(&product, 0).is_err());
        assert!(cart.add_product(&product, -3).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_price_is_frozen_at_add_time() {
        let mut cart = Cart::new();
        let mut product = test_product("P1", 1000);

        cart.add_product(&product, 1).unwrap();

        // Inventory price changes after the line was added
        product.price_cents = 9999;
        assert_eq!(cart.lines()[0].unit_price_cents, 1000);
        assert_eq!(cart.total().cents(), 1000);
    }

    #[test]
    fn test_set_line_quantity() {
        let mut cart = Cart::new();
        let product = test_product("P1", 500);

        cart.add_product(&product, 2).unwrap();
        cart.set_line_quantity("P1", 7).unwrap();
        assert_eq!(cart.total_quantity(), 7);

        assert!(cart.set_line_quantity("P1", 0).is_err());
        assert!(cart.set_line_quantity("P9", 1).is_err());
    }

    #[test]
    fn test_remove_line_is_noop_when_absent() {
        let mut cart = Cart::new();
        let product = test_product("P1", 500);

        cart.add_product(&product, 1).unwrap();
        assert!(!cart.remove_line("P9"));
        assert_eq!(cart.line_count(), 1);

        assert!(cart.remove_line("P1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_take_lines_empties_the_cart() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("P1", 500), 2).unwrap();
        cart.add_product(&test_product("P2", 300), 1).unwrap();

        let lines = cart.take_lines();
        assert_eq!(lines.len(), 2);
        assert!(cart.is_empty());
    }
}
