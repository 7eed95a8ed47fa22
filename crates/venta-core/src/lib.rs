//! # venta-core: Pure Business Logic for VentaFacil
//!
//! This crate is the **heart** of VentaFacil. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     VentaFacil Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 ★ venta-core (THIS CRATE) ★                 │   │
//! │  │                                                             │   │
//! │  │  ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌────────────┐     │   │
//! │  │  │  types  │  │  money  │  │  cart   │  │ validation │     │   │
//! │  │  │ Product │  │  Money  │  │  Cart   │  │   rules    │     │   │
//! │  │  │  Order  │  │         │  │CartLine │  │   checks   │     │   │
//! │  │  └─────────┘  └─────────┘  └─────────┘  └────────────┘     │   │
//! │  │                                                             │   │
//! │  │  NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                 venta-store (storage layer)                 │   │
//! │  │     inventory, order ledger, movement log, settlement       │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Movement, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart aggregate and its line-merging rules
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`receipt`] - Receipt value object and text formatting
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use venta_core::Money` instead of
// `use venta_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{format_receipt, Receipt, ReceiptLine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable pedido sizes.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single product in a cart line
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
