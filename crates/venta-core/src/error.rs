//! # Error Types
//!
//! Domain-specific error types for venta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  venta-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  venta-store errors (separate crate)                                │
//! │  └── StoreError       - Storage operation failures                  │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → caller (UI notification)       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product code, order id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every error is recoverable; nothing here terminates the process

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-facing notifications.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The referenced product code does not exist in inventory.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// A cart cannot be submitted without any lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// No pending order with this id exists in the ledger.
    ///
    /// ## When This Occurs
    /// - The id was never submitted
    /// - The order was already settled or cancelled (removed from the ledger)
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// A product referenced by a pending order has been deleted from
    /// inventory since the order was submitted.
    #[error("Product missing from inventory: {0}")]
    ProductMissing(String),

    /// Insufficient stock to settle an order.
    ///
    /// ## Settlement Flow
    /// ```text
    /// settle(order)
    ///      │
    ///      ▼
    /// Check every line: on hand - requested >= 0 ?
    ///      │
    ///      ▼
    /// InsufficientStock { code: "P2", available: 2, requested: 5 }
    ///      │
    ///      ▼
    /// Nothing is deducted; the order stays pending
    /// ```
    #[error("Insufficient stock for {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: String,
        available: i64,
        requested: i64,
    },

    /// Cart has exceeded the maximum allowed number of lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., bad characters in a product code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
