//! # venta-store: Durable Stores for VentaFacil
//!
//! This crate provides the stateful layer of VentaFacil: three durable
//! stores behind an injected persistence port, the cart builder that feeds
//! them, and the settlement engine that moves pedidos through their
//! lifecycle.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      VentaFacil Data Flow                           │
//! │                                                                     │
//! │  CartBuilder ──reads──► InventoryStore                              │
//! │       │                                                             │
//! │       │ submit()                                                    │
//! │       ▼                                                             │
//! │  OrderLedger ◄──────────────┐                                       │
//! │       │                     │                                       │
//! │       │ settle()            │ on failure: nothing changes           │
//! │       ▼                     │                                       │
//! │  ┌─────────────────────────┴────────────┐                           │
//! │  │        SettlementEngine              │                           │
//! │  │  1. check every line against stock   │                           │
//! │  │  2. decrement InventoryStore         │                           │
//! │  │  3. append to MovementLog            │                           │
//! │  │  4. remove from OrderLedger          │                           │
//! │  │  5. return Receipt                   │                           │
//! │  └──────────────────────────────────────┘                           │
//! │                                                                     │
//! │  Durable layout (StorageBackend port):                              │
//! │    products  ── JSON array of Product                               │
//! │    pedidos   ── JSON map order_id → Order                           │
//! │    movements ── JSON array of Movement (append-only)                │
//! │    session   ── operator identity                                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - The storage port and its file/memory implementations
//! - [`error`] - Store error types
//! - [`inventory`] - The product catalog and stock levels
//! - [`ledger`] - Pending orders (pedidos), with legacy-shape migration
//! - [`movements`] - Append-only audit trail of stock changes
//! - [`checkout`] - Cart builder: inventory-validated carts and submission
//! - [`settlement`] - Settle / cancel / restock across stores
//! - [`session`] - Operator identity (the movement actor)
//! - [`summary`] - Dashboard counts over inventory and ledger
//!
//! ## Usage
//!
//! ```rust
//! use venta_store::backend::MemoryBackend;
//! use venta_store::checkout::CartBuilder;
//! use venta_store::inventory::InventoryStore;
//! use venta_store::ledger::OrderLedger;
//! use venta_store::movements::MovementLog;
//! use venta_store::settlement::SettlementEngine;
//! use venta_core::types::Product;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut inventory = InventoryStore::open(Box::new(MemoryBackend::new()))?;
//! let mut ledger = OrderLedger::open(Box::new(MemoryBackend::new()))?;
//! let mut movements = MovementLog::open(Box::new(MemoryBackend::new()))?;
//!
//! inventory.upsert(Product::new("P1", "Coca-Cola 330ml", 2000, 10))?;
//!
//! let mut cart = CartBuilder::new();
//! cart.add_line(&inventory, "P1", 3)?;
//! let order = cart.submit(&mut ledger, "Alice", None)?;
//!
//! let mut engine = SettlementEngine::new(&mut inventory, &mut ledger, &mut movements);
//! let receipt = engine.settle(&order.order_id, Some("operator"))?;
//! assert_eq!(receipt.total_cents, 6000);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod checkout;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod movements;
pub mod session;
pub mod settlement;
pub mod summary;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{JsonFileBackend, MemoryBackend, StorageBackend};
pub use checkout::CartBuilder;
pub use error::{StoreError, StoreResult};
pub use inventory::InventoryStore;
pub use ledger::OrderLedger;
pub use movements::MovementLog;
pub use session::SessionStore;
pub use settlement::SettlementEngine;
pub use summary::{dashboard_summary, DashboardSummary};
