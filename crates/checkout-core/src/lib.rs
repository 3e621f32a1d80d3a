//! # checkout-core: Pure Business Logic for SmartCheckout
//!
//! This crate is the **heart** of SmartCheckout. It contains the rules a
//! retail checkout must never break — no oversell, no negative stock,
//! consistent line totals — as pure data structures with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    SmartCheckout Architecture                       │
//! │                                                                     │
//! │  Operator input (item picker / classifier suggestion)               │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐    │
//! │  │             ★ checkout-core (THIS CRATE) ★                  │    │
//! │  │                                                             │    │
//! │  │  ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌──────────────┐     │    │
//! │  │  │  money  │ │  types  │ │ inventory │ │ sale / ledger│     │    │
//! │  │  │  Money  │ │ LineItem│ │ Inventory │ │ PendingSale  │     │    │
//! │  │  │         │ │  Record │ │   Store   │ │ LedgerStore  │     │    │
//! │  │  └─────────┘ └─────────┘ └───────────┘ └──────────────┘     │    │
//! │  │                                                             │    │
//! │  │  NO I/O • NO LOCKS • NO CLOCK READS • PURE FUNCTIONS        │    │
//! │  └─────────────────────────────┬───────────────────────────────┘    │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐    │
//! │  │          checkout-engine (commit transaction)               │    │
//! │  │          checkout-store  (JSON persistence)                 │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (InventoryItem, LineItem, TransactionRecord)
//! - [`inventory`] - In-memory stock ledger with the decrement rule
//! - [`ledger`] - Append-only transaction record sequence
//! - [`sale`] - The pending sale being assembled before commit
//! - [`validation`] - Input validation for names, quantities, prices
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic - same input = same output
//! 2. **No I/O**: File system and network access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod ledger;
pub mod money;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use checkout_core::Money` instead of
// `use checkout_core::money::Money`

pub use error::{InventoryError, SaleError};
pub use inventory::InventoryStore;
pub use ledger::LedgerStore;
pub use money::Money;
pub use sale::{LineEdit, PendingSale};
pub use types::{InventoryItem, LineItem, TransactionRecord};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single pending sale.
///
/// ## Business Reason
/// Prevents runaway sales and keeps a single commit's critical section short.
pub const MAX_SALE_LINES: usize = 100;

/// Maximum quantity allowed on a single line.
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
