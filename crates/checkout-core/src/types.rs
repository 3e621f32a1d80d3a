//! # Domain Types
//!
//! Core domain types used throughout SmartCheckout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐   │
//! │  │  InventoryItem   │  │     LineItem     │  │TransactionRecord │   │
//! │  │  ──────────────  │  │  ──────────────  │  │  ──────────────  │   │
//! │  │  name (key)      │  │  name            │  │  timestamp       │   │
//! │  │  stock_quantity  │  │  quantity        │  │  amount          │   │
//! │  │  unit_price      │  │  unit_price      │  │  description     │   │
//! │  └──────────────────┘  │  (frozen at add) │  └──────────────────┘   │
//! │                        └──────────────────┘                         │
//! │                                                                     │
//! │  InventoryItem.unit_price ──► LineItem.unit_price (snapshot)        │
//! │  LineItem.line_total() ─────► TransactionRecord.amount              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! The catalog is keyed by item name, matching the persisted schema exactly
//! (case-sensitive). Ledger records carry no identity beyond their position.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Inventory Item
// =============================================================================

/// A catalog entry: what is on the shelf and what it sells for.
///
/// ## Invariants
/// - `stock_quantity >= 0` after any committed operation
/// - `unit_price` is never negative
/// - Mutated only by the engine's commit (stock decrement); never deleted
///   by the checkout core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Display name; unique key within the inventory.
    pub name: String,

    /// Units currently on hand.
    pub stock_quantity: i64,

    /// Current catalog price per unit.
    pub unit_price: Money,
}

impl InventoryItem {
    /// Creates a new catalog entry.
    pub fn new(name: impl Into<String>, stock_quantity: i64, unit_price: Money) -> Self {
        InventoryItem {
            name: name.into(),
            stock_quantity,
            unit_price,
        }
    }

    /// Checks whether `quantity` units could be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock_quantity >= quantity
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One line of a pending sale.
///
/// ## Snapshot Pattern
/// `unit_price` is frozen when the line is added — it is what the operator
/// was shown, and it is what the sale will charge even if the catalog price
/// changes before commit. The operator may still edit it by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name; resolved against inventory at commit time.
    pub name: String,

    /// Units requested. Always positive.
    pub quantity: i64,

    /// Price per unit at the time the line was added (frozen).
    pub unit_price: Money,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(name: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        LineItem {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// The line total (`quantity × unit_price`).
    ///
    /// Computed on demand so it can never drift from quantity/price edits.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Transaction Record
// =============================================================================

/// An immutable entry in the transaction ledger.
///
/// One record is appended per sale line at commit; every record from the
/// same commit shares one timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// When the commit happened. Assigned by the engine, not the caller.
    pub timestamp: DateTime<Utc>,

    /// The line total charged.
    pub amount: Money,

    /// Human-readable summary, e.g. `"Apple x 3"`.
    pub description: String,
}

impl TransactionRecord {
    /// Builds the record for one committed sale line.
    pub fn for_line(line: &LineItem, timestamp: DateTime<Utc>) -> Self {
        TransactionRecord {
            timestamp,
            amount: line.line_total(),
            description: format!("{} x {}", line.name, line.quantity),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
