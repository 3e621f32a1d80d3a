//! # Persisted Row Schema
//!
//! The on-disk shape of inventory and ledger rows, and the strict-load
//! rules that keep bad rows out of the in-memory stores.
//!
//! ## Strict Load With Quarantine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Loading a Document                            │
//! │                                                                     │
//! │  inventory.json: [ row, row, row, ... ]                             │
//! │       │                                                             │
//! │       ▼  per row                                                    │
//! │  Deserialize into InventoryRow                                      │
//! │       ├── parse error ──────────► warn! + skip row (quarantine)     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Invariant check (name non-empty, stock >= 0, price >= 0,           │
//! │  name not already seen)                                             │
//! │       ├── violation ────────────► warn! + skip row (quarantine)     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  InventoryItem → into the store                                     │
//! │                                                                     │
//! │  A single bad row never poisons the rest of the catalog, and a      │
//! │  loosely-typed value never reaches the engine.                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use checkout_core::{InventoryItem, Money, TransactionRecord};

// =============================================================================
// Inventory Rows
// =============================================================================

/// One row of the persisted inventory document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRow {
    /// Item name; the document key.
    pub name: String,
    /// Units on hand.
    pub stock_quantity: i64,
    /// Catalog price in cents.
    pub unit_price_cents: i64,
}

impl InventoryRow {
    /// Validates the row and converts it into a domain item.
    ///
    /// ## Rules
    /// - `name` must be non-empty after trimming
    /// - `stock_quantity >= 0`
    /// - `unit_price_cents >= 0`
    pub fn into_item(self) -> Result<InventoryItem, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("empty item name".to_string());
        }
        if self.stock_quantity < 0 {
            return Err(format!(
                "negative stock {} for '{}'",
                self.stock_quantity, name
            ));
        }
        if self.unit_price_cents < 0 {
            return Err(format!(
                "negative price {} for '{}'",
                self.unit_price_cents, name
            ));
        }
        Ok(InventoryItem::new(
            name,
            self.stock_quantity,
            Money::from_cents(self.unit_price_cents),
        ))
    }
}

impl From<&InventoryItem> for InventoryRow {
    fn from(item: &InventoryItem) -> Self {
        InventoryRow {
            name: item.name.clone(),
            stock_quantity: item.stock_quantity,
            unit_price_cents: item.unit_price.cents(),
        }
    }
}

/// Converts raw JSON values into inventory items, quarantining bad rows.
///
/// Duplicate names keep the first occurrence; later rows are quarantined so
/// a corrupted document cannot silently overwrite earlier stock counts.
pub fn inventory_from_rows(rows: Vec<serde_json::Value>, path: &str) -> Vec<InventoryItem> {
    let mut items = Vec::with_capacity(rows.len());
    let mut seen: HashSet<String> = HashSet::new();

    for (index, value) in rows.into_iter().enumerate() {
        let row: InventoryRow = match serde_json::from_value(value) {
            Ok(row) => row,
            Err(err) => {
                warn!(path, row = index, %err, "Quarantined unparseable inventory row");
                continue;
            }
        };
        match row.into_item() {
            Ok(item) => {
                if !seen.insert(item.name.clone()) {
                    warn!(path, row = index, name = %item.name, "Quarantined duplicate inventory row");
                    continue;
                }
                items.push(item);
            }
            Err(reason) => {
                warn!(path, row = index, %reason, "Quarantined invalid inventory row");
            }
        }
    }

    items
}

// =============================================================================
// Ledger Rows
// =============================================================================

/// One row of the persisted ledger document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Commit timestamp (RFC 3339).
    pub timestamp: DateTime<Utc>,
    /// Charged amount in cents.
    pub amount_cents: i64,
    /// Summary, e.g. `"Apple x 3"`.
    pub description: String,
}

impl LedgerRow {
    /// Validates the row and converts it into a transaction record.
    ///
    /// ## Rules
    /// - `amount_cents >= 0`
    /// - `description` must be non-empty
    pub fn into_record(self) -> Result<TransactionRecord, String> {
        if self.amount_cents < 0 {
            return Err(format!("negative amount {}", self.amount_cents));
        }
        if self.description.trim().is_empty() {
            return Err("empty description".to_string());
        }
        Ok(TransactionRecord {
            timestamp: self.timestamp,
            amount: Money::from_cents(self.amount_cents),
            description: self.description,
        })
    }
}

impl From<&TransactionRecord> for LedgerRow {
    fn from(record: &TransactionRecord) -> Self {
        LedgerRow {
            timestamp: record.timestamp,
            amount_cents: record.amount.cents(),
            description: record.description.clone(),
        }
    }
}

/// Converts raw JSON values into ledger records, quarantining bad rows.
///
/// Insertion order of the surviving rows is preserved; position is the only
/// identity a record has.
pub fn ledger_from_rows(rows: Vec<serde_json::Value>, path: &str) -> Vec<TransactionRecord> {
    let mut records = Vec::with_capacity(rows.len());

    for (index, value) in rows.into_iter().enumerate() {
        let row: LedgerRow = match serde_json::from_value(value) {
            Ok(row) => row,
            Err(err) => {
                warn!(path, row = index, %err, "Quarantined unparseable ledger row");
                continue;
            }
        };
        match row.into_record() {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!(path, row = index, %reason, "Quarantined invalid ledger row");
            }
        }
    }

    records
}

// =============================================================================
// Unit Tests
// =============================================================================
