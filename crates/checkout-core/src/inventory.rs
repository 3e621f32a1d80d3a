//! # Inventory Store
//!
//! The in-memory stock ledger: item name → (stock quantity, unit price).
//!
//! ## Mutation Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   InventoryStore Operations                         │
//! │                                                                     │
//! │  Lookup item ────────────► get() ──────────────► (read only)        │
//! │                                                                     │
//! │  Commit sale ────────────► decrement() ────────► stock -= qty       │
//! │                               │                                     │
//! │                               ├── name absent? → NotFound           │
//! │                               └── qty > stock? → InsufficientStock  │
//! │                                                                     │
//! │  Load from storage ──────► replace_all() ──────► whole map swapped  │
//! │  Save to storage ────────► items() ────────────► snapshot handed    │
//! │                                                  to the collaborator│
//! │                                                                     │
//! │  decrement() is the ONLY in-place mutation. Stock can never go      │
//! │  negative because the subtraction is refused up front.              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use crate::error::InventoryError;
use crate::types::InventoryItem;

/// In-memory mapping of item name to catalog entry.
///
/// Lookup is exact-match on name, case-sensitive, matching the persisted key.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    items: HashMap<String, InventoryItem>,
}

impl InventoryStore {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        InventoryStore {
            items: HashMap::new(),
        }
    }

    /// Looks up a catalog entry by exact name.
    pub fn get(&self, name: &str) -> Option<&InventoryItem> {
        self.items.get(name)
    }

    /// Subtracts `quantity` units from an item's stock.
    ///
    /// ## Errors
    /// - [`InventoryError::NotFound`] if `name` is absent
    /// - [`InventoryError::InsufficientStock`] if `quantity` exceeds stock
    ///
    /// On error the store is untouched. On success returns the new quantity.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::{InventoryItem, InventoryStore, Money};
    ///
    /// let mut inventory = InventoryStore::new();
    /// inventory.replace_all(vec![InventoryItem::new("Apple", 10, Money::from_cents(200))]);
    ///
    /// let left = inventory.decrement("Apple", 3).unwrap();
    /// assert_eq!(left, 7);
    /// ```
    pub fn decrement(&mut self, name: &str, quantity: i64) -> Result<i64, InventoryError> {
        let item = self
            .items
            .get_mut(name)
            .ok_or_else(|| InventoryError::NotFound(name.to_string()))?;

        if quantity > item.stock_quantity {
            return Err(InventoryError::InsufficientStock {
                name: name.to_string(),
                available: item.stock_quantity,
                requested: quantity,
            });
        }

        item.stock_quantity -= quantity;
        Ok(item.stock_quantity)
    }

    /// Replaces the entire mapping (load surface).
    ///
    /// A later duplicate name wins, mirroring a last-row-wins read of the
    /// persisted table.
    pub fn replace_all(&mut self, items: Vec<InventoryItem>) {
        self.items = items
            .into_iter()
            .map(|item| (item.name.clone(), item))
            .collect();
    }

    /// Snapshot of all entries, sorted by name (save/display surface).
    pub fn items(&self) -> Vec<InventoryItem> {
        let mut items: Vec<InventoryItem> = self.items.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
