//! # Storage Trait
//!
//! The persistence contract between the checkout engine and whatever holds
//! the data at rest.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Storage Contract                              │
//! │                                                                     │
//! │  load_inventory / load_ledger                                       │
//! │  ├── Absent backing store  → Ok(empty), NOT an error                │
//! │  └── Returns fully-validated domain values only                     │
//! │                                                                     │
//! │  save_inventory / save_ledger                                       │
//! │  ├── Full replace of the backing store's contents                   │
//! │  └── All-or-nothing: a failed save must leave the previous          │
//! │      contents intact (write-temp-then-rename)                       │
//! │                                                                     │
//! │  The engine computes the complete in-memory state and hands it      │
//! │  over; storage never appends incrementally.                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::sync::Arc;

use checkout_core::{InventoryItem, TransactionRecord};

use crate::error::StorageResult;

/// Persistence collaborator for the inventory and ledger tables.
///
/// Implemented by [`crate::JsonStorage`] (production) and
/// [`crate::MemoryStorage`] (tests/dev). The engine is generic over this
/// trait and never sees a file path or a JSON document.
pub trait Storage: Send + Sync + 'static {
    /// Loads the full inventory table. Absent source yields an empty vec.
    fn load_inventory(&self) -> impl Future<Output = StorageResult<Vec<InventoryItem>>> + Send;

    /// Replaces the persisted inventory table with `items`.
    fn save_inventory(&self, items: &[InventoryItem])
        -> impl Future<Output = StorageResult<()>> + Send;

    /// Loads the full ledger in insertion order. Absent source yields empty.
    fn load_ledger(&self) -> impl Future<Output = StorageResult<Vec<TransactionRecord>>> + Send;

    /// Replaces the persisted ledger with `records`.
    fn save_ledger(
        &self,
        records: &[TransactionRecord],
    ) -> impl Future<Output = StorageResult<()>> + Send;
}

// Shared backends: lets callers keep a handle on the storage they hand to
// the engine (tests inspect persisted state through their own Arc clone).
impl<S: Storage> Storage for Arc<S> {
    fn load_inventory(&self) -> impl Future<Output = StorageResult<Vec<InventoryItem>>> + Send {
        S::load_inventory(self)
    }

    fn save_inventory(
        &self,
        items: &[InventoryItem],
    ) -> impl Future<Output = StorageResult<()>> + Send {
        S::save_inventory(self, items)
    }

    fn load_ledger(&self) -> impl Future<Output = StorageResult<Vec<TransactionRecord>>> + Send {
        S::load_ledger(self)
    }

    fn save_ledger(
        &self,
        records: &[TransactionRecord],
    ) -> impl Future<Output = StorageResult<()>> + Send {
        S::save_ledger(self, records)
    }
}
