//! # In-Memory Backend
//!
//! A `Storage` implementation backed by plain memory. Used as the test
//! double across the workspace and handy for development REPL-style runs.
//!
//! ## Failure Switch
//! The backend can be told to reject writes, which is how the engine tests
//! exercise the commit path where the in-memory mutation succeeded but
//! persistence failed (`PersistenceFailed` semantics).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use checkout_core::{InventoryItem, TransactionRecord};

use crate::error::{StorageError, StorageResult};
use crate::storage::Storage;

/// Memory-backed storage with an injectable write failure.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inventory: Mutex<Vec<InventoryItem>>,
    ledger: Mutex<Vec<TransactionRecord>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    /// Creates an empty backend.
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Creates a backend pre-loaded with an inventory table.
    pub fn with_inventory(items: Vec<InventoryItem>) -> Self {
        let storage = MemoryStorage::new();
        *storage.inventory.lock().expect("inventory lock poisoned") = items;
        storage
    }

    /// Turns write rejection on or off.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::io(
                "<memory>",
                std::io::Error::other("write failure injected"),
            ));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    async fn load_inventory(&self) -> StorageResult<Vec<InventoryItem>> {
        Ok(self.inventory.lock().expect("inventory lock poisoned").clone())
    }

    async fn save_inventory(&self, items: &[InventoryItem]) -> StorageResult<()> {
        self.check_writable()?;
        *self.inventory.lock().expect("inventory lock poisoned") = items.to_vec();
        Ok(())
    }

    async fn load_ledger(&self) -> StorageResult<Vec<TransactionRecord>> {
        Ok(self.ledger.lock().expect("ledger lock poisoned").clone())
    }

    async fn save_ledger(&self, records: &[TransactionRecord]) -> StorageResult<()> {
        self.check_writable()?;
        *self.ledger.lock().expect("ledger lock poisoned") = records.to_vec();
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::Money;

    #[tokio::test]
    async fn test_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.load_inventory().await.unwrap().is_empty());

        let items = vec![InventoryItem::new("Apple", 10, Money::from_cents(200))];
        storage.save_inventory(&items).await.unwrap();
        assert_eq!(storage.load_inventory().await.unwrap(), items);
    }

    #[tokio::test]
    async fn test_failure_switch() {
        let storage = MemoryStorage::with_inventory(vec![InventoryItem::new(
            "Apple",
            10,
            Money::from_cents(200),
        )]);

        storage.set_fail_writes(true);
        let err = storage.save_inventory(&[]).await.unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));

        // Previous contents survive the rejected write.
        assert_eq!(storage.load_inventory().await.unwrap().len(), 1);

        storage.set_fail_writes(false);
        storage.save_inventory(&[]).await.unwrap();
        assert!(storage.load_inventory().await.unwrap().is_empty());
    }
}
