//! # JSON File Backend
//!
//! Persists the inventory and ledger as two JSON documents under a data
//! directory, replacing each document atomically on save.
//!
//! ## Atomic Replace
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Saving a Document                              │
//! │                                                                     │
//! │  save_inventory(items)                                              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  1. Serialize the full table to bytes                               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  2. Write <data>/inventory.json.tmp                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  3. rename(inventory.json.tmp → inventory.json)                     │
//! │                                                                     │
//! │  A crash between 2 and 3 leaves the previous document intact; the   │
//! │  reader never observes a half-written file.                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The original data file is created lazily: loads tolerate its absence and
//! the first save materializes it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use checkout_core::{InventoryItem, TransactionRecord};

use crate::error::{StorageError, StorageResult};
use crate::schema::{inventory_from_rows, ledger_from_rows, InventoryRow, LedgerRow};
use crate::storage::Storage;

/// File name of the inventory document inside the data directory.
pub const INVENTORY_FILE: &str = "inventory.json";

/// File name of the ledger document inside the data directory.
pub const LEDGER_FILE: &str = "ledger.json";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CHECKOUT_DATA_DIR";

/// JSON-document storage backend.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    inventory_path: PathBuf,
    ledger_path: PathBuf,
}

impl JsonStorage {
    /// Creates a backend rooted at `data_dir`.
    ///
    /// The directory is created on first save, not here; construction never
    /// touches the file system.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        JsonStorage {
            inventory_path: data_dir.join(INVENTORY_FILE),
            ledger_path: data_dir.join(LEDGER_FILE),
        }
    }

    /// Creates a backend from the environment.
    ///
    /// ## Environment Variables
    /// - `CHECKOUT_DATA_DIR`: data directory (default `./data`)
    pub fn from_env() -> Self {
        let dir = std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| "data".to_string());
        JsonStorage::new(dir)
    }

    /// Path of the inventory document.
    pub fn inventory_path(&self) -> &Path {
        &self.inventory_path
    }

    /// Path of the ledger document.
    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    /// Reads a document as raw rows; `None` when the file does not exist.
    async fn read_rows(path: &Path) -> StorageResult<Option<Vec<serde_json::Value>>> {
        let path_str = path.display().to_string();
        match fs::read(path).await {
            Ok(bytes) => {
                let rows: Vec<serde_json::Value> = serde_json::from_slice(&bytes)
                    .map_err(|err| StorageError::malformed(&path_str, err.to_string()))?;
                Ok(Some(rows))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::io(path_str, err)),
        }
    }

    /// Writes `bytes` to `path` via a sibling temp file and rename.
    async fn write_atomic(path: &Path, bytes: &[u8]) -> StorageResult<()> {
        let path_str = path.display().to_string();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| StorageError::io(&path_str, err))?;
        }

        // Temp file lives next to the target so the rename stays on one
        // file system.
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, bytes)
            .await
            .map_err(|err| StorageError::io(tmp.display().to_string(), err))?;
        fs::rename(&tmp, path)
            .await
            .map_err(|err| StorageError::io(&path_str, err))?;

        debug!(path = %path_str, bytes = bytes.len(), "Document replaced");
        Ok(())
    }
}

impl Storage for JsonStorage {
    async fn load_inventory(&self) -> StorageResult<Vec<InventoryItem>> {
        let path_str = self.inventory_path.display().to_string();
        match Self::read_rows(&self.inventory_path).await? {
            Some(rows) => {
                let items = inventory_from_rows(rows, &path_str);
                debug!(path = %path_str, count = items.len(), "Inventory loaded");
                Ok(items)
            }
            None => {
                debug!(path = %path_str, "No inventory document; starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save_inventory(&self, items: &[InventoryItem]) -> StorageResult<()> {
        let rows: Vec<InventoryRow> = items.iter().map(InventoryRow::from).collect();
        let bytes = serde_json::to_vec_pretty(&rows).map_err(|err| {
            StorageError::malformed(self.inventory_path.display().to_string(), err.to_string())
        })?;
        Self::write_atomic(&self.inventory_path, &bytes).await
    }

    async fn load_ledger(&self) -> StorageResult<Vec<TransactionRecord>> {
        let path_str = self.ledger_path.display().to_string();
        match Self::read_rows(&self.ledger_path).await? {
            Some(rows) => {
                let records = ledger_from_rows(rows, &path_str);
                debug!(path = %path_str, count = records.len(), "Ledger loaded");
                Ok(records)
            }
            None => {
                debug!(path = %path_str, "No ledger document; starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save_ledger(&self, records: &[TransactionRecord]) -> StorageResult<()> {
        let rows: Vec<LedgerRow> = records.iter().map(LedgerRow::from).collect();
        let bytes = serde_json::to_vec_pretty(&rows).map_err(|err| {
            StorageError::malformed(self.ledger_path.display().to_string(), err.to_string())
        })?;
        Self::write_atomic(&self.ledger_path, &bytes).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::Money;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Per-test scratch directory under the system temp dir.
    fn scratch_dir(tag: &str) -> PathBuf {
        static SEQ: AtomicU32 = AtomicU32::new(0);
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "checkout-store-test-{}-{}-{}",
            tag,
            std::process::id(),
            seq
        ))
    }

    #[tokio::test]
    async fn test_load_missing_files_yields_empty() {
        let storage = JsonStorage::new(scratch_dir("missing"));

        assert!(storage.load_inventory().await.unwrap().is_empty());
        assert!(storage.load_ledger().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_inventory() {
        let dir = scratch_dir("inv");
        let storage = JsonStorage::new(&dir);

        let items = vec![
            InventoryItem::new("Apple", 10, Money::from_cents(200)),
            InventoryItem::new("Banana", 2, Money::from_cents(150)),
        ];
        storage.save_inventory(&items).await.unwrap();

        let loaded = storage.load_inventory().await.unwrap();
        assert_eq!(loaded, items);

        // No temp file left behind after the rename.
        assert!(!dir.join(format!("{INVENTORY_FILE}.tmp")).exists());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_then_load_ledger() {
        let dir = scratch_dir("led");
        let storage = JsonStorage::new(&dir);

        let records = vec![TransactionRecord {
            timestamp: Utc::now(),
            amount: Money::from_cents(600),
            description: "Apple x 3".to_string(),
        }];
        storage.save_ledger(&records).await.unwrap();

        let loaded = storage.load_ledger().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].amount.cents(), 600);
        assert_eq!(loaded[0].description, "Apple x 3");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_save_leaves_previous_document_intact() {
        let dir = scratch_dir("atomic");
        let storage = JsonStorage::new(&dir);

        let items = vec![InventoryItem::new("Apple", 10, Money::from_cents(200))];
        storage.save_inventory(&items).await.unwrap();

        // A directory squatting on the temp path makes the write fail
        // before the rename can touch the live document.
        tokio::fs::create_dir(dir.join(format!("{INVENTORY_FILE}.tmp")))
            .await
            .unwrap();

        let err = storage
            .save_inventory(&[InventoryItem::new("Banana", 2, Money::from_cents(150))])
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));

        // The previous document still loads exactly as saved.
        assert_eq!(storage.load_inventory().await.unwrap(), items);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_is_full_replace() {
        let dir = scratch_dir("replace");
        let storage = JsonStorage::new(&dir);

        storage
            .save_inventory(&[InventoryItem::new("Apple", 10, Money::from_cents(200))])
            .await
            .unwrap();
        storage
            .save_inventory(&[InventoryItem::new("Banana", 2, Money::from_cents(150))])
            .await
            .unwrap();

        let loaded = storage.load_inventory().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Banana");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_document_is_an_error() {
        let dir = scratch_dir("bad");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join(INVENTORY_FILE), b"{ not json")
            .await
            .unwrap();

        let storage = JsonStorage::new(&dir);
        let err = storage.load_inventory().await.unwrap_err();
        assert!(matches!(err, StorageError::Malformed { .. }));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_bad_rows_are_quarantined_not_fatal() {
        let dir = scratch_dir("quarantine");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(
            dir.join(INVENTORY_FILE),
            br#"[
                {"name": "Apple", "stock_quantity": 10, "unit_price_cents": 200},
                {"name": "Broken", "stock_quantity": "ten", "unit_price_cents": 1}
            ]"#,
        )
        .await
        .unwrap();

        let storage = JsonStorage::new(&dir);
        let loaded = storage.load_inventory().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Apple");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
