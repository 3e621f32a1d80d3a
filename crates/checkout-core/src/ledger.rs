//! # Ledger Store
//!
//! The append-only sequence of transaction records.
//!
//! ## Append-Only Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     LedgerStore Operations                          │
//! │                                                                     │
//! │  Commit sale ───────► append() ───────► records.push(record)        │
//! │                                                                     │
//! │  Display page ──────► all() ──────────► read-only snapshot,         │
//! │                                         insertion order             │
//! │                                                                     │
//! │  Load from storage ─► replace_all() ──► whole sequence swapped      │
//! │                                                                     │
//! │  No record is ever edited, reordered, deduplicated, or removed.     │
//! │  Position is the only identity a record has.                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;
use crate::types::TransactionRecord;

/// Ordered, append-only sequence of transaction records.
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    records: Vec<TransactionRecord>,
}

impl LedgerStore {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        LedgerStore {
            records: Vec::new(),
        }
    }

    /// Appends a record at the end of the sequence.
    pub fn append(&mut self, record: TransactionRecord) {
        self.records.push(record);
    }

    /// Read-only snapshot in insertion order.
    pub fn all(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Replaces the entire sequence (load surface).
    pub fn replace_all(&mut self, records: Vec<TransactionRecord>) {
        self.records = records;
    }

    /// Running total of all record amounts.
    pub fn total(&self) -> Money {
        self.records.iter().map(|r| r.amount).sum()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
