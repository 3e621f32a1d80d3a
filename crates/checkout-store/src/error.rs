//! # Storage Error Types
//!
//! Error types for load/save operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                              │
//! │                                                                     │
//! │  std::io::Error / serde_json::Error                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StorageError (this module) ← adds the document path for context    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  CommitError::Persistence (in checkout-engine)                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Caller retries the SAVE, never the commit                          │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note: individual rows that fail the schema are NOT errors — they are
//! quarantined with a warning during load (see [`crate::schema`]). A
//! `Malformed` error means the document itself is not valid JSON.

use thiserror::Error;

/// Load/save failures for a backing store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    ///
    /// ## When This Occurs
    /// - Permission denied on the data directory
    /// - Disk full during a save
    /// - The temp-file rename failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document exists but is not a valid JSON array.
    ///
    /// ## When This Occurs
    /// - Hand-edited file with a syntax error
    /// - Truncated file from an interrupted non-atomic writer
    #[error("Malformed document {path}: {reason}")]
    Malformed { path: String, reason: String },
}

impl StorageError {
    /// Wraps an I/O error with the document path it occurred on.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a Malformed error.
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Unit Tests
// =============================================================================
