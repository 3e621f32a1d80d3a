//! # Engine Error Types
//!
//! What a checkout caller can get back from a commit or a lookup.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                              │
//! │                                                                     │
//! │  InventoryError (core)       StorageError (store)                   │
//! │       │                           │                                 │
//! │       ▼                           ▼                                 │
//! │  CommitError (this module) ← adds the commit-phase context          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Caller branches on the kind:                                       │
//! │    validation kinds → correct the sale, retry the COMMIT            │
//! │    Persistence      → retry the SAVE (state already mutated!)       │
//! │    Internal         → defect; do not retry                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use checkout_core::SaleError;
use checkout_store::StorageError;

// =============================================================================
// Commit Error
// =============================================================================

/// Failure modes of [`crate::CheckoutEngine::commit`].
///
/// The first three are validation failures: nothing was mutated and the
/// sale stays pending for correction. `Persistence` is the one case where
/// in-memory state HAS changed.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The pending sale has no lines.
    #[error("Cannot commit an empty sale")]
    EmptySale,

    /// A sale line references a name absent from inventory.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Aggregated requested quantity exceeds available stock.
    ///
    /// `requested` is the sum across ALL lines carrying this name, so an
    /// oversell split over two lines is still caught.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// The commit succeeded in memory but saving to the backing store
    /// failed.
    ///
    /// ## Caller Contract
    /// Inventory and ledger are already mutated. Retry the save
    /// ([`crate::CheckoutEngine::save_all`]); retrying the commit would
    /// double-decrement stock.
    #[error("Commit applied in memory but persistence failed: {0}")]
    Persistence(#[from] StorageError),

    /// A stock decrement failed after validation said it could not.
    ///
    /// This indicates a defect in the aggregation logic, not a recoverable
    /// condition. Nothing was appended to the ledger and nothing was
    /// persisted.
    #[error("Internal consistency error during commit: {0}")]
    Internal(String),
}

// =============================================================================
// Resolve Error
// =============================================================================

/// Non-fatal outcomes of resolving a candidate item name.
///
/// The input surface (manual entry or the image classifier) hands us an
/// untrusted name string; these are the ways it can fail to become a sale
/// line. None of them mutate anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The candidate name is not a catalog entry. Exact match only; the
    /// engine does no fuzzy matching.
    #[error("No catalog match for '{0}'")]
    NoMatch(String),

    /// The catalog entry exists but cannot cover the requested quantity.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// The request itself is malformed (empty name, non-positive quantity).
    #[error(transparent)]
    Invalid(#[from] SaleError),
}

// =============================================================================
// Unit Tests
// =============================================================================
