//! # checkout-engine: The Commit Transaction
//!
//! The only code path in SmartCheckout that mutates inventory or appends
//! to the ledger. Everything upstream (sale assembly, name resolution) and
//! downstream (persistence) collaborates with this crate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                                                                     │
//! │   PendingSale (checkout-core)                                       │
//! │        │ commit(&sale)                                              │
//! │        ▼                                                            │
//! │  ┌───────────────────────────────────────────────┐                  │
//! │  │        ★ checkout-engine (THIS CRATE) ★       │                  │
//! │  │                                               │                  │
//! │  │   RwLock ( InventoryStore , LedgerStore )     │                  │
//! │  │   validate all → apply → append → persist     │                  │
//! │  └───────────────────┬───────────────────────────┘                  │
//! │                      │ Storage trait                                │
//! │                      ▼                                              │
//! │   JsonStorage / MemoryStorage (checkout-store)                      │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::{CheckoutEngine, ResolvedLine};
pub use error::{CommitError, ResolveError};
