//! # checkout-store: Persistence Layer for SmartCheckout
//!
//! This crate provides the persistence collaborator the checkout engine
//! calls to load and save the inventory and ledger.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    SmartCheckout Data Flow                          │
//! │                                                                     │
//! │  CheckoutEngine (commit step 5: persist)                            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                 checkout-store (THIS CRATE)                 │    │
//! │  │                                                             │    │
//! │  │   ┌─────────────┐   ┌──────────────┐   ┌────────────────┐   │    │
//! │  │   │   Storage   │   │ JsonStorage  │   │ MemoryStorage  │   │    │
//! │  │   │   (trait)   │◄──│ (json.rs)    │   │ (memory.rs)    │   │    │
//! │  │   │             │   │              │   │                │   │    │
//! │  │   │ load/save   │   │ temp+rename  │   │ test double w/ │   │    │
//! │  │   │ both tables │   │ full replace │   │ failure switch │   │    │
//! │  │   └─────────────┘   └──────────────┘   └────────────────┘   │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │   <data dir>/inventory.json      <data dir>/ledger.json     │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - The `Storage` trait (the engine's only view of us)
//! - [`schema`] - Persisted row types and strict-load quarantine
//! - [`json`] - JSON file backend with atomic replace
//! - [`memory`] - In-memory backend for tests and development
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_store::{JsonStorage, Storage};
//!
//! let storage = JsonStorage::from_env();
//! let items = storage.load_inventory().await?;   // [] when file is absent
//! storage.save_inventory(&items).await?;          // atomic full replace
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod json;
pub mod memory;
pub mod schema;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use json::JsonStorage;
pub use memory::MemoryStorage;
pub use storage::Storage;
