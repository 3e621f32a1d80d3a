//! # Checkout Engine
//!
//! The commit transaction: validate a pending sale against current stock,
//! decrement inventory, append ledger records, persist — as one logical
//! unit under one exclusive lock.
//!
//! ## Commit State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Commit Lifecycle                             │
//! │                                                                     │
//! │            commit(sale)                                             │
//! │   Idle ────────────────────► Committing (write lock held)           │
//! │    ▲                              │                                 │
//! │    │                              ▼                                 │
//! │    │   1. EmptySale?  ──────────► err, nothing touched              │
//! │    │   2. VALIDATE all lines ───► ItemNotFound / InsufficientStock  │
//! │    │      (aggregated per name,   err, nothing touched              │
//! │    │       NO mutation yet)                                         │
//! │    │   3. APPLY decrements  ────► cannot fail post-validation       │
//! │    │   4. APPEND one record per line (shared timestamp)             │
//! │    │   5. PERSIST both tables ──► PersistenceFailed: memory KEPT,   │
//! │    │                              caller retries the save           │
//! │    └──────────────────────────── lock released                      │
//! │                                                                     │
//! │  Validating everything before mutating anything is the critical     │
//! │  property: a multi-line sale must never partially decrement stock   │
//! │  and then fail on a later line.                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! The engine holds a `tokio::sync::RwLock` over the (inventory, ledger)
//! pair. Reads (`inventory()`, `ledger()`, `resolve_line()`) share the
//! lock; `commit` is the single writer and holds it from validation
//! through persist. A concurrent commit (UI double-click) blocks until the
//! first finishes, then re-validates against the updated stock — no stale
//! reads across the critical section.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use checkout_core::validation::{validate_item_name, validate_quantity};
use checkout_core::{
    InventoryItem, InventoryStore, LedgerStore, LineItem, Money, PendingSale, TransactionRecord,
};
use checkout_store::{Storage, StorageError};

use crate::error::{CommitError, ResolveError};

// =============================================================================
// Resolved Line
// =============================================================================

/// A successfully resolved candidate line: what the operator should be
/// shown before the line enters the pending sale.
///
/// The `unit_price` here becomes the line's frozen price snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLine {
    /// The catalog name (trimmed, exactly as keyed).
    pub name: String,
    /// Requested quantity.
    pub quantity: i64,
    /// Current catalog price per unit.
    pub unit_price: Money,
    /// `quantity × unit_price` at today's catalog price.
    pub line_total: Money,
}

// =============================================================================
// Checkout Engine
// =============================================================================

/// The inventory and ledger, guarded as a pair.
///
/// One lock for both tables: a commit must never observe the inventory and
/// the ledger at different points in time.
#[derive(Debug)]
struct StorePair {
    inventory: InventoryStore,
    ledger: LedgerStore,
}

/// The checkout transaction engine.
///
/// Owns the in-memory stores for its whole lifetime and is the only writer
/// to either. Generic over the persistence collaborator so tests run
/// against memory and production runs against JSON files.
///
/// ## Usage
/// ```rust,ignore
/// let engine = CheckoutEngine::open(JsonStorage::from_env()).await?;
///
/// let mut sale = PendingSale::new();
/// let quote = engine.resolve_line("Apple", 3).await?;
/// sale.add_line(quote.name, quote.quantity, quote.unit_price)?;
///
/// let records = engine.commit(&sale).await?;
/// sale.clear();
/// ```
#[derive(Debug)]
pub struct CheckoutEngine<S: Storage> {
    stores: RwLock<StorePair>,
    storage: S,
}

impl<S: Storage> CheckoutEngine<S> {
    /// Loads both tables from `storage` and takes ownership of them.
    ///
    /// An absent backing store yields empty tables (first run); the
    /// documents are materialized by the first save.
    pub async fn open(storage: S) -> Result<Self, StorageError> {
        let mut inventory = InventoryStore::new();
        inventory.replace_all(storage.load_inventory().await?);

        let mut ledger = LedgerStore::new();
        ledger.replace_all(storage.load_ledger().await?);

        info!(
            catalog_items = inventory.len(),
            ledger_records = ledger.len(),
            "Checkout engine opened"
        );

        Ok(CheckoutEngine {
            stores: RwLock::new(StorePair { inventory, ledger }),
            storage,
        })
    }

    /// Commits a pending sale.
    ///
    /// See the module docs for the full five-step lifecycle. On success
    /// returns the appended records; the caller is expected to clear the
    /// sale. On any validation error nothing has been mutated and the sale
    /// stays pending for correction.
    ///
    /// ## Errors
    /// - [`CommitError::EmptySale`] — no lines
    /// - [`CommitError::ItemNotFound`] — a line names an unknown item
    /// - [`CommitError::InsufficientStock`] — aggregated demand over stock
    /// - [`CommitError::Persistence`] — memory mutated, save failed;
    ///   retry [`Self::save_all`], NOT the commit
    /// - [`CommitError::Internal`] — defect; nothing appended or persisted
    pub async fn commit(
        &self,
        sale: &PendingSale,
    ) -> Result<Vec<TransactionRecord>, CommitError> {
        if sale.is_empty() {
            return Err(CommitError::EmptySale);
        }

        // Holding the write guard IS the Committing state: validation
        // through persist happens under it, and a concurrent commit blocks
        // here until we are done.
        let mut stores = self.stores.write().await;

        // Validation pass, no mutation. Quantities are aggregated per
        // distinct name so an oversell split across lines is still caught.
        let aggregated = aggregate_lines(sale.lines());
        for (name, requested) in &aggregated {
            match stores.inventory.get(name) {
                None => {
                    debug!(name = %name, "Commit rejected: item not found");
                    return Err(CommitError::ItemNotFound(name.clone()));
                }
                Some(item) if item.stock_quantity < *requested => {
                    debug!(
                        name = %name,
                        available = item.stock_quantity,
                        requested,
                        "Commit rejected: insufficient stock"
                    );
                    return Err(CommitError::InsufficientStock {
                        name: name.clone(),
                        available: item.stock_quantity,
                        requested: *requested,
                    });
                }
                Some(_) => {}
            }
        }

        // Apply pass. Validation guaranteed sufficiency and we still hold
        // the exclusive lock, so a failure here means the aggregation
        // itself is defective: abort with nothing appended or persisted.
        for (name, requested) in &aggregated {
            stores.inventory.decrement(name, *requested).map_err(|err| {
                error!(%err, "Stock decrement failed after successful validation");
                CommitError::Internal(err.to_string())
            })?;
        }

        // Ledger append: one record per original (unaggregated) line, all
        // sharing this commit's timestamp.
        let timestamp = Utc::now();
        let mut appended = Vec::with_capacity(sale.len());
        for line in sale.lines() {
            let record = TransactionRecord::for_line(line, timestamp);
            stores.ledger.append(record.clone());
            appended.push(record);
        }

        // Persist both tables (full replace). In-memory state is NOT
        // rolled back on failure; durability is best-effort and the caller
        // retries the save.
        let items = stores.inventory.items();
        self.storage.save_inventory(&items).await?;
        self.storage.save_ledger(stores.ledger.all()).await?;

        info!(
            lines = sale.len(),
            total = %sale.total(),
            "Sale committed"
        );

        Ok(appended)
    }

    /// Resolves a candidate item name against the catalog.
    ///
    /// This is the add-time check the input surface performs before calling
    /// [`PendingSale::add_line`]: exact-match lookup, a stock sufficiency
    /// preview, and the quoted line total. A failed resolution is a
    /// non-fatal "no match" outcome, never a mutation.
    ///
    /// The stock preview is advisory — stock may change before commit,
    /// which re-validates under the exclusive lock.
    pub async fn resolve_line(
        &self,
        name: &str,
        quantity: i64,
    ) -> Result<ResolvedLine, ResolveError> {
        let name = validate_item_name(name)?;
        validate_quantity(quantity)?;

        let stores = self.stores.read().await;
        let item = stores
            .inventory
            .get(&name)
            .ok_or_else(|| ResolveError::NoMatch(name.clone()))?;

        if item.stock_quantity < quantity {
            return Err(ResolveError::InsufficientStock {
                name: name.clone(),
                available: item.stock_quantity,
                requested: quantity,
            });
        }

        Ok(ResolvedLine {
            name,
            quantity,
            unit_price: item.unit_price,
            line_total: item.unit_price.multiply_quantity(quantity),
        })
    }

    /// Catalog snapshot sorted by name (the inventory display page).
    pub async fn inventory(&self) -> Vec<InventoryItem> {
        self.stores.read().await.inventory.items()
    }

    /// Ledger snapshot in insertion order (the transaction record page).
    pub async fn ledger(&self) -> Vec<TransactionRecord> {
        self.stores.read().await.ledger.all().to_vec()
    }

    /// Running total of all ledger record amounts.
    pub async fn ledger_total(&self) -> Money {
        self.stores.read().await.ledger.total()
    }

    /// Saves both tables as they currently stand.
    ///
    /// The shutdown flush, and the retry path after
    /// [`CommitError::Persistence`].
    pub async fn save_all(&self) -> Result<(), StorageError> {
        let stores = self.stores.read().await;
        let items = stores.inventory.items();
        self.storage.save_inventory(&items).await?;
        self.storage.save_ledger(stores.ledger.all()).await?;
        debug!("All tables saved");
        Ok(())
    }
}

/// Sums requested quantities per distinct name, preserving the order in
/// which each name first appears in the sale.
fn aggregate_lines(lines: &[LineItem]) -> Vec<(String, i64)> {
    let mut aggregated: Vec<(String, i64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for line in lines {
        match index.get(line.name.as_str()) {
            Some(&i) => aggregated[i].1 += line.quantity,
            None => {
                index.insert(line.name.as_str(), aggregated.len());
                aggregated.push((line.name.clone(), line.quantity));
            }
        }
    }

    aggregated
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_store::MemoryStorage;
    use std::sync::Arc;

    /// Engine over a memory backend seeded with `(name, stock, cents)`.
    async fn engine_with(catalog: &[(&str, i64, i64)]) -> CheckoutEngine<MemoryStorage> {
        let items = catalog
            .iter()
            .map(|&(name, stock, cents)| InventoryItem::new(name, stock, Money::from_cents(cents)))
            .collect();
        CheckoutEngine::open(MemoryStorage::with_inventory(items))
            .await
            .unwrap()
    }

    async fn stock_of<S: Storage>(engine: &CheckoutEngine<S>, name: &str) -> i64 {
        engine
            .inventory()
            .await
            .into_iter()
            .find(|i| i.name == name)
            .map(|i| i.stock_quantity)
            .expect("item in catalog")
    }

    #[test]
    fn test_aggregate_lines_first_occurrence_order() {
        let lines = vec![
            LineItem::new("Apple", 2, Money::from_cents(200)),
            LineItem::new("Banana", 1, Money::from_cents(150)),
            LineItem::new("Apple", 3, Money::from_cents(180)),
        ];
        assert_eq!(
            aggregate_lines(&lines),
            vec![("Apple".to_string(), 5), ("Banana".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn test_commit_success_decrements_and_appends() {
        // Spec example: {"Apple": (10, $2.00)}, sale [("Apple", 3, $2.00)].
        let engine = engine_with(&[("Apple", 10, 200)]).await;

        let mut sale = PendingSale::new();
        sale.add_line("Apple", 3, Money::from_cents(200)).unwrap();

        let records = engine.commit(&sale).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount.cents(), 600);
        assert_eq!(records[0].description, "Apple x 3");

        assert_eq!(stock_of(&engine, "Apple").await, 7);
        assert_eq!(engine.ledger().await, records);
        assert_eq!(engine.ledger_total().await.cents(), 600);
    }

    #[tokio::test]
    async fn test_commit_persists_both_tables() {
        let storage = Arc::new(MemoryStorage::with_inventory(vec![InventoryItem::new(
            "Apple",
            10,
            Money::from_cents(200),
        )]));
        // Arc<MemoryStorage> keeps a handle on the backend so the test can
        // inspect what was persisted.
        let engine = CheckoutEngine::open(Arc::clone(&storage)).await.unwrap();

        let mut sale = PendingSale::new();
        sale.add_line("Apple", 3, Money::from_cents(200)).unwrap();
        engine.commit(&sale).await.unwrap();

        let persisted = storage.load_inventory().await.unwrap();
        assert_eq!(persisted[0].stock_quantity, 7);
        let ledger = storage.load_ledger().await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].description, "Apple x 3");
    }

    #[tokio::test]
    async fn test_commit_multi_line_shares_timestamp() {
        let engine = engine_with(&[("Apple", 10, 200), ("Banana", 5, 150)]).await;

        let mut sale = PendingSale::new();
        sale.add_line("Apple", 2, Money::from_cents(200)).unwrap();
        sale.add_line("Banana", 1, Money::from_cents(150)).unwrap();

        let records = engine.commit(&sale).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp, records[1].timestamp);
        assert_eq!(records[0].description, "Apple x 2");
        assert_eq!(records[1].description, "Banana x 1");
    }

    #[tokio::test]
    async fn test_commit_accepts_padded_line_names() {
        // Names are trimmed at add time, so a line entered as " Apple "
        // resolves against the catalog entry "Apple" at commit.
        let engine = engine_with(&[("Apple", 10, 200)]).await;

        let mut sale = PendingSale::new();
        sale.add_line(" Apple ", 3, Money::from_cents(200)).unwrap();

        let records = engine.commit(&sale).await.unwrap();
        assert_eq!(records[0].description, "Apple x 3");
        assert_eq!(stock_of(&engine, "Apple").await, 7);
    }

    #[tokio::test]
    async fn test_commit_empty_sale() {
        let engine = engine_with(&[("Apple", 10, 200)]).await;
        let sale = PendingSale::new();

        assert!(matches!(
            engine.commit(&sale).await,
            Err(CommitError::EmptySale)
        ));
        assert!(engine.ledger().await.is_empty());
    }

    #[tokio::test]
    async fn test_commit_unknown_item_no_mutation() {
        let engine = engine_with(&[("Apple", 10, 200)]).await;

        let mut sale = PendingSale::new();
        sale.add_line("Apple", 3, Money::from_cents(200)).unwrap();
        sale.add_line("Pear", 1, Money::from_cents(100)).unwrap();

        // The Apple line alone would be fine; the Pear line must abort the
        // whole sale before ANY decrement happens.
        match engine.commit(&sale).await {
            Err(CommitError::ItemNotFound(name)) => assert_eq!(name, "Pear"),
            other => panic!("expected ItemNotFound, got {other:?}"),
        }

        assert_eq!(stock_of(&engine, "Apple").await, 10);
        assert!(engine.ledger().await.is_empty());
    }

    #[tokio::test]
    async fn test_commit_insufficient_stock_no_mutation() {
        // Spec example: {"Apple": (2, $2.00)}, sale [("Apple", 3, $2.00)].
        let engine = engine_with(&[("Apple", 2, 200)]).await;

        let mut sale = PendingSale::new();
        sale.add_line("Apple", 3, Money::from_cents(200)).unwrap();

        match engine.commit(&sale).await {
            Err(CommitError::InsufficientStock {
                name,
                available,
                requested,
            }) => {
                assert_eq!(name, "Apple");
                assert_eq!(available, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        assert_eq!(stock_of(&engine, "Apple").await, 2);
        assert!(engine.ledger().await.is_empty());
    }

    #[tokio::test]
    async fn test_commit_aggregates_same_name_across_lines() {
        // Each line alone fits the stock of 10; their sum (11) must not.
        let engine = engine_with(&[("Apple", 10, 200)]).await;

        let mut sale = PendingSale::new();
        sale.add_line("Apple", 6, Money::from_cents(200)).unwrap();
        sale.add_line("Apple", 5, Money::from_cents(200)).unwrap();

        match engine.commit(&sale).await {
            Err(CommitError::InsufficientStock {
                available,
                requested,
                ..
            }) => {
                assert_eq!(available, 10);
                assert_eq!(requested, 11);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        assert_eq!(stock_of(&engine, "Apple").await, 10);
    }

    #[tokio::test]
    async fn test_commit_duplicate_lines_ledger_stays_per_line() {
        let engine = engine_with(&[("Apple", 10, 200)]).await;

        // Same item twice, second line with a hand-edited price.
        let mut sale = PendingSale::new();
        sale.add_line("Apple", 2, Money::from_cents(200)).unwrap();
        sale.add_line("Apple", 1, Money::from_cents(180)).unwrap();

        let records = engine.commit(&sale).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount.cents(), 400);
        assert_eq!(records[1].amount.cents(), 180);

        // One aggregated decrement: 10 - 3.
        assert_eq!(stock_of(&engine, "Apple").await, 7);
    }

    #[tokio::test]
    async fn test_failed_commit_is_idempotent() {
        let engine = engine_with(&[("Apple", 2, 200)]).await;

        let mut sale = PendingSale::new();
        sale.add_line("Apple", 3, Money::from_cents(200)).unwrap();

        for _ in 0..2 {
            match engine.commit(&sale).await {
                Err(CommitError::InsufficientStock {
                    available,
                    requested,
                    ..
                }) => {
                    assert_eq!(available, 2);
                    assert_eq!(requested, 3);
                }
                other => panic!("expected InsufficientStock, got {other:?}"),
            }
            assert_eq!(stock_of(&engine, "Apple").await, 2);
            assert!(engine.ledger().await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_memory_state() {
        let storage = Arc::new(MemoryStorage::with_inventory(vec![InventoryItem::new(
            "Apple",
            10,
            Money::from_cents(200),
        )]));
        let engine = CheckoutEngine::open(Arc::clone(&storage)).await.unwrap();

        storage.set_fail_writes(true);

        let mut sale = PendingSale::new();
        sale.add_line("Apple", 3, Money::from_cents(200)).unwrap();

        match engine.commit(&sale).await {
            Err(CommitError::Persistence(_)) => {}
            other => panic!("expected Persistence, got {other:?}"),
        }

        // Memory was mutated and is NOT rolled back.
        assert_eq!(stock_of(&engine, "Apple").await, 7);
        assert_eq!(engine.ledger().await.len(), 1);
        // The backing store still holds the pre-commit state.
        assert_eq!(storage.load_inventory().await.unwrap()[0].stock_quantity, 10);

        // The retry path is save_all, never a second commit.
        storage.set_fail_writes(false);
        engine.save_all().await.unwrap();
        assert_eq!(storage.load_inventory().await.unwrap()[0].stock_quantity, 7);
        assert_eq!(storage.load_ledger().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_commits_exactly_one_success() {
        // Combined demand (7 + 7) exceeds the stock of 10: whichever commit
        // wins the lock succeeds, the other re-validates and fails.
        let engine = Arc::new(engine_with(&[("Apple", 10, 200)]).await);

        let mut tasks = Vec::new();
        for _ in 0..2 {
            let engine = Arc::clone(&engine);
            tasks.push(tokio::spawn(async move {
                let mut sale = PendingSale::new();
                sale.add_line("Apple", 7, Money::from_cents(200)).unwrap();
                engine.commit(&sale).await
            }));
        }

        let mut successes = 0;
        let mut insufficient = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => successes += 1,
                Err(CommitError::InsufficientStock { available, .. }) => {
                    assert_eq!(available, 3);
                    insufficient += 1;
                }
                other => panic!("unexpected outcome: {other:?}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(insufficient, 1);
        assert_eq!(stock_of(&engine, "Apple").await, 3);
        assert_eq!(engine.ledger().await.len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_line() {
        let engine = engine_with(&[("Apple", 10, 200)]).await;

        let quote = engine.resolve_line("Apple", 3).await.unwrap();
        assert_eq!(
            quote,
            ResolvedLine {
                name: "Apple".to_string(),
                quantity: 3,
                unit_price: Money::from_cents(200),
                line_total: Money::from_cents(600),
            }
        );

        // Trimming matches the persisted key.
        assert_eq!(engine.resolve_line(" Apple ", 1).await.unwrap().name, "Apple");
    }

    #[tokio::test]
    async fn test_resolve_line_failures() {
        let engine = engine_with(&[("Apple", 2, 200)]).await;

        assert_eq!(
            engine.resolve_line("Pear", 1).await,
            Err(ResolveError::NoMatch("Pear".to_string()))
        );
        assert_eq!(
            engine.resolve_line("Apple", 3).await,
            Err(ResolveError::InsufficientStock {
                name: "Apple".to_string(),
                available: 2,
                requested: 3,
            })
        );
        assert!(matches!(
            engine.resolve_line("Apple", 0).await,
            Err(ResolveError::Invalid(_))
        ));
        assert!(matches!(
            engine.resolve_line("   ", 1).await,
            Err(ResolveError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_open_loads_existing_state() {
        let storage = Arc::new(MemoryStorage::with_inventory(vec![InventoryItem::new(
            "Apple",
            10,
            Money::from_cents(200),
        )]));
        {
            let engine = CheckoutEngine::open(Arc::clone(&storage)).await.unwrap();
            let mut sale = PendingSale::new();
            sale.add_line("Apple", 4, Money::from_cents(200)).unwrap();
            engine.commit(&sale).await.unwrap();
        }

        // A fresh engine over the same backend resumes where we left off.
        let engine = CheckoutEngine::open(Arc::clone(&storage)).await.unwrap();
        assert_eq!(stock_of(&engine, "Apple").await, 6);
        assert_eq!(engine.ledger().await.len(), 1);
        assert_eq!(engine.ledger_total().await.cents(), 800);
    }
}
