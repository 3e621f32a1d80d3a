//! # Seed Data Generator
//!
//! Writes a starter inventory document for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./data/inventory.json
//! cargo run -p checkout-store --bin seed
//!
//! # Seed a specific directory
//! CHECKOUT_DATA_DIR=/tmp/checkout cargo run -p checkout-store --bin seed
//! ```
//!
//! Each item gets a realistic grocery price and a small stock count so the
//! insufficient-stock path is easy to reach by hand.

use tracing::info;
use tracing_subscriber::EnvFilter;

use checkout_core::{InventoryItem, Money};
use checkout_store::{JsonStorage, Storage};

/// Starter catalog: (name, stock, price in cents).
const CATALOG: &[(&str, i64, i64)] = &[
    ("Apple", 10, 200),
    ("Banana", 24, 80),
    ("Orange", 15, 120),
    ("Milk 1L", 8, 350),
    ("Bread", 6, 280),
    ("Eggs 12pk", 5, 420),
    ("Coffee 250g", 4, 899),
    ("Chocolate Bar", 30, 150),
    ("Sparkling Water", 18, 110),
    ("Instant Noodles", 2, 95),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let storage = JsonStorage::from_env();

    let items: Vec<InventoryItem> = CATALOG
        .iter()
        .map(|&(name, stock, cents)| InventoryItem::new(name, stock, Money::from_cents(cents)))
        .collect();

    storage.save_inventory(&items).await?;

    info!(
        path = %storage.inventory_path().display(),
        count = items.len(),
        "Seeded inventory"
    );
    Ok(())
}
