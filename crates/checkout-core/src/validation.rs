//! # Validation Module
//!
//! Input validation for the values that enter a pending sale.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Collaborator (input surface / classifier)                 │
//! │  ├── Trims the candidate name, parses the quantity field            │
//! │  └── THIS MODULE: shared checks before touching the sale            │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: PendingSale (add_line / edit_line)                        │
//! │  └── Re-applies the same rules; a sale can never hold a bad line    │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: CheckoutEngine commit                                     │
//! │  └── Existence + stock sufficiency against live inventory           │
//! │                                                                     │
//! │  Defense in depth: each layer catches what the previous one missed  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::SaleError;
use crate::money::Money;
use crate::MAX_LINE_QUANTITY;

/// Validates and normalizes an item name.
///
/// ## Rules
/// - Must not be empty after trimming
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_item_name;
///
/// assert_eq!(validate_item_name("  Apple ").unwrap(), "Apple");
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> Result<String, SaleError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SaleError::InvalidName);
    }
    Ok(name.to_string())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `MAX_LINE_QUANTITY`
pub fn validate_quantity(quantity: i64) -> Result<(), SaleError> {
    if quantity <= 0 || quantity > MAX_LINE_QUANTITY {
        return Err(SaleError::InvalidQuantity(quantity));
    }
    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (giveaway items)
pub fn validate_unit_price(price: Money) -> Result<(), SaleError> {
    if price.is_negative() {
        return Err(SaleError::InvalidValue {
            field: "unit_price",
            reason: format!("{} is negative", price),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
