//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  checkout-core errors (this file)                                   │
//! │  ├── SaleError       - Pending-sale edit failures (caller input)    │
//! │  └── InventoryError  - Stock rule violations (decrement)            │
//! │                                                                     │
//! │  checkout-store errors (separate crate)                             │
//! │  └── StorageError    - Load/save failures                           │
//! │                                                                     │
//! │  checkout-engine errors (separate crate)                            │
//! │  └── CommitError     - What the operator-facing caller sees         │
//! │                                                                     │
//! │  Flow: SaleError / InventoryError → CommitError → caller            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, index, quantities)
//! 3. Errors are enum variants, never String
//! 4. Validation errors never mutate state; safe to correct and retry

use thiserror::Error;

// =============================================================================
// Sale Error
// =============================================================================

/// Pending-sale edit errors.
///
/// These are caller-correctable: the offending input is rejected before any
/// state changes, and the sale stays exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaleError {
    /// Quantity must be a positive integer.
    ///
    /// ## When This Occurs
    /// - Adding a line with quantity <= 0
    /// - Editing a line's quantity to <= 0
    #[error("Invalid quantity: {0} (must be positive)")]
    InvalidQuantity(i64),

    /// Item name is empty (after trimming whitespace).
    #[error("Invalid item name: name must not be empty")]
    InvalidName,

    /// An edited value is out of range for its field.
    ///
    /// ## When This Occurs
    /// - Editing a unit price to a negative amount
    /// - Editing a quantity past the per-line maximum
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },

    /// Line index does not exist in the pending sale.
    #[error("Line index {index} out of range (sale has {len} lines)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Sale has reached the maximum number of lines.
    #[error("Sale cannot have more than {max} lines")]
    TooManyLines { max: usize },
}

// =============================================================================
// Inventory Error
// =============================================================================

/// Stock rule violations raised by [`crate::InventoryStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Item name does not resolve to a catalog entry.
    ///
    /// ## When This Occurs
    /// - A pending-sale line references a name absent from inventory
    /// - A classifier suggestion did not match any catalog entry
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Requested quantity exceeds what is on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Commit sale (Apple x 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Apple", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 Apple in stock"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_error_messages() {
        let err = SaleError::InvalidQuantity(0);
        assert_eq!(err.to_string(), "Invalid quantity: 0 (must be positive)");

        let err = SaleError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "Line index 4 out of range (sale has 2 lines)"
        );
    }

    #[test]
    fn test_inventory_error_messages() {
        let err = InventoryError::InsufficientStock {
            name: "Apple".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Apple: available 3, requested 5"
        );

        let err = InventoryError::NotFound("Pear".to_string());
        assert_eq!(err.to_string(), "Item not found: Pear");
    }
}
