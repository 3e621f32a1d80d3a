//! # Pending Sale
//!
//! The mutable collection of line items being assembled before commit.
//!
//! ## Sale Assembly Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     PendingSale Operations                          │
//! │                                                                     │
//! │  Operator Action           Operation            Sale Change         │
//! │  ───────────────           ─────────            ───────────         │
//! │                                                                     │
//! │  Pick item ──────────────► add_line() ────────► lines.push(line)    │
//! │                                                                     │
//! │  Fix a quantity ─────────► edit_line() ───────► lines[i].quantity   │
//! │                                                                     │
//! │  Fix a price ────────────► edit_line() ───────► lines[i].unit_price │
//! │                                                                     │
//! │  Remove a row ───────────► remove_line() ─────► lines.remove(i)     │
//! │                                                                     │
//! │  After commit / cancel ──► clear() ───────────► lines.clear()       │
//! │                                                                     │
//! │  Line totals are computed, so every edit re-derives them for free.  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Duplicates
//! The same item name may appear on several lines, each with its own
//! quantity and (possibly hand-edited) price. The engine aggregates them
//! for the stock check at commit; here they stay independent rows.

use serde::{Deserialize, Serialize};

use crate::error::SaleError;
use crate::money::Money;
use crate::types::LineItem;
use crate::{validation, MAX_SALE_LINES};

/// A field edit applied to one line of the sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEdit {
    /// Replace the line's quantity.
    Quantity(i64),
    /// Replace the line's unit price (line total re-derives).
    UnitPrice(Money),
}

/// The in-progress, not-yet-committed sale.
///
/// ## Ownership
/// Owned by whatever collaborator is assembling it (single-owner, no
/// locking). The engine only reads it during commit; the caller clears it
/// afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingSale {
    lines: Vec<LineItem>,
}

impl PendingSale {
    /// Creates an empty sale.
    pub fn new() -> Self {
        PendingSale { lines: Vec::new() }
    }

    /// Appends a new line item.
    ///
    /// The name is trimmed before it is stored, so the line carries the
    /// exact string commit will look up in the catalog. Inventory existence
    /// is deliberately NOT checked here: the add step may itself be
    /// resolving a candidate name, and resolution belongs to the
    /// collaborator (see the engine's `resolve_line`).
    ///
    /// ## Errors
    /// - [`SaleError::InvalidQuantity`] if `quantity <= 0` or over the cap
    /// - [`SaleError::InvalidName`] if `name` trims to empty
    /// - [`SaleError::InvalidValue`] if `unit_price` is negative
    /// - [`SaleError::TooManyLines`] at the line cap
    pub fn add_line(
        &mut self,
        name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<(), SaleError> {
        let name = validation::validate_item_name(&name.into())?;
        validation::validate_quantity(quantity)?;
        validation::validate_unit_price(unit_price)?;
        if self.lines.len() >= MAX_SALE_LINES {
            return Err(SaleError::TooManyLines {
                max: MAX_SALE_LINES,
            });
        }

        self.lines.push(LineItem::new(name, quantity, unit_price));
        Ok(())
    }

    /// Edits one field of an existing line.
    ///
    /// ## Errors
    /// - [`SaleError::IndexOutOfRange`] if `index` is invalid
    /// - [`SaleError::InvalidQuantity`] / [`SaleError::InvalidValue`] if the
    ///   new value is not positive where required
    ///
    /// On error the line keeps its previous value.
    pub fn edit_line(&mut self, index: usize, edit: LineEdit) -> Result<(), SaleError> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(SaleError::IndexOutOfRange { index, len })?;

        match edit {
            LineEdit::Quantity(quantity) => {
                validation::validate_quantity(quantity)?;
                line.quantity = quantity;
            }
            LineEdit::UnitPrice(price) => {
                validation::validate_unit_price(price)?;
                line.unit_price = price;
            }
        }
        Ok(())
    }

    /// Removes one line by index.
    pub fn remove_line(&mut self, index: usize) -> Result<LineItem, SaleError> {
        let len = self.lines.len();
        if index >= len {
            return Err(SaleError::IndexOutOfRange { index, len });
        }
        Ok(self.lines.remove(index))
    }

    /// Discards all lines (after a successful commit, or on cancel).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Read-only snapshot of the lines in display order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks whether the sale has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
