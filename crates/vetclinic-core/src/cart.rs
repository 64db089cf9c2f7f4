//! # Cart Module
//!
//! Transient, in-memory aggregation of sale lines before checkout.
//!
//! The cart never touches the database: it carries denormalized snapshots
//! (name, price, category) taken from the inventory listing at the moment an
//! item is added, and is discarded on checkout or clear. Checkout hands the
//! lines to the sales register, which persists them and settles stock.
//!
//! ## Invariants
//! - Lines are unique by `item_id`; adding the same item again merges
//!   quantities instead of appending a duplicate line.
//! - Quantities are always ≥ 1; setting a quantity ≤ 0 removes the line.
//! - `total == Σ line.price × line.quantity` after any operation sequence.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

/// One line in the cart: an item reference plus a price/name snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Inventory item id this line refers to.
    pub item_id: i64,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Unit price in centavos at time of adding (frozen).
    pub price_centavos: i64,

    /// Units in the cart, always ≥ 1.
    pub quantity: i64,

    /// Category snapshot, carried through to reporting.
    pub category: String,
}

impl CartLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_centavos(self.price_centavos)
    }

    /// Line subtotal (price × quantity).
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.price().multiply_quantity(self.quantity)
    }
}

/// The in-memory cart. One per session; rebuilt from the current inventory
/// listing whenever products are shown for sale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds an item to the cart, merging into an existing line for the same
    /// item id.
    ///
    /// ## Example
    /// ```rust
    /// use vetclinic_core::cart::Cart;
    /// use vetclinic_core::money::Money;
    ///
    /// let mut cart = Cart::new();
    /// cart.add_line(1, "Sterile Bandage 5cm x 5m", Money::from_centavos(15_000), 2, "Dog Medicines").unwrap();
    /// cart.add_line(1, "Sterile Bandage 5cm x 5m", Money::from_centavos(15_000), 1, "Dog Medicines").unwrap();
    ///
    /// assert_eq!(cart.len(), 1);
    /// assert_eq!(cart.item_count(), 3);
    /// assert_eq!(cart.total().centavos(), 45_000);
    /// ```
    pub fn add_line(
        &mut self,
        item_id: i64,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        category: impl Into<String>,
    ) -> Result<(), ValidationError> {
        if quantity < 1 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity += quantity;
            return Ok(());
        }

        self.lines.push(CartLine {
            item_id,
            name: name.into(),
            price_centavos: price.centavos(),
            quantity,
            category: category.into(),
        });
        Ok(())
    }

    /// Removes the line for `item_id`. No-op if the item is not in the cart.
    pub fn remove_line(&mut self, item_id: i64) {
        self.lines.retain(|l| l.item_id != item_id);
    }

    /// Sets the quantity for `item_id`. A quantity ≤ 0 removes the line.
    /// No-op if the item is not in the cart.
    pub fn set_quantity(&mut self, item_id: i64, quantity: i64) {
        if quantity <= 0 {
            self.remove_line(item_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = quantity;
        }
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total cart value (Σ line subtotals).
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.subtotal()).sum()
    }

    /// Total unit count across all lines (Σ quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The cart lines, in insertion order. Checkout hands this slice to the
    /// sales register.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bandage_price() -> Money {
        Money::from_centavos(15_000)
    }

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        cart.add_line(1, "Sterile Bandage 5cm x 5m", bandage_price(), 2, "Dog Medicines")
            .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total().centavos(), 30_000);
    }

    #[test]
    fn test_add_same_item_merges() {
        let mut cart = Cart::new();
        cart.add_line(1, "Sterile Bandage 5cm x 5m", bandage_price(), 2, "Dog Medicines")
            .unwrap();
        cart.add_line(1, "Sterile Bandage 5cm x 5m", bandage_price(), 3, "Dog Medicines")
            .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.total().centavos(), 75_000);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        assert!(cart.add_line(1, "X", bandage_price(), 0, "").is_err());
        assert!(cart.add_line(1, "X", bandage_price(), -2, "").is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add_line(1, "X", bandage_price(), 2, "").unwrap();

        cart.set_quantity(1, 5);
        assert_eq!(cart.item_count(), 5);

        // Quantity of zero removes the line.
        cart.set_quantity(1, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_item_is_noop() {
        let mut cart = Cart::new();
        cart.add_line(1, "X", bandage_price(), 2, "").unwrap();
        cart.set_quantity(99, 7);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_line(1, "X", bandage_price(), 2, "").unwrap();
        cart.add_line(2, "Y", Money::from_centavos(5_000), 1, "").unwrap();

        cart.remove_line(1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total().centavos(), 5_000);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_total_after_mixed_operations() {
        let mut cart = Cart::new();
        cart.add_line(1, "A", Money::from_centavos(10_000), 2, "").unwrap();
        cart.add_line(2, "B", Money::from_centavos(2_500), 4, "").unwrap();
        cart.set_quantity(1, 1);
        cart.add_line(2, "B", Money::from_centavos(2_500), 1, "").unwrap();

        // 1×10000 + 5×2500
        assert_eq!(cart.total().centavos(), 22_500);
        assert_eq!(cart.item_count(), 6);
    }
}
