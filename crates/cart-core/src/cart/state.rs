//! Cart state and its derived aggregates.

use crate::cart::LineItem;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The aggregate owned by a [`CartStore`](crate::cart::CartStore).
///
/// `item_count` and `subtotal` are caches of values derived from `items`.
/// Every mutation ends with [`CartState::recompute`], which rebuilds them from
/// scratch rather than patching them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    /// Line items in insertion order.
    pub items: Vec<LineItem>,
    /// Sum of quantities.
    pub item_count: i64,
    /// Sum of `unit_price * quantity`.
    pub subtotal: Money,
}

impl CartState {
    /// Create an empty cart in the given currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            item_count: 0,
            subtotal: Money::zero(currency),
        }
    }

    /// Currency of the cart totals.
    pub fn currency(&self) -> Currency {
        self.subtotal.currency
    }

    /// Rebuild `item_count` and `subtotal` from `items`.
    pub fn recompute(&mut self) {
        let currency = self.currency();
        self.item_count = self
            .items
            .iter()
            .fold(0_i64, |acc, item| acc.saturating_add(item.quantity));
        self.subtotal = self
            .items
            .iter()
            .fold(Money::zero(currency), |acc, item| {
                acc.saturating_add(&item.line_total())
            });
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by product ID.
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    pub(crate) fn get_mut(&mut self, product_id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| &i.product_id == product_id)
    }

    /// Empty the cart and zero the aggregates.
    pub(crate) fn reset(&mut self) {
        self.items.clear();
        self.item_count = 0;
        self.subtotal = Money::zero(self.currency());
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recompute_from_scratch() {
        let mut state = CartState::new(Currency::USD);
        state.items.push(
            LineItem::new("a", "A", Money::new(1000, Currency::USD), 5).with_quantity(2),
        );
        state.items.push(
            LineItem::new("b", "B", Money::new(250, Currency::USD), 5).with_quantity(3),
        );

        // Deliberately stale aggregates
        state.item_count = 99;
        state.subtotal = Money::new(1, Currency::USD);

        state.recompute();
        assert_eq!(state.item_count, 5);
        assert_eq!(state.subtotal.amount_cents, 2750);
    }

    #[test]
    fn test_reset_keeps_currency() {
        let mut state = CartState::new(Currency::EUR);
        state.items.push(LineItem::new("a", "A", Money::new(1, Currency::EUR), 1));
        state.recompute();

        state.reset();
        assert!(state.is_empty());
        assert_eq!(state.item_count, 0);
        assert_eq!(state.subtotal, Money::zero(Currency::EUR));
    }
}
