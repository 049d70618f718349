//! Shared cart handle for UI components.
//!
//! An application builds one [`CartStore`] at startup, wraps it in a
//! [`CartContext`] and hands clones of the context to whatever renders the
//! cart badge, the cart page, or the checkout. Each clone points at the same
//! store. Tests build their own contexts, so nothing is global.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cart::{CartStore, LineItem};
use crate::ids::ProductId;
use crate::money::Money;
use cart_storage::CartStorage;

/// Cloneable, single-threaded handle to a cart store.
#[derive(Debug)]
pub struct CartContext<S> {
    inner: Rc<RefCell<CartStore<S>>>,
}

impl<S> Clone for CartContext<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: CartStorage> CartContext<S> {
    /// Wrap a store.
    pub fn new(store: CartStore<S>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }

    /// Build a store over `storage`, rehydrate it, and wrap it.
    pub fn restore(storage: S) -> Self {
        Self::new(CartStore::open(storage))
    }

    /// Run a read-only closure against the store.
    ///
    /// # Panics
    /// Panics if called from inside [`CartContext::update`] on the same context.
    pub fn read<R>(&self, f: impl FnOnce(&CartStore<S>) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Run a mutating closure against the store.
    ///
    /// # Panics
    /// Panics if called re-entrantly on the same context.
    pub fn update<R>(&self, f: impl FnOnce(&mut CartStore<S>) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// Add a product; see [`CartStore::add_item`].
    pub fn add_item(&self, candidate: LineItem) {
        self.update(|store| store.add_item(candidate));
    }

    /// Remove a product's line. Returns whether one was removed.
    pub fn remove_item(&self, product_id: &ProductId) -> bool {
        self.update(|store| store.remove_item(product_id))
    }

    /// Set a line's quantity, clamped to its stock limit.
    pub fn update_quantity(&self, product_id: &ProductId, quantity: i64) -> bool {
        self.update(|store| store.update_quantity(product_id, quantity))
    }

    /// Empty the cart and erase the persisted snapshot.
    pub fn clear(&self) {
        self.update(|store| store.clear());
    }

    /// Total units in the cart.
    pub fn item_count(&self) -> i64 {
        self.read(|store| store.item_count())
    }

    /// Current subtotal.
    pub fn subtotal(&self) -> Money {
        self.read(|store| store.subtotal())
    }

    /// Whether two handles share one store.
    pub fn same_store(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use cart_storage::MemoryStorage;

    fn tea() -> LineItem {
        LineItem::new("tea", "Green Tea", Money::new(450, Currency::USD), 10)
    }

    #[test]
    fn test_clones_share_store() {
        let ctx = CartContext::new(CartStore::new(MemoryStorage::new()));
        let badge = ctx.clone();

        ctx.add_item(tea());
        ctx.add_item(tea());

        assert!(ctx.same_store(&badge));
        assert_eq!(badge.item_count(), 2);
        assert_eq!(badge.subtotal().amount_cents, 900);
    }

    #[test]
    fn test_separate_contexts_are_isolated() {
        let a = CartContext::new(CartStore::new(MemoryStorage::new()));
        let b = CartContext::new(CartStore::new(MemoryStorage::new()));

        a.add_item(tea());
        assert_eq!(a.item_count(), 1);
        assert_eq!(b.item_count(), 0);
        assert!(!a.same_store(&b));
    }

    #[test]
    fn test_restore_rehydrates() {
        let storage = MemoryStorage::new();
        CartContext::restore(storage.clone()).add_item(tea().with_quantity(3));

        let ctx = CartContext::restore(storage);
        assert_eq!(ctx.item_count(), 3);
        assert!(ctx.read(|s| s.contains(&ProductId::new("tea"))));
    }

    #[test]
    fn test_update_and_remove_through_context() {
        let ctx = CartContext::new(CartStore::new(MemoryStorage::new()));
        let id = ProductId::new("tea");
        ctx.add_item(tea());

        assert!(ctx.update_quantity(&id, 50));
        assert_eq!(ctx.item_count(), 10);

        assert!(ctx.remove_item(&id));
        assert_eq!(ctx.item_count(), 0);

        ctx.add_item(tea());
        ctx.clear();
        assert!(ctx.read(|s| s.is_empty()));
    }
}
