//! The cart store: state, mutations, and persistence.

use crate::cart::pricing::{CartSummary, PricingOptions};
use crate::cart::snapshot::{CartSnapshot, DEFAULT_CART_KEY};
use crate::cart::{clamp_quantity, CartState, LineItem};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use cart_storage::{CartStorage, JsonStore};

/// Shopping cart state machine with write-through persistence.
///
/// Every mutation recomputes the aggregates and then commits a snapshot to
/// storage. Commit failures are logged and dropped: the in-memory mutation
/// always stands.
///
/// # Example
///
/// ```
/// use cart_core::prelude::*;
/// use cart_storage::MemoryStorage;
///
/// let mut store = CartStore::new(MemoryStorage::new());
/// let widget = LineItem::new("p1", "Widget", Money::new(1000, Currency::USD), 5);
///
/// store.add_item(widget.clone());
/// store.add_item(widget);
///
/// assert_eq!(store.items().len(), 1);
/// assert_eq!(store.item_count(), 2);
/// assert_eq!(store.subtotal().display(), "$20.00");
/// ```
#[derive(Debug)]
pub struct CartStore<S> {
    storage: JsonStore<S>,
    key: String,
    state: CartState,
}

impl<S: CartStorage> CartStore<S> {
    /// Create an empty USD cart persisting under the default key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    /// Create an empty USD cart persisting under `key`.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage: JsonStore::new(storage),
            key: key.into(),
            state: CartState::new(Currency::default()),
        }
    }

    /// Use a different currency for prices and totals.
    ///
    /// Meant for construction time. Lines already present are re-tagged
    /// without conversion.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        for item in &mut self.state.items {
            item.retag_price(currency);
        }
        self.state.subtotal = Money::zero(currency);
        self.state.recompute();
        self
    }

    /// Create a store and immediately rehydrate it from storage.
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.load_persisted();
        store
    }

    /// Add a product, merging into an existing line for the same product.
    ///
    /// On merge the existing line keeps its stock limit and unit price; the
    /// quantity becomes `min(existing + requested, stock_limit)`. A requested
    /// quantity below one counts as one.
    pub fn add_item(&mut self, candidate: LineItem) {
        let requested = candidate.quantity.max(1);

        if let Some(existing) = self.state.get_mut(&candidate.product_id) {
            let merged = existing
                .quantity
                .saturating_add(requested)
                .min(existing.stock_limit);
            tracing::debug!(
                product_id = %existing.product_id,
                from = existing.quantity,
                to = merged,
                "merged add into existing line"
            );
            existing.quantity = merged;
            existing.refresh_display(&candidate);
        } else {
            let mut item = candidate;
            item.quantity = requested;
            let item = item.normalized(self.state.currency());
            tracing::debug!(
                product_id = %item.product_id,
                quantity = item.quantity,
                "added line"
            );
            self.state.items.push(item);
        }

        self.finish_mutation();
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.state.items.len();
        self.state.items.retain(|i| &i.product_id != product_id);
        let removed = self.state.items.len() < len_before;
        if removed {
            tracing::debug!(product_id = %product_id, "removed line");
        }
        self.finish_mutation();
        removed
    }

    /// Set the quantity of a line, clamped into `[1, stock_limit]`.
    ///
    /// Returns `false` without touching anything if no line matches. Going
    /// to zero is not possible here; use [`CartStore::remove_item`].
    pub fn update_quantity(&mut self, product_id: &ProductId, requested: i64) -> bool {
        let Some(item) = self.state.get_mut(product_id) else {
            return false;
        };

        let quantity = clamp_quantity(requested, item.stock_limit);
        tracing::debug!(
            product_id = %product_id,
            requested,
            quantity,
            "updated quantity"
        );
        item.quantity = quantity;

        self.finish_mutation();
        true
    }

    /// Empty the cart and erase the persisted snapshot.
    pub fn clear(&mut self) {
        self.state.reset();
        tracing::debug!(key = %self.key, "cleared cart");
        if let Err(e) = self.storage.delete(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to erase persisted cart");
        }
    }

    /// Replace the in-memory state with the persisted snapshot.
    ///
    /// Returns `true` if a snapshot was restored. An absent or malformed
    /// snapshot leaves the current state untouched.
    pub fn load_persisted(&mut self) -> bool {
        match self.read_snapshot() {
            Ok(Some(state)) => {
                tracing::debug!(
                    key = %self.key,
                    lines = state.items.len(),
                    "restored persisted cart"
                );
                self.state = state;
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "ignoring unreadable persisted cart");
                false
            }
        }
    }

    fn read_snapshot(&self) -> Result<Option<CartState>, CommerceError> {
        match self.storage.get_json::<CartSnapshot>(&self.key)? {
            Some(snapshot) => Ok(Some(snapshot.into_state(self.state.currency())?)),
            None => Ok(None),
        }
    }

    fn finish_mutation(&mut self) {
        self.state.recompute();
        self.commit();
    }

    /// Write the snapshot; failures never reach the caller.
    fn commit(&self) {
        if let Err(e) = self.try_commit() {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }

    fn try_commit(&self) -> Result<(), CommerceError> {
        let snapshot = CartSnapshot::from_state(&self.state);
        self.storage.set_json(&self.key, &snapshot)?;
        Ok(())
    }

    /// Order summary for the current cart.
    pub fn summary(&self, options: &PricingOptions) -> Result<CartSummary, CommerceError> {
        CartSummary::calculate(&self.state, options)
    }

    /// Get the storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the storage backend.
    pub fn storage(&self) -> &S {
        self.storage.storage()
    }
}

impl<S> CartStore<S> {
    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.state.item_count
    }

    /// Sum of `unit_price * quantity`.
    pub fn subtotal(&self) -> Money {
        self.state.subtotal
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.state.items
    }

    /// Get a line by product ID.
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.state.get(product_id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.state.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Currency of prices and totals.
    pub fn currency(&self) -> Currency {
        self.state.currency()
    }

    /// Borrow the whole state, e.g. for building an order at checkout.
    pub fn state(&self) -> &CartState {
        &self.state
    }
}
