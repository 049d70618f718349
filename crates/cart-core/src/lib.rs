//! Shopping cart state store.
//!
//! This crate provides the client-side cart of a storefront:
//!
//! - **Cart**: line items keyed by product, clamped quantities, derived totals
//! - **Persistence**: a snapshot written after every mutation, restored on start
//! - **Pricing**: order summary with savings, shipping and tax
//! - **Context**: a shared handle for injecting one store into many components
//!
//! # Example
//!
//! ```
//! use cart_core::prelude::*;
//! use cart_storage::MemoryStorage;
//!
//! let storage = MemoryStorage::new();
//! let mut cart = CartStore::open(storage.clone());
//!
//! cart.add_item(
//!     LineItem::new("rust-book", "Rust Programming Book", Money::new(4999, Currency::USD), 5)
//!         .with_quantity(2),
//! );
//! cart.update_quantity(&ProductId::new("rust-book"), 100);
//! assert_eq!(cart.item_count(), 5);
//!
//! // A fresh store over the same storage sees the same cart.
//! let reloaded = CartStore::open(storage);
//! assert_eq!(reloaded.subtotal().display(), "$249.95");
//!
//! let summary = reloaded.summary(&PricingOptions::default()).unwrap();
//! assert_eq!(summary.tax.display(), "$25.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod context;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{
        CartSnapshot, CartState, CartStore, CartSummary, LineItem, LineSummary, PricingOptions,
    };
    pub use crate::context::CartContext;
}
