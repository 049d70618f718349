//! Shopping cart module.
//!
//! Contains the line item and state types, the persisted snapshot format,
//! the store that ties them together, and order summary pricing.

mod line_item;
mod pricing;
mod snapshot;
mod state;
mod store;

pub use line_item::{clamp_quantity, LineItem};
pub use pricing::{CartSummary, LineSummary, PricingOptions, DEFAULT_TAX_RATE};
pub use snapshot::{CartSnapshot, SnapshotItem, DEFAULT_CART_KEY};
pub use state::CartState;
pub use store::CartStore;
