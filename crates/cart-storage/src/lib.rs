//! Client-local key-value persistence for the cart store.
//!
//! The cart store only needs three things from storage: read a slot, write a
//! slot, erase a slot. [`CartStorage`] captures exactly that, and the backends
//! here provide it:
//!
//! - [`MemoryStorage`] - shared in-process map, for tests and ephemeral carts
//! - [`FileStorage`] - one JSON file per key in a data directory
//! - `SpinStorage` - Spin's Key-Value Store (`wasm32` only)
//!
//! # Example
//!
//! ```
//! use cart_storage::{CartStorage, MemoryStorage};
//!
//! let storage = MemoryStorage::new();
//! storage.set("cart", r#"{"items":[],"itemCount":0,"subtotal":0}"#).unwrap();
//! assert!(storage.exists("cart").unwrap());
//!
//! storage.remove("cart").unwrap();
//! assert!(storage.get("cart").unwrap().is_none());
//! ```

mod error;
mod file;
mod kv;
mod memory;
#[cfg(target_arch = "wasm32")]
mod spin;

pub use error::StorageError;
pub use file::{validate_key, FileStorage};
pub use kv::{CartStorage, JsonStore};
pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartStorage, FileStorage, JsonStore, MemoryStorage, StorageError};
}
