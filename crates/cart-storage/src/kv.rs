//! Storage capability and typed JSON access on top of it.

use std::sync::Arc;

use crate::StorageError;
use serde::{de::DeserializeOwned, Serialize};

/// A client-local key-value slot store.
///
/// Values are opaque strings; callers decide the encoding. Implementations
/// must treat a missing key as `Ok(None)` and removing a missing key as a
/// successful no-op.
pub trait CartStorage {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: CartStorage + ?Sized> CartStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        (**self).exists(key)
    }
}

impl<T: CartStorage + ?Sized> CartStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        (**self).exists(key)
    }
}

/// Type-safe JSON view over any [`CartStorage`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
///
/// # Example
///
/// ```
/// use cart_storage::{JsonStore, MemoryStorage};
///
/// let store = JsonStore::new(MemoryStorage::new());
/// store.set_json("counts", &vec![1, 2, 3]).unwrap();
/// let counts: Option<Vec<i32>> = store.get_json("counts").unwrap();
/// assert_eq!(counts, Some(vec![1, 2, 3]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonStore<S> {
    storage: S,
}

impl<S: CartStorage> JsonStore<S> {
    /// Wrap a storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Get a value, returning `None` if the key doesn't exist.
    ///
    /// A value that is present but does not decode as `T` is reported as
    /// [`StorageError::SerializeError`].
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.storage.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.storage.set(key, &raw)
    }

    /// Delete a value.
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove(key)
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.storage.exists(key)
    }

    /// Borrow the underlying backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume and return the underlying backend.
    pub fn into_inner(self) -> S {
        self.storage
    }
}

/// Helper to build storage keys with namespacing.
///
/// # Example
///
/// ```
/// let profile = "work";
/// let key = cart_storage::cache_key!("cart", profile);
/// assert_eq!(key, "cart:work");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Badge {
        count: u32,
    }

    #[test]
    fn test_json_roundtrip() {
        let store = JsonStore::new(MemoryStorage::new());
        store.set_json("badge", &Badge { count: 3 }).unwrap();

        let badge: Option<Badge> = store.get_json("badge").unwrap();
        assert_eq!(badge, Some(Badge { count: 3 }));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = JsonStore::new(MemoryStorage::new());
        let badge: Option<Badge> = store.get_json("badge").unwrap();
        assert!(badge.is_none());
    }

    #[test]
    fn test_undecodable_value_is_error() {
        let storage = MemoryStorage::new();
        storage.set("badge", "not json").unwrap();

        let store = JsonStore::new(storage);
        let result: Result<Option<Badge>, _> = store.get_json("badge");
        assert!(matches!(result, Err(StorageError::SerializeError(_))));
    }

    #[test]
    fn test_delete() {
        let store = JsonStore::new(MemoryStorage::new());
        store.set_json("badge", &Badge { count: 1 }).unwrap();
        assert!(store.exists("badge").unwrap());

        store.delete("badge").unwrap();
        assert!(!store.exists("badge").unwrap());
    }

    #[test]
    fn test_boxed_backend() {
        let boxed: Box<dyn CartStorage> = Box::new(MemoryStorage::new());
        boxed.set("k", "v").unwrap();
        assert_eq!(boxed.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_cache_key() {
        let id = 42;
        assert_eq!(cache_key!("cart", "guest", id), "cart:guest:42");
    }
}
