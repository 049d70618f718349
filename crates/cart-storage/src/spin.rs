//! Spin Key-Value Store backend for edge deployments.

use crate::{CartStorage, StorageError};

/// Storage backed by Spin's Key-Value Store.
pub struct SpinStorage {
    store: spin_sdk::key_value::Store,
}

impl SpinStorage {
    /// Open the default Key-Value store.
    pub fn open_default() -> Result<Self, StorageError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| StorageError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named Key-Value store.
    pub fn open(name: &str) -> Result<Self, StorageError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| StorageError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }
}

impl CartStorage for SpinStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.store.get(key) {
            Ok(Some(bytes)) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| StorageError::StoreError(e.to_string())),
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::StoreError(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store
            .set(key, value.as_bytes())
            .map_err(|e| StorageError::StoreError(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.store
            .delete(key)
            .map_err(|e| StorageError::StoreError(e.to_string()))
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.store
            .exists(key)
            .map_err(|e| StorageError::StoreError(e.to_string()))
    }
}
