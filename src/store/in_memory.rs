//! InMemoryKeyValueStore - HashMap-backed store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{KeyValueStore, StoreError};

/// In-memory key-value store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc — clones share
/// the same backing map. The `RwLock` makes each single call atomic, which
/// is the only guarantee the hash-map backends this stands in for provide.
#[derive(Clone)]
pub struct InMemoryKeyValueStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryKeyValueStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let key = Self::make_key(collection, id);
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        Ok(storage.get(&key).cloned())
    }

    async fn put(&self, collection: &str, id: &str, value: Vec<u8>) -> Result<bool, StoreError> {
        let key = Self::make_key(collection, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        storage.insert(key, value);
        Ok(true)
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let key = Self::make_key(collection, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        Ok(storage.remove(&key).is_some())
    }

    async fn values(&self, collection: &str) -> Result<Vec<Vec<u8>>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let prefix = format!("{}:", collection);
        let mut results = Vec::new();

        for (key, value) in storage.iter() {
            if key.starts_with(&prefix) {
                results.push(value.clone());
            }
        }

        Ok(results)
    }
}
