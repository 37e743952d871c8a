use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value as JsonValue;

use super::{BlobStore, StoreError, validate_key};

/// In-memory blob store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    inner: RwLock<HashMap<String, JsonValue>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        validate_key(key)?;
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: JsonValue) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(key.to_string(), value);
        Ok(())
    }
}
