//! Whole-state blob storage.
//!
//! The planner persists a handful of independent JSON blobs under fixed keys. Stores only
//! move blobs; they know nothing about what is inside.

mod in_memory;
mod json_file;

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use thiserror::Error;

pub use in_memory::InMemoryBlobStore;
pub use json_file::JsonFileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize '{key}': {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Key/value store of JSON blobs.
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError>;
    fn set(&self, key: &str, value: JsonValue) -> Result<(), StoreError>;
}

impl<S> BlobStore for Arc<S>
where
    S: BlobStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: JsonValue) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Keys double as file names, so keep them to a portable character set.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
