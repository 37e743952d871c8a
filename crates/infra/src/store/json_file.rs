use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use super::{BlobStore, StoreError, validate_key};

/// One pretty-printed `<key>.json` file per key under a data directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a crash mid-save
/// leaves the previous blob intact. The two blobs are still saved independently.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl BlobStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        validate_key(key)?;
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error(&path, err)),
        };
        let value = serde_json::from_slice(&bytes).map_err(|source| StoreError::Serde {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: JsonValue) -> Result<(), StoreError> {
        validate_key(key)?;
        fs::create_dir_all(&self.dir).map_err(|err| io_error(&self.dir, err))?;

        let bytes = serde_json::to_vec_pretty(&value).map_err(|source| StoreError::Serde {
            key: key.to_string(),
            source,
        })?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, bytes).map_err(|err| io_error(&tmp, err))?;
        fs::rename(&tmp, &path).map_err(|err| io_error(&path, err))?;

        tracing::debug!(path = %path.display(), "wrote blob");
        Ok(())
    }
}
