//! JSON Key-Value File Storage
//!
//! Local mirror for small records that must survive a restart (the signed-in
//! identity). One file per key: `<dir>/<key>.json`. Writes go through a
//! temporary file and a rename so a crash never leaves a half-written record.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored record is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Key-value store contract
#[trait_variant::make(KeyValueStore: Send)]
pub trait LocalKeyValueStore {
    /// Read and deserialize a record; `None` when the key was never written
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, StorageError>;

    /// Serialize and write a record, replacing any previous value
    async fn put<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StorageError>;

    /// Remove a record; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Directory-backed JSON store
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

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn put<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let json = serde_json::to_vec_pretty(value)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &path).await?;

        tracing::debug!(path = %path.display(), "Stored record");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonFileStore, KeyValueStore, StorageError};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    #[tokio::test]
    async fn test_put_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let missing: Option<Record> = store.get("record").await.unwrap();
        assert!(missing.is_none());

        let record = Record {
            name: "a".to_string(),
            count: 3,
        };
        store.put("record", &record).await.unwrap();
        let loaded: Option<Record> = store.get("record").await.unwrap();
        assert_eq!(loaded, Some(record));

        store.remove("record").await.unwrap();
        let gone: Option<Record> = store.get("record").await.unwrap();
        assert!(gone.is_none());

        // Removing twice is fine
        store.remove("record").await.unwrap();
    }

    #[tokio::test]
    async fn test_put_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("deeper"));
        store.put("k", &1u8).await.unwrap();
        assert!(store.path_for("k").unwrap().exists());
    }

    #[tokio::test]
    async fn test_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        tokio::fs::write(store.path_for("bad").unwrap(), b"{not json")
            .await
            .unwrap();
        let result: Result<Option<Record>, _> = store.get("bad").await;
        assert!(matches!(result, Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_invalid_keys() {
        let store = JsonFileStore::new("/tmp");
        assert!(store.path_for("").is_err());
        assert!(store.path_for("../escape").is_err());
        assert!(store.path_for("a/b").is_err());
        assert!(store.path_for("attendease_user").is_ok());
    }
}
