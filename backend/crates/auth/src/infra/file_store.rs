//! File-backed Session Store
//!
//! Mirrors the signed-in identity to a JSON file under a local directory,
//! so a restart keeps the user signed in.

use std::path::PathBuf;

use platform::storage::{JsonFileStore, KeyValueStore};

use crate::domain::entity::session_identity::SessionIdentity;
use crate::domain::repository::SessionStore;
use crate::error::AuthResult;

/// JSON file session store
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    files: JsonFileStore,
    key: String,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            files: JsonFileStore::new(dir),
            key: key.into(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> AuthResult<PathBuf> {
        Ok(self.files.path_for(&self.key)?)
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> AuthResult<Option<SessionIdentity>> {
        Ok(self.files.get(&self.key).await?)
    }

    async fn save(&self, identity: &SessionIdentity) -> AuthResult<()> {
        self.files.put(&self.key, identity).await?;
        Ok(())
    }

    async fn clear(&self) -> AuthResult<()> {
        self.files.remove(&self.key).await?;
        Ok(())
    }
}
