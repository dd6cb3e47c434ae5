//! In-memory Session Store
//!
//! Non-persistent store for tests and single-run sessions.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::entity::session_identity::SessionIdentity;
use crate::domain::repository::SessionStore;
use crate::error::AuthResult;

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    slot: Arc<Mutex<Option<SessionIdentity>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store, bypassing authentication
    pub fn with_identity(identity: SessionIdentity) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(identity))),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> AuthResult<Option<SessionIdentity>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, identity: &SessionIdentity) -> AuthResult<()> {
        *self.slot.lock().await = Some(identity.clone());
        Ok(())
    }

    async fn clear(&self) -> AuthResult<()> {
        self.slot.lock().await.take();
        Ok(())
    }
}
