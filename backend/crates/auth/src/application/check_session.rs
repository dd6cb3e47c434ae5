//! Check Session Use Case
//!
//! Restores the mirrored identity at startup and gates role-specific actions.

use std::sync::Arc;

use platform::storage::StorageError;

use crate::domain::entity::session_identity::SessionIdentity;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::role::Role;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionStore,
{
    store: Arc<S>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Load the stored identity.
    ///
    /// Corrupt records and identities whose identifier no longer classifies
    /// to the stored role are discarded and reported as signed out.
    pub async fn execute(&self) -> AuthResult<Option<SessionIdentity>> {
        let identity = match self.store.load().await {
            Ok(identity) => identity,
            Err(AuthError::Storage(StorageError::Corrupt(e))) => {
                tracing::warn!(error = %e, "Discarding corrupt stored identity");
                self.store.clear().await?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let Some(identity) = identity else {
            return Ok(None);
        };

        if !identity.is_consistent() {
            tracing::warn!(
                identifier = %identity.identifier,
                role = %identity.role,
                "Discarding stored identity with mismatched role"
            );
            self.store.clear().await?;
            return Ok(None);
        }

        tracing::debug!(identifier = %identity.identifier, "Restored identity");
        Ok(Some(identity))
    }

    /// Is anyone signed in?
    pub async fn is_authenticated(&self) -> bool {
        matches!(self.execute().await, Ok(Some(_)))
    }

    /// Load the identity and require the given role
    pub async fn require(&self, role: Role) -> AuthResult<SessionIdentity> {
        let identity = self.execute().await?.ok_or(AuthError::NotSignedIn)?;
        identity.require_role(role)?;
        Ok(identity)
    }
}
