//! Sign Out Use Case
//!
//! Destroys the signed-in identity.

use std::sync::Arc;

use crate::domain::repository::SessionStore;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionStore,
{
    store: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns whether an identity was signed in
    pub async fn execute(&self) -> AuthResult<bool> {
        let previous = match self.store.load().await {
            Ok(identity) => identity,
            Err(e) => {
                // A corrupt record is removed all the same
                tracing::warn!(error = %e, "Could not read identity before sign-out");
                None
            }
        };
        self.store.clear().await?;

        match &previous {
            Some(identity) => {
                tracing::info!(identifier = %identity.identifier, "User signed out");
            }
            None => tracing::debug!("Sign-out with no active identity"),
        }

        Ok(previous.is_some())
    }
}
