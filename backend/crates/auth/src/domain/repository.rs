//! Repository Traits
//!
//! Interface for identity persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::session_identity::SessionIdentity;
use crate::error::AuthResult;

/// Session store trait
///
/// Opaque local persistence for the signed-in identity. Called at startup
/// (`load`), after successful authentication (`save`), and on sign-out
/// (`clear`).
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Load the stored identity, if any
    async fn load(&self) -> AuthResult<Option<SessionIdentity>>;

    /// Replace the stored identity
    async fn save(&self, identity: &SessionIdentity) -> AuthResult<()>;

    /// Remove the stored identity
    async fn clear(&self) -> AuthResult<()>;
}
