//! Session Identity Entity
//!
//! Who is signed in on this device. Created at authentication, mirrored to
//! local storage for continuity, destroyed on sign-out.

use kernel::TimestampMs;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{identifier::Identifier, role::Role};
use crate::error::{AuthError, AuthResult};

/// Signed-in identity
///
/// Stored as `{"email": "...", "role": "faculty", "signedInAtMs": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    #[serde(rename = "email")]
    pub identifier: Identifier,
    pub role: Role,
    #[serde(default)]
    pub signed_in_at_ms: TimestampMs,
}

impl SessionIdentity {
    /// Create an identity for an identifier that classifies to a known role
    pub fn authenticate(identifier: Identifier, now_ms: TimestampMs) -> AuthResult<Self> {
        let role = identifier.role();
        if !role.is_known() {
            return Err(AuthError::ClassificationUnknown);
        }
        Ok(Self {
            identifier,
            role,
            signed_in_at_ms: now_ms,
        })
    }

    /// A stored identity is only trusted if its identifier still classifies
    /// to the stored role.
    pub fn is_consistent(&self) -> bool {
        self.role.is_known() && self.identifier.role() == self.role
    }

    /// Fail unless this identity holds `required`
    pub fn require_role(&self, required: Role) -> AuthResult<()> {
        if self.role == required {
            Ok(())
        } else {
            Err(AuthError::RoleNotPermitted {
                required,
                actual: self.role,
            })
        }
    }
}
