//! Sign-in Form Hint
//!
//! What the form shows under the identifier field while the user types.

use serde::Serialize;

use crate::domain::services::classify;
use crate::domain::value_object::role::Role;

/// Hint shown beneath the identifier input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "role", rename_all = "camelCase")]
pub enum RoleHint {
    /// Identifier classifies to a known role
    Detected(Role),
    /// Non-empty identifier that matches neither shape
    Unrecognized,
}

impl RoleHint {
    /// `None` while the field is empty
    pub fn for_input(identifier: &str) -> Option<Self> {
        if identifier.is_empty() {
            return None;
        }
        Some(match classify(identifier) {
            Role::Unknown => RoleHint::Unrecognized,
            role => RoleHint::Detected(role),
        })
    }

    pub fn message(&self) -> String {
        match self {
            RoleHint::Detected(role) => format!("{role} account detected"),
            RoleHint::Unrecognized => Role::accepted_identifier_shapes().to_string(),
        }
    }

    /// The submit button is disabled unless a role is detected
    pub const fn can_submit(&self) -> bool {
        matches!(self, RoleHint::Detected(_))
    }
}
