//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::credential::CredentialPolicyError;
use platform::storage::StorageError;
use thiserror::Error;

use crate::domain::value_object::role::Role;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Identifier matches neither the faculty nor the student shape
    #[error("Invalid email format. Use faculty@iiitp.ac.in or 123456789@cse.iiitp.ac.in")]
    ClassificationUnknown,

    /// Secondary credential shorter than the policy minimum
    #[error("Password must be at least {min} characters")]
    CredentialTooShort { min: usize, actual: usize },

    /// No identity is signed in on this device
    #[error("Not signed in")]
    NotSignedIn,

    /// Signed-in identity does not hold the role the action requires
    #[error("This action requires a {required} account (signed in as {actual})")]
    RoleNotPermitted { required: Role, actual: Role },

    /// Local session storage failure
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::ClassificationUnknown | AuthError::NotSignedIn => ErrorKind::Unauthorized,
            AuthError::CredentialTooShort { .. } => ErrorKind::InvalidInput,
            AuthError::RoleNotPermitted { .. } => ErrorKind::Forbidden,
            AuthError::Storage(_) | AuthError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError, attaching the user-facing next step
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::ClassificationUnknown => err.with_action(Role::accepted_identifier_shapes()),
            AuthError::NotSignedIn => err.with_action("Sign in first"),
            AuthError::RoleNotPermitted { .. } => err.with_action("Sign in with a different account"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Auth storage error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::ClassificationUnknown => {
                tracing::warn!("Sign-in attempt with unclassifiable identifier");
            }
            AuthError::RoleNotPermitted { required, actual } => {
                tracing::warn!(%required, %actual, "Action blocked by role");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl AuthError {
    /// Like [`to_app_error`](Self::to_app_error), keeping the storage failure
    /// as the source. Does not log.
    pub fn into_app_error(self) -> AppError {
        let app = self.to_app_error();
        match self {
            AuthError::Storage(source) => app.with_source(source),
            _ => app,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.log();
        err.into_app_error()
    }
}

impl From<CredentialPolicyError> for AuthError {
    fn from(err: CredentialPolicyError) -> Self {
        match err {
            CredentialPolicyError::TooShort { min, actual } => {
                AuthError::CredentialTooShort { min, actual }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AuthError::ClassificationUnknown.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            AuthError::CredentialTooShort { min: 6, actual: 1 }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            AuthError::RoleNotPermitted {
                required: Role::Faculty,
                actual: Role::Student
            }
            .kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(AuthError::Internal("x".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_classification_message_names_both_shapes() {
        let message = AuthError::ClassificationUnknown.to_string();
        assert!(message.contains("faculty@iiitp.ac.in"));
        assert!(message.contains("123456789@cse.iiitp.ac.in"));

        let app = AuthError::ClassificationUnknown.to_app_error();
        assert_eq!(app.action(), Some(Role::accepted_identifier_shapes()));
    }

    #[test]
    fn test_storage_failure_keeps_source() {
        use std::error::Error;

        let err = AuthError::Storage(StorageError::InvalidKey("../x".to_string()));
        let app: AppError = err.into();
        assert_eq!(app.kind(), ErrorKind::Internal);
        assert!(app.source().is_some());

        let app: AppError = AuthError::NotSignedIn.into();
        assert!(app.source().is_none());
        assert_eq!(app.action(), Some("Sign in first"));
    }

    #[test]
    fn test_credential_policy_conversion() {
        let err: AuthError = CredentialPolicyError::TooShort { min: 6, actual: 3 }.into();
        assert!(matches!(
            err,
            AuthError::CredentialTooShort { min: 6, actual: 3 }
        ));
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn test_role_not_permitted_message() {
        let err = AuthError::RoleNotPermitted {
            required: Role::Faculty,
            actual: Role::Student,
        };
        assert_eq!(
            err.to_string(),
            "This action requires a faculty account (signed in as student)"
        );
    }
}
