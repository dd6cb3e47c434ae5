//! Attendance Error Types
//!
//! This module provides attendance-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Scan rejections are not errors: they are verdicts carried by the scan
//! state. These variants cover refused commands.

use auth::AuthError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_objects::RevealPhase;

/// Attendance-specific result type alias
pub type AttendanceResult<T> = Result<T, AttendanceError>;

/// Attendance-specific error variants
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Generation requested without a class id
    #[error("Please enter a course code")]
    EmptyClassId,

    /// Class id longer than the input field allows
    #[error("Course code must be at most {max} characters (got {actual})")]
    ClassIdTooLong { max: usize, actual: usize },

    /// Reveal requested while the token is not blurred
    #[error("Nothing to reveal while the code is {phase}")]
    RevealNotAvailable { phase: RevealPhase },

    /// Configured reveal cap reached for the current token
    #[error("Reveal limit of {max} reached; regenerate the code")]
    RevealLimitReached { max: u32 },

    /// Identity missing or holding the wrong role
    #[error(transparent)]
    Identity(#[from] AuthError),

    /// Driver task is gone
    #[error("Session is closed")]
    SessionClosed,

    /// Wire encoding failure
    #[error("Token encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AttendanceError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AttendanceError::EmptyClassId | AttendanceError::ClassIdTooLong { .. } => {
                ErrorKind::InvalidInput
            }
            AttendanceError::RevealNotAvailable { .. }
            | AttendanceError::RevealLimitReached { .. } => ErrorKind::Conflict,
            AttendanceError::Identity(e) => e.kind(),
            AttendanceError::SessionClosed => ErrorKind::Unavailable,
            AttendanceError::Encode(_) | AttendanceError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AttendanceError::Encode(e) => {
                tracing::error!(error = %e, "Attendance encoding error");
            }
            AttendanceError::Internal(msg) => {
                tracing::error!(message = %msg, "Attendance internal error");
            }
            AttendanceError::SessionClosed => {
                tracing::warn!("Attendance session closed");
            }
            AttendanceError::Identity(e) => e.log(),
            _ => {
                tracing::debug!(error = %self, "Attendance error");
            }
        }
    }
}

impl From<AttendanceError> for AppError {
    fn from(err: AttendanceError) -> Self {
        err.log();
        match err {
            AttendanceError::Identity(e) => e.into_app_error(),
            AttendanceError::Encode(source) => {
                AppError::new(ErrorKind::Internal, "Token encoding failed").with_source(source)
            }
            AttendanceError::RevealLimitReached { .. } => {
                AppError::new(err.kind(), err.to_string()).with_action("Generate a new code")
            }
            _ => AppError::new(err.kind(), err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::Role;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AttendanceError::EmptyClassId.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            AttendanceError::RevealLimitReached { max: 2 }.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            AttendanceError::RevealNotAvailable {
                phase: RevealPhase::Visible
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(AttendanceError::SessionClosed.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn test_identity_error_keeps_auth_kind() {
        let err: AttendanceError = AuthError::RoleNotPermitted {
            required: Role::Faculty,
            actual: Role::Student,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let app: AppError = err.into();
        assert_eq!(app.kind(), ErrorKind::Forbidden);
        assert!(app.action().is_some());
    }

    #[test]
    fn test_encode_failure_keeps_source() {
        use std::error::Error;

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app: AppError = AttendanceError::Encode(json_err).into();
        assert_eq!(app.kind(), ErrorKind::Internal);
        assert_eq!(app.message(), "Token encoding failed");
        assert!(app.source().is_some());
    }

    #[test]
    fn test_empty_class_id_message() {
        let app: AppError = AttendanceError::EmptyClassId.into();
        assert_eq!(app.message(), "Please enter a course code");
    }
}
