//! Domain Value Objects
//!
//! Immutable value types for the attendance domain.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AttendanceError, AttendanceResult};

/// Class (course) identifier in canonical form: trimmed, upper-cased,
/// never empty.
///
/// [`ClassId::parse`] is the issuer input path and also enforces
/// [`ClassId::MAX_LEN`]; [`ClassId::from_scanned`] accepts any non-blank id
/// carried by a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassId(String);

impl ClassId {
    /// Course code input limit on the issuer side
    pub const MAX_LEN: usize = 10;

    pub fn parse(raw: &str) -> AttendanceResult<Self> {
        let id = Self::from_scanned(raw)?;
        let len = id.0.chars().count();
        if len > Self::MAX_LEN {
            return Err(AttendanceError::ClassIdTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(id)
    }

    pub fn from_scanned(raw: &str) -> AttendanceResult<Self> {
        let canonical = raw.trim().to_uppercase();
        if canonical.is_empty() {
            return Err(AttendanceError::EmptyClassId);
        }
        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ClassId {
    type Error = AttendanceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_scanned(&value)
    }
}

impl From<ClassId> for String {
    fn from(id: ClassId) -> Self {
        id.0
    }
}

/// Visibility phase of the issuer's token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RevealPhase {
    /// Nothing issued yet
    #[default]
    Idle,
    /// Freshly issued, counting down the display duration
    Visible,
    /// Display duration elapsed; token is masked
    Blurred,
    /// Temporarily unmasked after a reveal
    Revealed,
}

impl RevealPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RevealPhase::Idle => "idle",
            RevealPhase::Visible => "visible",
            RevealPhase::Blurred => "blurred",
            RevealPhase::Revealed => "revealed",
        }
    }

    /// Is the token shown in the clear?
    pub const fn is_shown(&self) -> bool {
        matches!(self, RevealPhase::Visible | RevealPhase::Revealed)
    }
}

impl fmt::Display for RevealPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a scanned token was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectionReason {
    /// Not a token at all
    Malformed,
    /// Older than the validity window
    Expired,
}

impl RejectionReason {
    pub const fn message(&self) -> &'static str {
        match self {
            RejectionReason::Malformed => "Invalid QR code format",
            RejectionReason::Expired => "This QR code has expired",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
