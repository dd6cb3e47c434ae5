//! Domain Entities
//!
//! Core business entities for the attendance domain.

use kernel::TimestampMs;
use serde::Serialize;

use crate::domain::value_objects::ClassId;

/// Proof-of-presence token payload
///
/// Immutable once created; every (re)generation produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub class_id: ClassId,
    pub issued_at_ms: TimestampMs,
    /// Informational only; acceptance is decided by the validity window
    pub expires_at_ms: TimestampMs,
}

impl TokenPayload {
    pub fn new(class_id: ClassId, issued_at_ms: TimestampMs, expiry_horizon_ms: i64) -> Self {
        Self {
            class_id,
            issued_at_ms,
            expires_at_ms: issued_at_ms.saturating_add(expiry_horizon_ms),
        }
    }

    /// Milliseconds since issuance; negative when issued in the future
    pub fn age_ms(&self, now_ms: TimestampMs) -> i64 {
        now_ms.saturating_sub(self.issued_at_ms)
    }
}

/// A payload together with its encoded wire text, as handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub payload: TokenPayload,
    pub wire: String,
}

/// Successful scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    pub class_id: ClassId,
    pub scanned_at_ms: TimestampMs,
}
