//! Domain Services
//!
//! Pure validation of a scanned token against the current time.

use kernel::TimestampMs;

use crate::domain::codec::TokenCodec;
use crate::domain::entities::{ScanOutcome, TokenPayload};
use crate::domain::value_objects::RejectionReason;

/// Maximum accepted token age
pub const VALIDITY_WINDOW_MS: i64 = 60_000;

/// Result of validating one scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(ScanOutcome),
    Rejected(RejectionReason),
}

impl Verdict {
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationEngine {
    codec: TokenCodec,
    validity_window_ms: i64,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(TokenCodec::default(), VALIDITY_WINDOW_MS)
    }
}

impl ValidationEngine {
    pub const fn new(codec: TokenCodec, validity_window_ms: i64) -> Self {
        Self {
            codec,
            validity_window_ms,
        }
    }

    pub const fn validity_window_ms(&self) -> i64 {
        self.validity_window_ms
    }

    /// Age equal to the window is still accepted. Tokens from the future are
    /// accepted too.
    pub fn validate(&self, payload: &TokenPayload, now_ms: TimestampMs) -> Verdict {
        if payload.age_ms(now_ms) > self.validity_window_ms {
            return Verdict::Rejected(RejectionReason::Expired);
        }
        Verdict::Accepted(ScanOutcome {
            class_id: payload.class_id.clone(),
            scanned_at_ms: now_ms,
        })
    }

    /// Decode then validate
    pub fn validate_raw(&self, raw: &str, now_ms: TimestampMs) -> Verdict {
        match self.codec.decode(raw) {
            Ok(payload) => self.validate(&payload, now_ms),
            Err(_) => Verdict::Rejected(RejectionReason::Malformed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ClassId;

    const NOW: TimestampMs = 1_700_000_100_000;

    fn payload(issued_at_ms: TimestampMs) -> TokenPayload {
        TokenCodec::default().encode(ClassId::parse("CS301").unwrap(), issued_at_ms)
    }

    #[test]
    fn test_fresh_token_accepted() {
        let verdict = ValidationEngine::default().validate(&payload(NOW - 1_000), NOW);
        assert_eq!(
            verdict,
            Verdict::Accepted(ScanOutcome {
                class_id: ClassId::parse("CS301").unwrap(),
                scanned_at_ms: NOW,
            })
        );
    }

    #[test]
    fn test_window_boundary_inclusive() {
        let engine = ValidationEngine::default();
        assert!(engine.validate(&payload(NOW - 60_000), NOW).is_accepted());
        assert_eq!(
            engine.validate(&payload(NOW - 60_001), NOW),
            Verdict::Rejected(RejectionReason::Expired)
        );
    }

    #[test]
    fn test_future_token_accepted() {
        assert!(
            ValidationEngine::default()
                .validate(&payload(NOW + 30_000), NOW)
                .is_accepted()
        );
    }

    #[test]
    fn test_validation_ignores_expires_at() {
        // Past the 15 s display horizon but inside the 60 s window
        let token = payload(NOW - 30_000);
        assert!(token.expires_at_ms < NOW);
        assert!(ValidationEngine::default().validate(&token, NOW).is_accepted());
    }

    #[test]
    fn test_validate_raw() {
        let engine = ValidationEngine::default();
        assert_eq!(
            engine.validate_raw("not json", NOW),
            Verdict::Rejected(RejectionReason::Malformed)
        );
        let stale = format!(r#"{{"classId":"CS301","issuedAt":{}}}"#, NOW - 120_000);
        assert_eq!(
            engine.validate_raw(&stale, NOW),
            Verdict::Rejected(RejectionReason::Expired)
        );
    }

    #[test]
    fn test_custom_window() {
        let engine = ValidationEngine::new(TokenCodec::default(), 15_000);
        assert!(!engine.validate(&payload(NOW - 15_001), NOW).is_accepted());
    }
}
