//! Scan Flow
//!
//! Scanner-side state machine as a pure `(state, event) -> state` function:
//!
//! ```text
//! AwaitingIdentityCheck -> IdentityChecking -> Capturing -> Accepted | Rejected
//! ```
//!
//! Events that are not legal in the current state are dropped, never queued.
//! `Reset` is legal everywhere.

use kernel::TimestampMs;

use crate::domain::entities::ScanOutcome;
use crate::domain::services::{ValidationEngine, Verdict};
use crate::domain::value_objects::RejectionReason;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    AwaitingIdentityCheck,
    IdentityChecking,
    Capturing {
        capture_active: bool,
    },
    Accepted(ScanOutcome),
    Rejected {
        reason: RejectionReason,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    BeginIdentityCheck,
    IdentityConfirmed,
    StartCapture,
    StopCapture,
    /// Raw text decoded by the capture device
    Captured { raw: String, now_ms: TimestampMs },
    /// Capture device reported a problem
    CaptureFailed { message: String },
    Reset,
}

impl ScanEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            ScanEvent::BeginIdentityCheck => "begin_identity_check",
            ScanEvent::IdentityConfirmed => "identity_confirmed",
            ScanEvent::StartCapture => "start_capture",
            ScanEvent::StopCapture => "stop_capture",
            ScanEvent::Captured { .. } => "captured",
            ScanEvent::CaptureFailed { .. } => "capture_failed",
            ScanEvent::Reset => "reset",
        }
    }
}

impl ScanState {
    pub fn apply(self, event: ScanEvent, engine: &ValidationEngine) -> Self {
        match (self, event) {
            (_, ScanEvent::Reset) => ScanState::AwaitingIdentityCheck,

            (ScanState::AwaitingIdentityCheck, ScanEvent::BeginIdentityCheck) => {
                ScanState::IdentityChecking
            }

            // Capture starts as soon as the identity is confirmed
            (ScanState::IdentityChecking, ScanEvent::IdentityConfirmed) => ScanState::Capturing {
                capture_active: true,
            },

            (ScanState::Capturing { .. }, ScanEvent::StartCapture) => ScanState::Capturing {
                capture_active: true,
            },
            (ScanState::Capturing { .. }, ScanEvent::StopCapture) => ScanState::Capturing {
                capture_active: false,
            },

            (ScanState::Capturing { capture_active: true }, ScanEvent::Captured { raw, now_ms }) => {
                match engine.validate_raw(&raw, now_ms) {
                    Verdict::Accepted(outcome) => {
                        tracing::info!(
                            class_id = %outcome.class_id,
                            scanned_at = outcome.scanned_at_ms,
                            "Attendance marked"
                        );
                        ScanState::Accepted(outcome)
                    }
                    Verdict::Rejected(reason) => {
                        tracing::warn!(reason = ?reason, "Scan rejected");
                        ScanState::Rejected { reason }
                    }
                }
            }

            (state, ScanEvent::CaptureFailed { message }) => {
                tracing::warn!(error = %message, "Capture device error");
                state
            }

            (state, event) => {
                tracing::debug!(
                    state = state.name(),
                    event = event.name(),
                    "Discarded scan event"
                );
                state
            }
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            ScanState::AwaitingIdentityCheck => "awaiting_identity_check",
            ScanState::IdentityChecking => "identity_checking",
            ScanState::Capturing { .. } => "capturing",
            ScanState::Accepted(_) => "accepted",
            ScanState::Rejected { .. } => "rejected",
        }
    }

    /// A verdict has been reached; only `Reset` leaves this state
    pub const fn is_terminal(&self) -> bool {
        matches!(self, ScanState::Accepted(_) | ScanState::Rejected { .. })
    }

    pub const fn is_capturing(&self) -> bool {
        matches!(
            self,
            ScanState::Capturing {
                capture_active: true
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ClassId;

    const NOW: TimestampMs = 1_700_000_100_000;

    fn engine() -> ValidationEngine {
        ValidationEngine::default()
    }

    fn capturing() -> ScanState {
        ScanState::default()
            .apply(ScanEvent::BeginIdentityCheck, &engine())
            .apply(ScanEvent::IdentityConfirmed, &engine())
    }

    fn captured(raw: &str) -> ScanEvent {
        ScanEvent::Captured {
            raw: raw.to_string(),
            now_ms: NOW,
        }
    }

    #[test]
    fn test_identity_check_leads_to_active_capture() {
        let state = ScanState::default().apply(ScanEvent::BeginIdentityCheck, &engine());
        assert_eq!(state, ScanState::IdentityChecking);
        let state = state.apply(ScanEvent::IdentityConfirmed, &engine());
        assert!(state.is_capturing());
    }

    #[test]
    fn test_accepts_fresh_token() {
        let raw = format!(r#"{{"classId":"CS301","issuedAt":{}}}"#, NOW - 1_000);
        let state = capturing().apply(captured(&raw), &engine());
        assert_eq!(
            state,
            ScanState::Accepted(ScanOutcome {
                class_id: ClassId::parse("CS301").unwrap(),
                scanned_at_ms: NOW,
            })
        );
        assert!(state.is_terminal());
    }

    #[test]
    fn test_rejects_garbage() {
        let state = capturing().apply(captured("not json"), &engine());
        assert_eq!(
            state,
            ScanState::Rejected {
                reason: RejectionReason::Malformed
            }
        );
    }

    #[test]
    fn test_capture_ignored_when_paused() {
        let state = capturing().apply(ScanEvent::StopCapture, &engine());
        assert_eq!(state, ScanState::Capturing { capture_active: false });
        let state = state.apply(captured("not json"), &engine());
        assert_eq!(state, ScanState::Capturing { capture_active: false });
        let state = state.apply(ScanEvent::StartCapture, &engine());
        assert!(state.is_capturing());
    }

    #[test]
    fn test_capture_ignored_before_identity_check() {
        let state = ScanState::default().apply(captured("not json"), &engine());
        assert_eq!(state, ScanState::AwaitingIdentityCheck);
        let state = ScanState::IdentityChecking.apply(captured("not json"), &engine());
        assert_eq!(state, ScanState::IdentityChecking);
    }

    #[test]
    fn test_only_one_verdict_per_session() {
        let raw = format!(r#"{{"classId":"CS301","issuedAt":{}}}"#, NOW);
        let state = capturing()
            .apply(captured(&raw), &engine())
            .apply(captured("not json"), &engine());
        assert!(matches!(state, ScanState::Accepted(_)));
    }

    #[test]
    fn test_capture_failure_keeps_state() {
        let state = capturing().apply(
            ScanEvent::CaptureFailed {
                message: "camera busy".to_string(),
            },
            &engine(),
        );
        assert!(state.is_capturing());
    }

    #[test]
    fn test_identity_confirmation_outside_check_is_dropped() {
        let state = ScanState::default().apply(ScanEvent::IdentityConfirmed, &engine());
        assert_eq!(state, ScanState::AwaitingIdentityCheck);
        let state = capturing().apply(ScanEvent::BeginIdentityCheck, &engine());
        assert!(state.is_capturing());
    }

    #[test]
    fn test_reset_from_every_state() {
        let states = [
            ScanState::AwaitingIdentityCheck,
            ScanState::IdentityChecking,
            ScanState::Capturing {
                capture_active: true,
            },
            ScanState::Capturing {
                capture_active: false,
            },
            ScanState::Rejected {
                reason: RejectionReason::Expired,
            },
            ScanState::Accepted(ScanOutcome {
                class_id: ClassId::parse("CS301").unwrap(),
                scanned_at_ms: NOW,
            }),
        ];
        for state in states {
            assert_eq!(
                state.apply(ScanEvent::Reset, &engine()),
                ScanState::AwaitingIdentityCheck
            );
        }
    }
}
