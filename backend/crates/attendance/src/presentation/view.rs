//! View Projections
//!
//! Renderer-facing DTOs derived from timeline state. Nothing here mutates.

use platform::clock::format_local;
use serde::Serialize;

use crate::application::issuance::IssuerSnapshot;
use crate::application::scan_flow::ScanState;
use crate::domain::value_objects::RevealPhase;

/// Countdown values at or below this are highlighted
pub const URGENT_THRESHOLD: u32 = 5;

const BLURRED_HINT: &str = "QR code is blurred for security. Click reveal to show temporarily.";

/// Issuer screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerView {
    pub phase: RevealPhase,
    pub class_id: Option<String>,
    /// Display countdown, or the reveal countdown while revealed
    pub countdown: u32,
    /// 0..=100
    pub progress_percent: u8,
    pub urgent: bool,
    /// Renderer must mask the payload
    pub blurred: bool,
    pub can_reveal: bool,
    pub reveals_left: Option<u32>,
    /// Encoded token text, present once anything has been issued
    pub payload: Option<String>,
    pub issued_at: Option<String>,
    pub hint: Option<&'static str>,
}

impl From<&IssuerSnapshot> for IssuerView {
    fn from(snapshot: &IssuerSnapshot) -> Self {
        let progress_percent = if snapshot.total == 0 {
            0
        } else {
            (snapshot.remaining.min(snapshot.total) * 100 / snapshot.total) as u8
        };
        let blurred = snapshot.phase == RevealPhase::Blurred;

        Self {
            phase: snapshot.phase,
            class_id: snapshot
                .token
                .as_ref()
                .map(|t| t.payload.class_id.to_string()),
            countdown: snapshot.remaining,
            progress_percent,
            urgent: snapshot.phase.is_shown() && snapshot.remaining <= URGENT_THRESHOLD,
            blurred,
            can_reveal: snapshot.can_reveal(),
            reveals_left: snapshot
                .max_reveals
                .map(|max| max.saturating_sub(snapshot.reveals_used)),
            payload: snapshot.token.as_ref().map(|t| t.wire.clone()),
            issued_at: snapshot
                .token
                .as_ref()
                .map(|t| format_local(t.payload.issued_at_ms)),
            hint: blurred.then_some(BLURRED_HINT),
        }
    }
}

/// Scanner screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanView {
    pub state: &'static str,
    pub title: &'static str,
    pub message: String,
    pub capture_active: bool,
    pub class_id: Option<String>,
    pub scanned_at: Option<String>,
    /// Label of the one action the user can take next
    pub action: &'static str,
}

impl From<&ScanState> for ScanView {
    fn from(state: &ScanState) -> Self {
        let base = |title, message: &str, action| Self {
            state: state.name(),
            title,
            message: message.to_string(),
            capture_active: false,
            class_id: None,
            scanned_at: None,
            action,
        };

        match state {
            ScanState::AwaitingIdentityCheck => base(
                "Identity Verification",
                "Verify your identity before scanning",
                "Verify",
            ),
            ScanState::IdentityChecking => base("Verifying...", "Scanning fingerprint...", "Cancel"),
            ScanState::Capturing { capture_active } => Self {
                capture_active: *capture_active,
                ..base(
                    "Scan QR Code",
                    "Point your camera at the QR code displayed by faculty",
                    "Back to Verification",
                )
            },
            ScanState::Accepted(outcome) => Self {
                class_id: Some(outcome.class_id.to_string()),
                scanned_at: Some(format_local(outcome.scanned_at_ms)),
                ..base(
                    "Attendance Marked!",
                    &format!("Successfully marked for {}", outcome.class_id),
                    "Scan Another",
                )
            },
            ScanState::Rejected { reason } => base("Scan Failed", reason.message(), "Try Again"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AttendanceConfig;
    use crate::application::issuance::IssuanceTimer;
    use crate::domain::entities::ScanOutcome;
    use crate::domain::value_objects::{ClassId, RejectionReason};

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_idle_issuer_view() {
        let view = IssuerView::from(&IssuerSnapshot::default());
        assert_eq!(view.phase, RevealPhase::Idle);
        assert_eq!(view.progress_percent, 0);
        assert!(view.payload.is_none());
        assert!(!view.can_reveal);
    }

    #[test]
    fn test_issuer_view_countdown() {
        let mut timer = IssuanceTimer::new(&AttendanceConfig::default());
        timer.generate("CS301", NOW).unwrap();

        let view = IssuerView::from(&timer.snapshot());
        assert_eq!(view.countdown, 15);
        assert_eq!(view.progress_percent, 100);
        assert!(!view.urgent);
        assert!(!view.blurred);
        assert_eq!(view.class_id.as_deref(), Some("CS301"));
        assert_eq!(view.payload.as_deref(), Some(timer.token().unwrap().wire.as_str()));

        for _ in 0..10 {
            timer.tick();
        }
        let view = IssuerView::from(&timer.snapshot());
        assert_eq!(view.countdown, 5);
        assert!(view.urgent);
    }

    #[test]
    fn test_issuer_view_blurred_and_revealed() {
        let mut timer = IssuanceTimer::new(&AttendanceConfig::default());
        timer.generate("CS301", NOW).unwrap();
        for _ in 0..15 {
            timer.tick();
        }

        let view = IssuerView::from(&timer.snapshot());
        assert!(view.blurred);
        assert!(view.can_reveal);
        assert!(view.hint.is_some());
        assert!(view.payload.is_some());

        timer.reveal().unwrap();
        timer.tick();
        let view = IssuerView::from(&timer.snapshot());
        assert_eq!(view.phase, RevealPhase::Revealed);
        // Shows the reveal countdown, not the display countdown
        assert_eq!(view.countdown, 4);
        assert_eq!(view.progress_percent, 80);
        assert!(!view.blurred);
        assert!(!view.can_reveal);
    }

    #[test]
    fn test_reveals_left() {
        let mut timer = IssuanceTimer::new(&AttendanceConfig {
            max_reveals: Some(2),
            ..Default::default()
        });
        timer.generate("CS301", NOW).unwrap();
        assert_eq!(IssuerView::from(&timer.snapshot()).reveals_left, Some(2));
    }

    #[test]
    fn test_scan_views() {
        let view = ScanView::from(&ScanState::AwaitingIdentityCheck);
        assert_eq!(view.title, "Identity Verification");

        let view = ScanView::from(&ScanState::Capturing {
            capture_active: true,
        });
        assert!(view.capture_active);
        assert_eq!(view.action, "Back to Verification");

        let view = ScanView::from(&ScanState::Accepted(ScanOutcome {
            class_id: ClassId::parse("CS301").unwrap(),
            scanned_at_ms: NOW,
        }));
        assert_eq!(view.title, "Attendance Marked!");
        assert_eq!(view.message, "Successfully marked for CS301");
        assert_eq!(view.class_id.as_deref(), Some("CS301"));
        assert!(view.scanned_at.is_some());

        let view = ScanView::from(&ScanState::Rejected {
            reason: RejectionReason::Expired,
        });
        assert_eq!(view.message, "This QR code has expired");
        assert_eq!(view.action, "Try Again");
    }

    #[test]
    fn test_scan_view_serializes_camel_case() {
        let json = serde_json::to_value(ScanView::from(&ScanState::Capturing {
            capture_active: false,
        }))
        .unwrap();
        assert_eq!(json["captureActive"], false);
        assert_eq!(json["state"], "capturing");
    }
}
