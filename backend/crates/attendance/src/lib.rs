//! Attendance (Proof-of-Presence) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Token payload, codec, validation engine
//! - `application/` - Issuer and scanner state machines and their tokio drivers
//! - `presentation/` - View projections for renderers
//!
//! ## Token Model
//! - The issuer encodes `{classId, issuedAt, expiresAt}` and shows it for a
//!   short display window, after which it is masked until revealed again
//! - The scanner accepts any well-formed token no older than the validity
//!   window (60 s by default), measured from `issuedAt`
//! - `expiresAt` is informational; the two sides share nothing but the
//!   encoded text
//! - The token is unsigned: it proves only that the scanner saw the code
//!   recently

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    AttendanceConfig, IssuanceTimer, IssuerSession, IssuerSnapshot, ScanEvent, ScanSession,
    ScanState,
};
pub use domain::{
    ClassId, DecodeError, IssuedToken, RejectionReason, RevealPhase, ScanOutcome, TokenCodec,
    TokenPayload, ValidationEngine, Verdict,
};
pub use error::{AttendanceError, AttendanceResult};
pub use presentation::{IssuerView, ScanView};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
