//! Domain Layer - Token and verdict logic
//!
//! This layer contains:
//! - Domain entities (TokenPayload, IssuedToken, ScanOutcome)
//! - Domain value objects (ClassId, RevealPhase, RejectionReason)
//! - Token codec (wire format)
//! - Domain services (validation of a decoded token against the clock)

pub mod codec;
pub mod entities;
pub mod services;
pub mod value_objects;

pub use codec::{DecodeError, TokenCodec};
pub use entities::{IssuedToken, ScanOutcome, TokenPayload};
pub use services::{ValidationEngine, Verdict};
pub use value_objects::{ClassId, RejectionReason, RevealPhase};
