//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by the
//! issuer and scanner sides:
//! - Common error kinds and the unified [`error::app_error::AppError`]
//! - The [`error::app_error::AppResult`] alias
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod kind;
}

/// Millisecond Unix timestamp used on both sides of the token boundary.
pub type TimestampMs = i64;
