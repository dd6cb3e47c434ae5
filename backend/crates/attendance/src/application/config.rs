//! Application Configuration
//!
//! Configuration for the attendance application layer.
//!
//! The display horizon (15 s) and the validity window (60 s) are independent:
//! a code that has blurred on the issuer's screen still validates for the rest
//! of the window.

use std::time::Duration;

use crate::domain::codec::TokenCodec;
use crate::domain::services::ValidationEngine;

/// Attendance application configuration
#[derive(Debug, Clone)]
pub struct AttendanceConfig {
    /// Recorded in `expiresAt`; informational
    pub expiry_horizon: Duration,
    /// Maximum accepted token age at scan time
    pub validity_window: Duration,
    /// Length of one countdown unit
    pub tick_interval: Duration,
    /// Units a fresh code stays visible
    pub display_units: u32,
    /// Units a reveal keeps the code visible
    pub reveal_units: u32,
    /// Reveals allowed per generation; `None` is unlimited
    pub max_reveals: Option<u32>,
    /// Simulated identity check before capture starts
    pub identity_check_delay: Duration,
    /// Bounded command queue per driver task
    pub command_buffer: usize,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            expiry_horizon: Duration::from_secs(15),
            validity_window: Duration::from_secs(60),
            tick_interval: Duration::from_secs(1),
            display_units: 15,
            reveal_units: 5,
            max_reveals: None,
            identity_check_delay: Duration::from_millis(1500),
            command_buffer: 32,
        }
    }
}

/// Whole milliseconds, clamped to `i64::MAX`
fn saturating_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

impl AttendanceConfig {
    /// Create config for development (no identity check delay)
    pub fn development() -> Self {
        Self {
            identity_check_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    pub fn expiry_horizon_ms(&self) -> i64 {
        saturating_ms(self.expiry_horizon)
    }

    pub fn validity_window_ms(&self) -> i64 {
        saturating_ms(self.validity_window)
    }

    pub fn identity_check_delay_ms(&self) -> i64 {
        saturating_ms(self.identity_check_delay)
    }

    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(self.expiry_horizon_ms())
    }

    pub fn validation_engine(&self) -> ValidationEngine {
        ValidationEngine::new(self.codec(), self.validity_window_ms())
    }
}
