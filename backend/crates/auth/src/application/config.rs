//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::credential::MIN_CREDENTIAL_LENGTH;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Storage key of the mirrored identity
    pub storage_key: String,
    /// Minimum secondary credential length
    pub min_credential_length: usize,
    /// Simulated authentication round-trip
    pub auth_delay: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            storage_key: "attendease_user".to_string(),
            min_credential_length: MIN_CREDENTIAL_LENGTH,
            auth_delay: Duration::from_millis(500),
        }
    }
}

impl AuthConfig {
    /// Config without the simulated delay (tests, scripted runs)
    pub fn without_delay() -> Self {
        Self {
            auth_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    pub fn auth_delay_ms(&self) -> i64 {
        i64::try_from(self.auth_delay.as_millis()).unwrap_or(i64::MAX)
    }
}
