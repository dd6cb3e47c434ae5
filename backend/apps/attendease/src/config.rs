//! Environment Configuration
//!
//! `.env` is loaded by `main` before this runs. Recognized variables:
//! - `ATTENDEASE_SESSION_PATH` - directory holding the signed-in identity
//!   (default `$HOME/.attendease`)
//! - `ATTENDEASE_VALIDITY_WINDOW_MS` - maximum accepted token age
//! - `ATTENDEASE_MAX_REVEALS` - reveals allowed per generated code

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use attendance::AttendanceConfig;
use auth::AuthConfig;

pub const SESSION_PATH_VAR: &str = "ATTENDEASE_SESSION_PATH";
pub const VALIDITY_WINDOW_VAR: &str = "ATTENDEASE_VALIDITY_WINDOW_MS";
pub const MAX_REVEALS_VAR: &str = "ATTENDEASE_MAX_REVEALS";

const DEFAULT_SESSION_DIR: &str = ".attendease";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub session_dir: PathBuf,
    pub auth: AuthConfig,
    pub attendance: AttendanceConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let session_dir = match lookup(SESSION_PATH_VAR) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => lookup("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DEFAULT_SESSION_DIR),
        };

        let mut attendance = AttendanceConfig::default();

        if let Some(raw) = lookup(VALIDITY_WINDOW_VAR) {
            let ms: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{VALIDITY_WINDOW_VAR} must be a whole number of milliseconds"))?;
            attendance.validity_window = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup(MAX_REVEALS_VAR) {
            let max: u32 = raw
                .trim()
                .parse()
                .with_context(|| format!("{MAX_REVEALS_VAR} must be a non-negative integer"))?;
            attendance.max_reveals = Some(max);
        }

        Ok(Self {
            session_dir,
            auth: AuthConfig::default(),
            attendance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("HOME", "/home/prof")]).unwrap();
        assert_eq!(config.session_dir, PathBuf::from("/home/prof/.attendease"));
        assert_eq!(config.attendance.validity_window_ms(), 60_000);
        assert_eq!(config.attendance.max_reveals, None);
        assert_eq!(config.auth.storage_key, "attendease_user");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            (SESSION_PATH_VAR, "/tmp/ae"),
            (VALIDITY_WINDOW_VAR, "30000"),
            (MAX_REVEALS_VAR, "3"),
        ])
        .unwrap();
        assert_eq!(config.session_dir, PathBuf::from("/tmp/ae"));
        assert_eq!(config.attendance.validity_window_ms(), 30_000);
        assert_eq!(config.attendance.max_reveals, Some(3));
    }

    #[test]
    fn test_oversized_window_saturates() {
        let config = config(&[(VALIDITY_WINDOW_VAR, "18446744073709551615")]).unwrap();
        assert_eq!(config.attendance.validity_window_ms(), i64::MAX);
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(config(&[(VALIDITY_WINDOW_VAR, "soon")]).is_err());
        assert!(config(&[(MAX_REVEALS_VAR, "-1")]).is_err());
    }
}
