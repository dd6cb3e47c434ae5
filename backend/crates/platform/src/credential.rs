//! Secondary Credential Handling
//!
//! The secondary credential (the password typed next to the institutional
//! identifier) is only checked against a length policy; it is never stored.
//! It is still treated as a secret while it lives in memory:
//! - Unicode NFKC normalization before counting
//! - Zeroization on drop
//! - Redacted `Debug`

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum credential length in Unicode code points
pub const MIN_CREDENTIAL_LENGTH: usize = 6;

/// Credential policy violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize, actual: usize },
}

/// Clear text credential with automatic memory zeroization
///
/// Does not implement `Clone` to prevent accidental copies.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextCredential(String);

impl ClearTextCredential {
    /// Validate against the default minimum length
    pub fn new(raw: String) -> Result<Self, CredentialPolicyError> {
        Self::with_min_length(raw, MIN_CREDENTIAL_LENGTH)
    }

    /// Validate against an explicit minimum length
    pub fn with_min_length(mut raw: String, min: usize) -> Result<Self, CredentialPolicyError> {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();

        // Count code points, not bytes
        let actual = normalized.chars().count();
        if actual < min {
            let mut normalized = normalized;
            normalized.zeroize();
            return Err(CredentialPolicyError::TooShort { min, actual });
        }

        Ok(Self(normalized))
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for ClearTextCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextCredential")
            .field(&"[REDACTED]")
            .finish()
    }
}
