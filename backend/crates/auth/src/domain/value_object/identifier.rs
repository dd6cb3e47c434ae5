//! Identifier Value Object
//!
//! The institutional e-mail address a user signs in with. Normalized to its
//! trimmed, lower-case form; the shape is judged by the role classifier, not
//! here.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::domain::services::classify_normalized;
use crate::domain::value_object::role::Role;

/// Normalized institutional identifier
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display("{_0}")]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    /// Role this identifier classifies to
    pub fn role(&self) -> Role {
        classify_normalized(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part before `@` (the roll number for students)
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// Part after `@`
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or("")
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
