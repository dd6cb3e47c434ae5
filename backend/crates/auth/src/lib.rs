//! Auth (Identity) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Role classification, identity entity, session store trait
//! - `application/` - Sign in / register / sign out / restore use cases
//! - `infra/` - File-backed and in-memory session stores
//! - `presentation/` - Form hints projected from the typed identifier
//!
//! ## Identity Model
//! - Roles are derived from the shape of the institutional identifier only
//!   (no lookup): Faculty, Student, or Unknown
//! - Unknown identifiers are rejected before any credential check
//! - The signed-in identity is mirrored to local storage for continuity and
//!   removed on sign-out; there is no server-side account

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::entity::session_identity::SessionIdentity;
pub use domain::repository::SessionStore;
pub use domain::services::classify;
pub use domain::value_object::{identifier::Identifier, role::Role};
pub use error::{AuthError, AuthResult};
pub use infra::{FileSessionStore, InMemorySessionStore};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
