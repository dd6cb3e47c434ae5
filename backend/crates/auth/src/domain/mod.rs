//! Domain Layer
//!
//! Contains entities, value objects, the role classifier, and the session
//! store trait.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::session_identity::SessionIdentity;
pub use repository::SessionStore;
