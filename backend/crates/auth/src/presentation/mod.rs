//! Presentation Layer
//!
//! Pure projections for the sign-in form. Rendering is left to the caller.

pub mod hint;

pub use hint::RoleHint;
