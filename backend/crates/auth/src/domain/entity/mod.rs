//! Entity Module

pub mod session_identity;
