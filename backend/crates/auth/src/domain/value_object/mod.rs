//! Value Object Module

pub mod identifier;
pub mod role;
