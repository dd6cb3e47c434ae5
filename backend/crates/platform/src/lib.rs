//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Wall clock and manual clock (`clock`)
//! - Cancellable countdown and tick scheduling (`countdown`)
//! - Secondary credential handling with zeroization (`credential`)
//! - JSON key-value file storage for local session continuity (`storage`)

pub mod clock;
pub mod countdown;
pub mod credential;
pub mod storage;
