//! Presentation Layer
//!
//! Pure projections of timeline state for renderers.

pub mod view;

pub use view::{IssuerView, ScanView};
