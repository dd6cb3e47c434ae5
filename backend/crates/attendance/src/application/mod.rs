//! Application Layer - Timelines
//!
//! Pure state machines for both parties plus the tokio tasks that drive them.

pub mod config;
pub mod issuance;
pub mod issuer;
pub mod scan_flow;
pub mod scanner;

pub use config::AttendanceConfig;
pub use issuance::{IssuanceTimer, IssuerSnapshot};
pub use issuer::IssuerSession;
pub use scan_flow::{ScanEvent, ScanState};
pub use scanner::ScanSession;
