//! # Granskare Telemetry
//!
//! Crate for logging and diagnostic message routing.

pub mod logging;
pub mod routing;

pub use logging::{install_fault_adapter, AuditLogger, EventLogger};
pub use routing::{Origin, Severity};
