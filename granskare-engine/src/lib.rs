//! # Granskare Engine
//!
//! Orchestration runtime: configuration resolution has already happened
//! when this crate is entered; the runtime drives location, selection, and
//! the single dispatch, strictly in that order.

mod runtime;

pub use runtime::{AuditRuntime, DispatchReport, Dispatcher};
