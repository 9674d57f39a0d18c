//! # Granskare Core
//!
//! Domain layer of the audit orchestration: instance identity, parser
//! selection, and the dispatch contract handed to the processing stage.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod dispatch;
mod error;
mod instance;
mod parsers;

pub use dispatch::{ProcessingError, ProcessingStage};
pub use error::AuditError;
pub use instance::{locate, CaptureRegistrar, Instance, InstanceLoader};
pub use parsers::{ParserKind, ParserSet, DEFAULT_PARSERS};
