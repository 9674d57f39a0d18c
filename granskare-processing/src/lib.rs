//! # Granskare Processing
//!
//! The processing collaborator behind the dispatch contract. Owns the
//! on-disk output layout and the seam where tool-specific parsers plug in;
//! the parsers themselves live outside the orchestration core.

mod processor;
mod recording;

pub use processor::{LogProcessor, ParserRunner};
pub use recording::{DispatchCall, RecordingStage};
