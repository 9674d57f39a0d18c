//! The contract between the orchestrator and the processing stage.

use std::path::Path;

use thiserror::Error;

use crate::parsers::ParserSet;

/// Failure reported by the processing collaborator.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("processing failed: {0}")]
    Failed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The processing stage invoked exactly once per run.
///
/// Directory creation under `json_dir` is the implementor's
/// responsibility; the orchestrator only computes the paths. Anything
/// deeper than success/failure is the implementor's concern.
pub trait ProcessingStage {
    fn process(
        &self,
        raw_log_dir: &Path,
        parsers: &ParserSet,
        json_dir: &Path,
    ) -> Result<(), ProcessingError>;
}
