//! Recording test double for the dispatch contract.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use granskare_core::{ParserSet, ProcessingError, ProcessingStage};

/// One observed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchCall {
    pub raw_log_dir: PathBuf,
    pub parsers: Vec<String>,
    pub json_dir: PathBuf,
}

/// Records every dispatch without touching the filesystem.
///
/// Clones share the same call log, so a caller can hand one clone to the
/// runtime and keep another to assert the at-most-once contract.
#[derive(Debug, Clone, Default)]
pub struct RecordingStage {
    calls: Arc<Mutex<Vec<DispatchCall>>>,
}

impl RecordingStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log poisoned").len()
    }

    pub fn calls(&self) -> Vec<DispatchCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }
}

impl ProcessingStage for RecordingStage {
    fn process(
        &self,
        raw_log_dir: &Path,
        parsers: &ParserSet,
        json_dir: &Path,
    ) -> Result<(), ProcessingError> {
        self.calls.lock().expect("call log poisoned").push(DispatchCall {
            raw_log_dir: raw_log_dir.to_path_buf(),
            parsers: parsers.iter().map(|p| p.token().to_string()).collect(),
            json_dir: json_dir.to_path_buf(),
        });
        Ok(())
    }
}
