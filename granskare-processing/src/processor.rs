//! Production processing stage.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use granskare_core::{ParserKind, ParserSet, ProcessingError, ProcessingStage};

/// Subdirectories of the JSON output consumed by the report generators
/// and the web visualizer.
const LAYOUT_DIRS: [&str; 2] = ["SUMMARY", "VIEW1"];

/// One tool-specific log-to-JSON converter.
pub trait ParserRunner {
    fn run(&self, raw_log_dir: &Path, json_dir: &Path) -> Result<(), ProcessingError>;
}

/// Default processing stage: prepares the on-disk layout, then routes each
/// selected parser to its registered runner.
///
/// A failing parser is captured as a warning and the remaining parsers
/// still run; only layout preparation can fail the dispatch.
#[derive(Default)]
pub struct LogProcessor {
    runners: HashMap<ParserKind, Box<dyn ParserRunner>>,
}

impl LogProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugs a converter in for one parser identifier. Replaces any
    /// previously registered runner for the same identifier.
    pub fn register(&mut self, kind: ParserKind, runner: Box<dyn ParserRunner>) {
        self.runners.insert(kind, runner);
    }
}

impl ProcessingStage for LogProcessor {
    fn process(
        &self,
        raw_log_dir: &Path,
        parsers: &ParserSet,
        json_dir: &Path,
    ) -> Result<(), ProcessingError> {
        fs::create_dir_all(raw_log_dir)?;
        for sub in LAYOUT_DIRS {
            fs::create_dir_all(json_dir.join(sub))?;
        }

        info!(
            raw = %raw_log_dir.display(),
            json = %json_dir.display(),
            "processing {} parsers",
            parsers.len()
        );

        for kind in parsers.iter() {
            match self.runners.get(&kind) {
                Some(runner) => {
                    debug!(parser = %kind, "running parser");
                    if let Err(e) = runner.run(raw_log_dir, json_dir) {
                        warn!(parser = %kind, "parser failed: {e}");
                    }
                }
                None => debug!(parser = %kind, "no runner registered, skipping"),
            }
        }
        Ok(())
    }
}
