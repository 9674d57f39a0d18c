//! ## granskare-telemetry::logging
//! **Severity- and sink-aware audit logger**
//!
//! Console diagnostics go through `tracing`; per-run file sinks are
//! appended directly. A process-boundary adapter feeds otherwise-uncaught
//! faults from external collaborators into the same routing.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tracing_subscriber::{fmt, EnvFilter};

use crate::routing::{self, Origin, Severity};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global console subscriber. Safe to call more than once;
    /// later calls are ignored.
    pub fn init(debug: bool) {
        let default_filter = if debug { "debug" } else { "info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        let _ = fmt().with_env_filter(filter).try_init();
    }
}

/// File-sink logger for one audit run.
///
/// Internal warnings land in the primary sink at elevated severity;
/// external warnings land in `<primary>.external` regardless of the
/// verbosity threshold. Writing never fails the run: a sink that cannot
/// be appended to degrades to stderr.
///
/// Contract boundary: one writer per sink from one process. Concurrent
/// runs sharing a log directory are not coordinated.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    threshold: Severity,
    primary: PathBuf,
    external: PathBuf,
}

impl AuditLogger {
    pub fn new(log_file: impl Into<PathBuf>, debug: bool) -> Self {
        let primary = log_file.into();
        let external = routing::external_sink(&primary);
        let threshold = if debug { Severity::Debug } else { Severity::Info };
        Self {
            threshold,
            primary,
            external,
        }
    }

    pub fn primary_sink(&self) -> &Path {
        &self.primary
    }

    pub fn external_sink(&self) -> &Path {
        &self.external
    }

    /// Normal logging path: gated by the verbosity threshold, appended to
    /// the primary sink and mirrored to the console subscriber.
    pub fn log(&self, component: &str, message: &str, severity: Severity) {
        if severity > self.threshold {
            return;
        }
        emit_console(component, message, severity);
        self.append(&self.primary, component, message, severity);
    }

    /// Boundary adapter for warnings that did not come through [`log`](Self::log).
    ///
    /// Classification is centralized in [`Origin::classify`]: warnings
    /// carrying our component namespace are treated as internal noise and
    /// elevated into the primary sink; everything else is tagged as an
    /// external warning and preserved in the secondary sink so it neither
    /// pollutes the main stream nor gets lost. Never aborts the run.
    pub fn capture_warning(&self, message: &str) {
        match Origin::classify(message) {
            Origin::Internal => {
                let component =
                    routing::internal_component(message).unwrap_or("granskare");
                emit_console(component, message, Severity::Warn);
                self.append(&self.primary, component, message, Severity::Warn);
            }
            Origin::External => {
                emit_console("External Warning", message, Severity::Warn);
                self.append(&self.external, "External Warning", message, Severity::Warn);
            }
        }
    }

    fn append(&self, sink: &Path, component: &str, message: &str, severity: Severity) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let record = format!("{timestamp} [{severity}] {component}: {message}\n");

        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(sink)
            .and_then(|mut file| file.write_all(record.as_bytes()));

        if let Err(e) = written {
            // Last-resort fallback: the record must not be lost and logging
            // must never raise.
            eprintln!("granskare: cannot write {}: {e}; {record}", sink.display());
        }
    }
}

fn emit_console(component: &str, message: &str, severity: Severity) {
    match severity {
        Severity::Error => tracing::error!(%component, "{message}"),
        Severity::Warn => tracing::warn!(%component, "{message}"),
        Severity::Info => tracing::info!(%component, "{message}"),
        Severity::Debug => tracing::debug!(%component, "{message}"),
    }
}

/// Routes otherwise-uncaught panics from collaborators through the warning
/// classifier. The panic location keeps internal faults attributable to the
/// component that raised them.
pub fn install_fault_adapter(logger: AuditLogger) {
    std::panic::set_hook(Box::new(move |info| {
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };

        let text = match info.location() {
            Some(loc) => format!("{payload} (at {}:{})", loc.file(), loc.line()),
            None => payload,
        };
        logger.capture_warning(&text);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tracing_test::traced_test;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    #[traced_test]
    #[test]
    fn records_are_mirrored_to_console() {
        let dir = tempfile::tempdir().unwrap();
        let logger = AuditLogger::new(dir.path().join("audit.log"), false);

        logger.log("locator", "instance resolved", Severity::Info);
        logger.capture_warning("noise from somewhere else");

        assert!(logs_contain("instance resolved"));
        assert!(logs_contain("noise from somewhere else"));
    }

    #[test]
    fn internal_warning_goes_to_primary_sink() {
        let dir = tempfile::tempdir().unwrap();
        let logger = AuditLogger::new(dir.path().join("audit.log"), false);

        logger.capture_warning("lossy path join in granskare_core::instance");

        let primary = read(logger.primary_sink());
        assert!(primary.contains("granskare_core::instance"));
        assert!(primary.contains("[WARN]"));
        assert_eq!(read(logger.external_sink()), "");
    }

    #[test]
    fn external_warning_goes_to_secondary_sink() {
        let dir = tempfile::tempdir().unwrap();
        let logger = AuditLogger::new(dir.path().join("audit.log"), false);

        logger.capture_warning("deprecated API used by some dependency");

        assert_eq!(read(logger.primary_sink()), "");
        let external = read(logger.external_sink());
        assert!(external.contains("External Warning"));
        assert!(external.contains("deprecated API"));
    }

    #[test]
    fn external_sink_path_carries_suffix() {
        let logger = AuditLogger::new("/tmp/run/audit.log", false);
        assert_eq!(
            logger.external_sink(),
            Path::new("/tmp/run/audit.log.external")
        );
    }

    #[test]
    fn debug_records_are_gated_by_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let logger = AuditLogger::new(dir.path().join("audit.log"), false);

        logger.log("locator", "path probe detail", Severity::Debug);
        assert_eq!(read(logger.primary_sink()), "");

        let verbose = AuditLogger::new(dir.path().join("verbose.log"), true);
        verbose.log("locator", "path probe detail", Severity::Debug);
        assert!(read(verbose.primary_sink()).contains("path probe detail"));
    }

    #[test]
    fn unwritable_sink_degrades_without_panicking() {
        let logger = AuditLogger::new("/nonexistent-dir/granskare.log", false);
        logger.log("engine", "still alive", Severity::Info);
        logger.capture_warning("external noise survives too");
    }
}
