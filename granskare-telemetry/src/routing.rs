//! Severity levels and origin classification for diagnostic messages.
//!
//! The origin predicate is the single place where a message is judged to
//! come from inside the framework or from an external dependency; callers
//! must not reimplement the pattern match.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

/// Suffix appended to the primary log path to form the external-warning sink.
pub const EXTERNAL_SINK_SUFFIX: &str = ".external";

/// Display severity for one log record, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warn,
    Info,
    Debug,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a warning originated: one of our own components, or anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Internal,
    External,
}

/// Matches module paths (`granskare_engine::runtime`) and source paths
/// (`granskare-engine/src/runtime.rs`) rooted in our component namespace.
static INTERNAL_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"granskare(_[a-z0-9_]+)?(::[a-z0-9_]+)+|granskare-[a-z]+/src/[a-z0-9_/]+\.rs")
        .expect("internal marker pattern must compile")
});

impl Origin {
    /// Classify a free-text warning by the namespace marker it carries.
    pub fn classify(message: &str) -> Origin {
        if internal_component(message).is_some() {
            Origin::Internal
        } else {
            Origin::External
        }
    }
}

/// Returns the first internal component marker found in `message`, if any.
pub fn internal_component(message: &str) -> Option<&str> {
    INTERNAL_MARKER.find(message).map(|m| m.as_str())
}

/// Derives the external-warning sink path from the primary log path.
pub fn external_sink(primary: &Path) -> PathBuf {
    let mut path = primary.as_os_str().to_os_string();
    path.push(EXTERNAL_SINK_SUFFIX);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_path_is_internal() {
        assert_eq!(
            Origin::classify("deprecated call in granskare_engine::runtime"),
            Origin::Internal
        );
    }

    #[test]
    fn source_path_is_internal() {
        assert_eq!(
            Origin::classify("panicked at granskare-core/src/instance.rs:42"),
            Origin::Internal
        );
    }

    #[test]
    fn foreign_text_is_external() {
        assert_eq!(
            Origin::classify("libmagic: unsupported datatype in buffer"),
            Origin::External
        );
        assert_eq!(Origin::classify(""), Origin::External);
    }

    #[test]
    fn component_marker_is_extracted() {
        assert_eq!(
            internal_component("warning from granskare_config::options here"),
            Some("granskare_config::options")
        );
    }

    #[test]
    fn external_sink_appends_suffix() {
        assert_eq!(
            external_sink(Path::new("/var/log/granskare.log")),
            PathBuf::from("/var/log/granskare.log.external")
        );
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Error < Severity::Warn);
        assert!(Severity::Info < Severity::Debug);
    }
}
