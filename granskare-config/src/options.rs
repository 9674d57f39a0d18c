//! Resolved per-invocation options.
//!
//! [`RunOptions`] is constructed exactly once at startup from the merged
//! configuration layers and stays immutable afterwards; every component
//! borrows it read-only. There is no ambient global option state.

use std::path::PathBuf;
use std::str::FromStr;

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validation;
use crate::AuditConfig;

/// The one input a run operates on: a raw capture or pre-existing tool logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A packet capture file to register and process.
    Capture(PathBuf),
    /// A directory of already-produced tool logs.
    InstanceDir(PathBuf),
}

/// Which dataset family the downstream generators should emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputDataset {
    #[default]
    All,
    Audit,
}

impl FromStr for OutputDataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(OutputDataset::All),
            "audit" => Ok(OutputDataset::Audit),
            other => Err(format!("unknown dataset '{other}', expected all|audit")),
        }
    }
}

/// Explicit command-line overrides, highest-precedence configuration layer.
///
/// Kept free of any CLI-framework types so the resolution logic stays
/// testable without argument parsing.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub cap_file: Option<PathBuf>,
    pub instance_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub parsers: Option<String>,
    pub home_net: Option<String>,
    pub payload: bool,
    pub debug: bool,
    pub out_dataset: Option<OutputDataset>,
    pub audit_dict: Option<PathBuf>,
}

/// The resolved, validated configuration for one invocation.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Exactly one input mode; enforced at resolution.
    pub input: InputSource,
    /// Explicit output/log directory; selects the flat layout when set.
    pub log_dir: Option<PathBuf>,
    /// Root for per-instance raw-log directories in the nested layout.
    pub log_root: PathBuf,
    /// Root for per-instance JSON output in the nested layout.
    pub www_root: PathBuf,
    /// Primary diagnostic sink.
    pub log_file: PathBuf,
    /// Raw comma-separated parser list; `None` selects the default set.
    pub parsers: Option<String>,
    /// Address ranges treated as internal for audit focus.
    pub home_net: Vec<IpNetwork>,
    /// Decode payloads during processing.
    pub payload: bool,
    /// Verbose diagnostics.
    pub debug: bool,
    pub out_dataset: OutputDataset,
    /// Vulnerability dictionary handed to the audit generators.
    pub audit_dict: Option<PathBuf>,
}

impl RunOptions {
    /// Merges the configuration layers: CLI overrides beat config-file
    /// values beat built-in defaults. Fails closed when no input mode is
    /// supplied, or when both are.
    pub fn resolve(config: AuditConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        let input = match (overrides.cap_file, overrides.instance_dir) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingInput),
            (Some(cap), None) => InputSource::Capture(cap),
            (None, Some(dir)) => InputSource::InstanceDir(dir),
            (None, None) => return Err(ConfigError::NoInput),
        };

        let home_net = match overrides.home_net {
            Some(raw) => validation::parse_home_net(&raw),
            None => config.home_net,
        };

        Ok(RunOptions {
            input,
            log_dir: overrides.log_dir,
            log_root: config.log_root,
            www_root: config.www_root,
            log_file: overrides.log_file.unwrap_or(config.log_file),
            parsers: overrides.parsers.or(config.parsers),
            home_net,
            payload: overrides.payload || config.payload,
            debug: overrides.debug,
            out_dataset: overrides.out_dataset.unwrap_or(config.out_dataset),
            audit_dict: overrides.audit_dict.or(config.audit_dict),
        })
    }
}
