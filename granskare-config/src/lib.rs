//! # Granskare Configuration System
//!
//! Hierarchical configuration for the audit pipeline.
//!
//! ## Features
//! - **Layered Resolution**: built-in defaults, optional YAML file,
//!   `GRANSKARE_*` environment variables, explicit CLI overrides
//! - **Validation**: runtime validation of critical parameters
//! - **Fail-fast**: a run without a resolvable input never reaches dispatch

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod options;
mod validation;

pub use error::ConfigError;
pub use options::{InputSource, OutputDataset, Overrides, RunOptions};
pub use validation::parse_home_net;

/// File-level settings for the audit pipeline.
///
/// These are the defaults and config-file values; per-invocation overrides
/// are applied by [`RunOptions::resolve`].
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct AuditConfig {
    /// Root for per-instance raw-log directories (nested layout).
    #[serde(default = "default_log_root")]
    pub log_root: PathBuf,

    /// Root for per-instance JSON output consumed by the web visualizer.
    #[serde(default = "default_www_root")]
    pub www_root: PathBuf,

    /// Primary diagnostic log sink.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Address ranges treated as internal for audit focus.
    #[validate(custom(function = validation::validate_cidr_list))]
    #[serde(default)]
    pub home_net: Vec<IpNetwork>,

    /// Decode payloads during processing.
    #[serde(default)]
    pub payload: bool,

    /// Dataset family for the downstream generators.
    #[serde(default)]
    pub out_dataset: OutputDataset,

    /// Vulnerability dictionary for the audit generators.
    #[serde(default)]
    pub audit_dict: Option<PathBuf>,

    /// Comma-separated parser list; unset selects the documented default set.
    #[serde(default)]
    pub parsers: Option<String>,
}

fn default_log_root() -> PathBuf {
    PathBuf::from("logs")
}

fn default_www_root() -> PathBuf {
    PathBuf::from("www")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("granskare.log")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_root: default_log_root(),
            www_root: default_www_root(),
            log_file: default_log_file(),
            home_net: Vec::new(),
            payload: false,
            out_dataset: OutputDataset::default(),
            audit_dict: None,
            parsers: None,
        }
    }
}

impl AuditConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/granskare.yaml` - base settings. If missing, defaults are used.
    /// 3. `GRANSKARE_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Start with defaults.
        let mut figment = Figment::from(Serialized::defaults(AuditConfig::default()));

        if Path::new("config/granskare.yaml").exists() {
            figment = figment.merge(Yaml::file("config/granskare.yaml"));
        } else {
            println!("config/granskare.yaml not found, using default configuration");
        }

        figment
            .merge(Env::prefixed("GRANSKARE_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path (`--conf`).
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(
                path.to_string_lossy().to_string(),
            )));
        }

        Figment::from(Serialized::defaults(AuditConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("GRANSKARE_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
