//! Instance identity and output-path resolution.
//!
//! One audit run is tied to an "instance": a name plus the raw-log
//! directory it reads from and the JSON directory it publishes to. The
//! locator only computes paths; directories are created later by the
//! processing collaborator.

use std::path::{Path, PathBuf};

use tracing::debug;

use granskare_config::{InputSource, RunOptions};

use crate::error::AuditError;

/// The derived identity of one audit run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub name: String,
    /// Tool-native output, pre-parse (existing or to be populated).
    pub raw_log_dir: PathBuf,
    /// Normalized output consumed by downstream reporting.
    pub json_dir: PathBuf,
}

/// Registers a capture file and yields the instance name for it.
///
/// The production implementation derives the name from the file itself;
/// tests substitute their own.
pub trait InstanceLoader {
    fn register(&self, cap_file: &Path) -> Result<String, AuditError>;
}

/// Default loader: the capture file must exist, and its base name (without
/// extension) becomes the instance name.
#[derive(Debug, Default)]
pub struct CaptureRegistrar;

impl InstanceLoader for CaptureRegistrar {
    fn register(&self, cap_file: &Path) -> Result<String, AuditError> {
        if !cap_file.is_file() {
            return Err(AuditError::CaptureFile(cap_file.to_path_buf()));
        }
        cap_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AuditError::CaptureFile(cap_file.to_path_buf()))
    }
}

/// Resolves the instance for the run's input mode.
///
/// Capture mode registers the file through `loader`; instance-directory
/// mode derives the name from the path. An explicit `--log_dir` selects
/// the flat layout in either mode.
pub fn locate(options: &RunOptions, loader: &dyn InstanceLoader) -> Result<Instance, AuditError> {
    match &options.input {
        InputSource::Capture(cap_file) => {
            let name = loader.register(cap_file)?;
            let (raw_log_dir, json_dir) = match &options.log_dir {
                Some(dir) => (dir.clone(), dir.join("json")),
                None => (
                    options.log_root.join(&name),
                    options.www_root.join(&name).join("json"),
                ),
            };
            debug!(instance = %name, raw = %raw_log_dir.display(), "located capture instance");
            Ok(Instance {
                name,
                raw_log_dir,
                json_dir,
            })
        }
        InputSource::InstanceDir(instance_dir) => match &options.log_dir {
            Some(out_dir) => {
                // Explicit output target: the given directory is the raw-log
                // source and no name derivation is required.
                let name = derive_instance_name(instance_dir)
                    .unwrap_or_else(|| instance_dir.to_string_lossy().into_owned());
                Ok(Instance {
                    name,
                    raw_log_dir: instance_dir.clone(),
                    json_dir: out_dir.clone(),
                })
            }
            None => {
                let name = derive_instance_name(instance_dir)
                    .ok_or_else(|| AuditError::InvalidInstancePath(instance_dir.clone()))?;
                debug!(instance = %name, "derived instance name from directory");
                Ok(Instance {
                    json_dir: options.www_root.join(&name).join("json"),
                    raw_log_dir: instance_dir.clone(),
                    name,
                })
            }
        },
    }
}

/// Final non-empty path component after stripping trailing separators.
/// Empty, root, or otherwise malformed paths yield `None`.
fn derive_instance_name(dir: &Path) -> Option<String> {
    let trimmed = dir.to_string_lossy().trim_end_matches('/').to_string();
    if trimmed.is_empty() {
        return None;
    }
    Path::new(&trimmed)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use granskare_config::{AuditConfig, Overrides, RunOptions};
    use proptest::prelude::*;
    use std::path::PathBuf;

    /// Loader stub that never touches the filesystem.
    struct FixedName(&'static str);

    impl InstanceLoader for FixedName {
        fn register(&self, _cap_file: &Path) -> Result<String, AuditError> {
            Ok(self.0.to_string())
        }
    }

    fn options(overrides: Overrides) -> RunOptions {
        RunOptions::resolve(AuditConfig::default(), overrides).unwrap()
    }

    fn instance_dir_options(dir: &str, log_dir: Option<&str>) -> RunOptions {
        options(Overrides {
            instance_dir: Some(PathBuf::from(dir)),
            log_dir: log_dir.map(PathBuf::from),
            ..Overrides::default()
        })
    }

    #[test]
    fn trailing_separators_are_stripped() {
        let opts = instance_dir_options("/data/logs/case1/", None);
        let instance = locate(&opts, &CaptureRegistrar).unwrap();
        assert_eq!(instance.name, "case1");
        assert_eq!(instance.raw_log_dir, PathBuf::from("/data/logs/case1/"));
        assert_eq!(instance.json_dir, PathBuf::from("www/case1/json"));
    }

    #[test]
    fn root_path_is_an_invalid_instance() {
        let opts = instance_dir_options("/", None);
        let err = locate(&opts, &CaptureRegistrar).unwrap_err();
        assert!(matches!(err, AuditError::InvalidInstancePath(_)));
    }

    #[test]
    fn repeated_trailing_separators_are_invalid_only_when_nothing_remains() {
        let opts = instance_dir_options("///", None);
        assert!(locate(&opts, &CaptureRegistrar).is_err());

        let opts = instance_dir_options("case7///", None);
        assert_eq!(locate(&opts, &CaptureRegistrar).unwrap().name, "case7");
    }

    #[test]
    fn instance_dir_with_explicit_out_dir_skips_derivation_failure() {
        // Even an underivable path proceeds when the output target is
        // explicit; the directory is used as-is.
        let opts = instance_dir_options("/", Some("/srv/out"));
        let instance = locate(&opts, &CaptureRegistrar).unwrap();
        assert_eq!(instance.json_dir, PathBuf::from("/srv/out"));
        assert_eq!(instance.raw_log_dir, PathBuf::from("/"));
    }

    #[test]
    fn capture_mode_with_explicit_log_dir_is_flat() {
        let opts = options(Overrides {
            cap_file: Some(PathBuf::from("traffic.pcap")),
            log_dir: Some(PathBuf::from("/srv/run42")),
            ..Overrides::default()
        });
        let instance = locate(&opts, &FixedName("run42")).unwrap();
        assert_eq!(instance.raw_log_dir, PathBuf::from("/srv/run42"));
        assert_eq!(instance.json_dir, PathBuf::from("/srv/run42/json"));
    }

    #[test]
    fn capture_mode_without_log_dir_nests_by_instance_name() {
        let opts = options(Overrides {
            cap_file: Some(PathBuf::from("traffic.pcap")),
            ..Overrides::default()
        });
        let instance = locate(&opts, &FixedName("traffic")).unwrap();
        assert_eq!(instance.raw_log_dir, PathBuf::from("logs/traffic"));
        assert_eq!(instance.json_dir, PathBuf::from("www/traffic/json"));
    }

    #[test]
    fn registrar_uses_the_capture_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let cap = dir.path().join("branch-office.pcap");
        std::fs::write(&cap, b"\xd4\xc3\xb2\xa1").unwrap();

        let name = CaptureRegistrar.register(&cap).unwrap();
        assert_eq!(name, "branch-office");
    }

    #[test]
    fn registrar_rejects_missing_capture_file() {
        let err = CaptureRegistrar
            .register(Path::new("/no/such/capture.pcap"))
            .unwrap_err();
        assert!(matches!(err, AuditError::CaptureFile(_)));
    }

    proptest! {
        /// For any plain directory name, any number of trailing separators
        /// derives the same instance name.
        #[test]
        fn trailing_separator_derivation(
            name in "[a-zA-Z0-9_-]{1,16}",
            slashes in 0usize..5,
        ) {
            let path = format!("/data/{}{}", name, "/".repeat(slashes));
            let opts = instance_dir_options(&path, None);
            let instance = locate(&opts, &CaptureRegistrar).unwrap();
            prop_assert_eq!(instance.name, name);
        }
    }
}
