//! Error taxonomy for one audit run.

use std::path::PathBuf;

use thiserror::Error;

use granskare_config::ConfigError;

use crate::dispatch::ProcessingError;

/// Top-level failure modes of the orchestration core.
///
/// Validation failures are terminal for the run; warnings never surface
/// here — they stay inside the logging layer.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The instance-directory path yields no derivable instance name.
    #[error("invalid instance directory: {0}")]
    InvalidInstancePath(PathBuf),

    /// The capture file is missing or has no usable base name.
    #[error("capture file not usable: {0}")]
    CaptureFile(PathBuf),

    #[error("unknown parser identifier '{0}'")]
    UnknownParser(String),

    #[error("parser list resolved to an empty set")]
    EmptyParserSet,

    /// The processing collaborator reported failure; not retried.
    #[error("processing stage failed: {0}")]
    Dispatch(#[from] ProcessingError),
}

impl AuditError {
    /// Process exit code: 0 is success, 1 configuration/validation error,
    /// 2 invalid instance path, 3 no input specified.
    pub fn exit_code(&self) -> i32 {
        match self {
            AuditError::Config(ConfigError::NoInput) => 3,
            AuditError::InvalidInstancePath(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_the_documented_taxonomy() {
        assert_eq!(AuditError::Config(ConfigError::NoInput).exit_code(), 3);
        assert_eq!(
            AuditError::InvalidInstancePath(PathBuf::from("/")).exit_code(),
            2
        );
        assert_eq!(
            AuditError::Config(ConfigError::ConflictingInput).exit_code(),
            1
        );
        assert_eq!(
            AuditError::UnknownParser("wireshark".to_string()).exit_code(),
            1
        );
    }
}
