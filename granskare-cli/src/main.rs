//! ## granskare-cli
//! **Unified operational interface**
//! Granskare main entrypoint: resolves the run configuration, derives the
//! instance identity, and dispatches the selected parsers once.
//!
//! ### Expectations:
//! - POSIX-compliant argument parsing
//! - Fail-fast on bad input, best-effort on noisy runtime conditions
//! - Documented exit codes (0 ok, 1 config, 2 bad instance path, 3 no input)

use clap::Parser;
use tracing::{error, info};

use granskare_config::{AuditConfig, RunOptions};
use granskare_core::{AuditError, CaptureRegistrar};
use granskare_engine::{AuditRuntime, DispatchReport};
use granskare_processing::LogProcessor;
use granskare_telemetry::{install_fault_adapter, AuditLogger, EventLogger};

mod commands;

use commands::Cli;

fn main() {
    let cli = Cli::parse();
    EventLogger::init(cli.debug);

    match run(cli) {
        Ok(report) => {
            info!(
                instance = %report.instance.name,
                parsers = %report.parsers,
                "audit run complete"
            );
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<DispatchReport, AuditError> {
    let config = match &cli.conf {
        Some(path) => AuditConfig::load_from_path(path)?,
        None => AuditConfig::load()?,
    };
    let options = RunOptions::resolve(config, cli.overrides())?;

    let logger = AuditLogger::new(options.log_file.clone(), options.debug);
    install_fault_adapter(logger.clone());

    AuditRuntime::new(
        options,
        logger,
        Box::new(CaptureRegistrar),
        LogProcessor::new(),
    )
    .run()
}
