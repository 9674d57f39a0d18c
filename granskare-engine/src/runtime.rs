//! Audit runtime core - coordinates instance location, parser selection,
//! and the single dispatch into the processing collaborator.

use tracing::{debug, info, instrument};

use granskare_config::RunOptions;
use granskare_core::{
    locate, AuditError, Instance, InstanceLoader, ParserSet, ProcessingStage,
};
use granskare_telemetry::{AuditLogger, Severity};

/// What one run dispatched; consumed by top-level logging only.
#[derive(Debug)]
pub struct DispatchReport {
    pub instance: Instance,
    pub parsers: ParserSet,
}

/// Hands the resolved run to the processing stage.
///
/// Dispatching consumes the dispatcher, so a second call per run is
/// unrepresentable.
pub struct Dispatcher<P: ProcessingStage> {
    stage: P,
}

impl<P: ProcessingStage> Dispatcher<P> {
    pub fn new(stage: P) -> Self {
        Self { stage }
    }

    pub fn dispatch(self, instance: &Instance, parsers: &ParserSet) -> Result<(), AuditError> {
        debug!(instance = %instance.name, "entering processing stage");
        self.stage
            .process(&instance.raw_log_dir, parsers, &instance.json_dir)
            .map_err(AuditError::from)
    }
}

/// Coordinates one audit run to completion.
///
/// Stages run sequentially and the dispatch call is treated as atomic;
/// there is no cancellation or retry in this layer.
pub struct AuditRuntime<P: ProcessingStage> {
    options: RunOptions,
    logger: AuditLogger,
    loader: Box<dyn InstanceLoader>,
    stage: P,
}

impl<P: ProcessingStage> AuditRuntime<P> {
    pub fn new(
        options: RunOptions,
        logger: AuditLogger,
        loader: Box<dyn InstanceLoader>,
        stage: P,
    ) -> Self {
        Self {
            options,
            logger,
            loader,
            stage,
        }
    }

    /// Runs location -> selection -> dispatch. Both preconditions must
    /// succeed before the processing stage is entered.
    #[instrument(skip_all)]
    pub fn run(self) -> Result<DispatchReport, AuditError> {
        info!("starting audit run");

        let instance = locate(&self.options, self.loader.as_ref())?;
        self.logger.log(
            "granskare_engine::runtime",
            &format!(
                "instance '{}': raw logs in {}, json output in {}",
                instance.name,
                instance.raw_log_dir.display(),
                instance.json_dir.display()
            ),
            Severity::Info,
        );

        let parsers = ParserSet::select(&self.options)?;
        self.logger.log(
            "granskare_engine::runtime",
            &format!("selected parsers: {parsers}"),
            Severity::Debug,
        );

        Dispatcher::new(self.stage).dispatch(&instance, &parsers)?;
        self.logger.log(
            "granskare_engine::runtime",
            &format!("dispatch complete for instance '{}'", instance.name),
            Severity::Info,
        );

        Ok(DispatchReport { instance, parsers })
    }
}
