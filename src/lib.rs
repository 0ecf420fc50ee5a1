//! dsput: write local content into z/OS partitioned dataset members through
//! a z/OSMF-compatible REST gateway.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

pub use adapters::{ConsoleLogSink, FilesystemSourceReader, HttpZosmfClient};
pub use app::orchestrator::{
    CancelToken, ExecutionContext, StepOrchestrator, StepState, WriteOutcome, WriteRequest,
};
pub use domain::{
    AppError, ConnectionProfile, DatasetTarget, Field, FileOption, PASSWORD_ENV_VAR, Protocol,
    ValidationOutcome, ZosConnection, ZosmfApiConfig, validate_field,
};
pub use ports::{LogEvent, LogSink, MemoryLogSink};

/// Write content into `target` through a z/OSMF gateway.
///
/// Wires the filesystem source reader and the HTTP gateway client into a
/// fresh orchestrator and runs the step to a terminal state. Progress is
/// reported through `ctx.log`; validation failures return before any
/// network traffic.
pub fn write_member(
    connection: ZosConnection,
    config: &ZosmfApiConfig,
    target: DatasetTarget,
    source: FileOption,
    ctx: &ExecutionContext<'_>,
) -> Result<WriteOutcome, AppError> {
    let client = HttpZosmfClient::new(connection, config)?;
    let reader = FilesystemSourceReader::new();
    let mut orchestrator = StepOrchestrator::new(&client, &reader);
    orchestrator.execute(WriteRequest { target, source }, ctx)
}

/// Validate one front-end field value against the validation table.
pub fn check_field(field: Field, value: &str, file_option: Option<&str>) -> ValidationOutcome {
    validate_field(field, value, file_option)
}
