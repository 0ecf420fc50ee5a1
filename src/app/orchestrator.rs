//! Write-step orchestration.
//!
//! Sequences validation, source resolution, the best-effort existence
//! check, and the member write. All calls are blocking and sequential;
//! cancellation is honored between them, never mid-transfer.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;

use crate::domain::validation::{ValidationOutcome, validate_dataset, validate_member};
use crate::domain::{AppError, DatasetTarget, FileOption};
use crate::ports::{LogEvent, LogSink, SourceReader, ZosmfClient};

/// Interruption signal shared with the host runtime. Checked between
/// blocking calls.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Host-runtime surroundings of one step execution.
pub struct ExecutionContext<'a> {
    pub workspace_root: PathBuf,
    pub log: &'a dyn LogSink,
    pub cancel: CancelToken,
}

impl<'a> ExecutionContext<'a> {
    pub fn new<P: Into<PathBuf>>(workspace_root: P, log: &'a dyn LogSink) -> Self {
        Self { workspace_root: workspace_root.into(), log, cancel: CancelToken::new() }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    fn emit<S: Into<String>>(&self, message: S) {
        self.log.emit(LogEvent { at: Utc::now(), message: message.into() });
    }
}

/// Full parameter set for one write step.
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub target: DatasetTarget,
    pub source: FileOption,
}

/// Successful completion report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub bytes_written: usize,
}

/// Execution phases of the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Idle,
    Validating,
    ResolvingSource,
    CheckingExistence,
    Writing,
    Done,
    Failed,
}

/// Drives one write step from parameters to a terminal state.
pub struct StepOrchestrator<'a> {
    client: &'a dyn ZosmfClient,
    reader: &'a dyn SourceReader,
    state: StepState,
}

impl<'a> StepOrchestrator<'a> {
    pub fn new(client: &'a dyn ZosmfClient, reader: &'a dyn SourceReader) -> Self {
        Self { client, reader, state: StepState::Idle }
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    /// Run the step to completion. Validation failures block before any
    /// I/O; an existence-check failure never blocks the write.
    pub fn execute(
        &mut self,
        request: WriteRequest,
        ctx: &ExecutionContext<'_>,
    ) -> Result<WriteOutcome, AppError> {
        self.state = StepState::Validating;
        self.validate(&request.target)?;
        self.check_cancelled(ctx)?;

        self.state = StepState::ResolvingSource;
        let bytes = self
            .reader
            .resolve_bytes(&request.source, &ctx.workspace_root)
            .map_err(|err| self.fail(err))?;
        self.check_cancelled(ctx)?;

        self.state = StepState::CheckingExistence;
        let dataset_listed = self
            .client
            .list_datasets(&request.target.dataset_name)
            .map(|listing| listing.contains(&request.target.dataset_name))
            .unwrap_or(false);
        if dataset_listed {
            ctx.emit(format!("Writing to dataset {}", request.target));
        } else {
            ctx.emit(format!("Writing to dataset {}, member will be created", request.target));
        }
        self.check_cancelled(ctx)?;

        self.state = StepState::Writing;
        self.client.write_member(&request.target, &bytes).map_err(|err| self.fail(err))?;

        ctx.emit(format!("Data has been written to dataset {}", request.target));
        self.state = StepState::Done;
        Ok(WriteOutcome { bytes_written: bytes.len() })
    }

    /// Member warnings are surfaced by field validation but never block a
    /// run; only Error outcomes do.
    fn validate(&mut self, target: &DatasetTarget) -> Result<(), AppError> {
        if let ValidationOutcome::Error(reason) = validate_dataset(&target.dataset_name) {
            return Err(self.fail(AppError::Validation(reason)));
        }
        if let ValidationOutcome::Error(reason) = validate_member(&target.member_name) {
            return Err(self.fail(AppError::Validation(reason)));
        }
        Ok(())
    }

    fn check_cancelled(&mut self, ctx: &ExecutionContext<'_>) -> Result<(), AppError> {
        if ctx.cancel.is_cancelled() {
            return Err(self.fail(AppError::Cancelled));
        }
        Ok(())
    }

    fn fail(&mut self, err: AppError) -> AppError {
        self.state = StepState::Failed;
        err
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::adapters::FilesystemSourceReader;
    use crate::domain::validation::{
        MSG_DATASET_NAME_IS_INVALID, MSG_VALUE_MUST_NOT_BE_EMPTY, MSG_VALUE_UP_TO_EIGHT_IN_LENGTH,
    };
    use crate::ports::{DatasetEntry, DatasetListing, MemoryLogSink};

    /// Scripted gateway double: pops one canned response per call and
    /// counts invocations.
    struct ScriptedClient {
        listings: Mutex<Vec<Result<DatasetListing, AppError>>>,
        writes: Mutex<Vec<Result<(), AppError>>>,
        listing_calls: AtomicUsize,
        write_calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(
            listings: Vec<Result<DatasetListing, AppError>>,
            writes: Vec<Result<(), AppError>>,
        ) -> Self {
            Self {
                listings: Mutex::new(listings),
                writes: Mutex::new(writes),
                listing_calls: AtomicUsize::new(0),
                write_calls: AtomicUsize::new(0),
            }
        }

        fn listing_count(&self) -> usize {
            self.listing_calls.load(Ordering::SeqCst)
        }

        fn write_count(&self) -> usize {
            self.write_calls.load(Ordering::SeqCst)
        }
    }

    impl ZosmfClient for ScriptedClient {
        fn list_datasets(&self, _name_filter: &str) -> Result<DatasetListing, AppError> {
            self.listing_calls.fetch_add(1, Ordering::SeqCst);
            let mut guard = self.listings.lock().expect("listings lock poisoned");
            if guard.is_empty() {
                return Err(AppError::Remote {
                    message: "test: unexpected listing call".to_string(),
                    status: Some(500),
                });
            }
            guard.remove(0)
        }

        fn write_member(&self, _target: &DatasetTarget, _bytes: &[u8]) -> Result<(), AppError> {
            self.write_calls.fetch_add(1, Ordering::SeqCst);
            let mut guard = self.writes.lock().expect("writes lock poisoned");
            if guard.is_empty() {
                return Err(AppError::Remote {
                    message: "test: unexpected write call".to_string(),
                    status: Some(500),
                });
            }
            guard.remove(0)
        }
    }

    fn listing_with(dsname: &str) -> DatasetListing {
        DatasetListing {
            items: vec![DatasetEntry { dsname: dsname.to_string() }],
            returned_rows: 1,
        }
    }

    fn request(dataset: &str, member: &str) -> WriteRequest {
        WriteRequest {
            target: DatasetTarget::new(dataset, member),
            source: FileOption::Inline("RECORD ONE".to_string()),
        }
    }

    #[test]
    fn starts_idle() {
        let client = ScriptedClient::new(vec![], vec![]);
        let reader = FilesystemSourceReader::new();
        let orchestrator = StepOrchestrator::new(&client, &reader);
        assert_eq!(orchestrator.state(), StepState::Idle);
    }

    #[test]
    fn happy_path_emits_two_lines_and_ends_done() {
        let client = ScriptedClient::new(
            vec![Ok(listing_with("TEST.IJMP.DATASET1"))],
            vec![Ok(())],
        );
        let reader = FilesystemSourceReader::new();
        let sink = MemoryLogSink::new();
        let ctx = ExecutionContext::new(".", &sink);
        let mut orchestrator = StepOrchestrator::new(&client, &reader);

        let outcome = orchestrator.execute(request("TEST.IJMP.DATASET1", "#1"), &ctx).unwrap();

        assert_eq!(orchestrator.state(), StepState::Done);
        assert_eq!(outcome.bytes_written, "RECORD ONE".len());
        assert_eq!(
            sink.messages(),
            vec![
                "Writing to dataset TEST.IJMP.DATASET1(#1)".to_string(),
                "Data has been written to dataset TEST.IJMP.DATASET1(#1)".to_string(),
            ]
        );
    }

    #[test]
    fn invalid_dataset_name_fails_before_any_io() {
        let client = ScriptedClient::new(vec![], vec![]);
        let reader = FilesystemSourceReader::new();
        let sink = MemoryLogSink::new();
        let ctx = ExecutionContext::new(".", &sink);
        let mut orchestrator = StepOrchestrator::new(&client, &reader);

        let err = orchestrator.execute(request("MY_DATASET", "MEM"), &ctx).unwrap_err();

        assert_eq!(orchestrator.state(), StepState::Failed);
        match err {
            AppError::Validation(reason) => assert_eq!(reason, MSG_DATASET_NAME_IS_INVALID),
            other => panic!("unexpected error variant: {}", other),
        }
        assert_eq!(client.listing_count(), 0);
        assert_eq!(client.write_count(), 0);
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn empty_dataset_name_is_rejected_with_empty_reason() {
        let client = ScriptedClient::new(vec![], vec![]);
        let reader = FilesystemSourceReader::new();
        let sink = MemoryLogSink::new();
        let ctx = ExecutionContext::new(".", &sink);
        let mut orchestrator = StepOrchestrator::new(&client, &reader);

        let err = orchestrator.execute(request("", "MEM"), &ctx).unwrap_err();
        match err {
            AppError::Validation(reason) => assert_eq!(reason, MSG_VALUE_MUST_NOT_BE_EMPTY),
            other => panic!("unexpected error variant: {}", other),
        }
    }

    #[test]
    fn overlong_member_name_is_rejected() {
        let client = ScriptedClient::new(vec![], vec![]);
        let reader = FilesystemSourceReader::new();
        let sink = MemoryLogSink::new();
        let ctx = ExecutionContext::new(".", &sink);
        let mut orchestrator = StepOrchestrator::new(&client, &reader);

        let err = orchestrator.execute(request("TEST.DATA", "NINECHARS"), &ctx).unwrap_err();
        match err {
            AppError::Validation(reason) => {
                assert_eq!(reason, MSG_VALUE_UP_TO_EIGHT_IN_LENGTH)
            }
            other => panic!("unexpected error variant: {}", other),
        }
        assert_eq!(client.write_count(), 0);
    }

    #[test]
    fn member_warning_does_not_block_the_write() {
        let client = ScriptedClient::new(vec![Ok(listing_with("TEST.DATA"))], vec![Ok(())]);
        let reader = FilesystemSourceReader::new();
        let sink = MemoryLogSink::new();
        let ctx = ExecutionContext::new(".", &sink);
        let mut orchestrator = StepOrchestrator::new(&client, &reader);

        // "@MY_DS" only warns at field validation; execution proceeds.
        let result = orchestrator.execute(request("TEST.DATA", "@MY_DS"), &ctx);
        assert!(result.is_ok());
        assert_eq!(orchestrator.state(), StepState::Done);
        assert_eq!(client.write_count(), 1);
    }

    #[test]
    fn unreadable_source_fails_without_network_calls() {
        let client = ScriptedClient::new(vec![], vec![]);
        let reader = FilesystemSourceReader::new();
        let sink = MemoryLogSink::new();
        let ctx = ExecutionContext::new(".", &sink);
        let mut orchestrator = StepOrchestrator::new(&client, &reader);

        let request = WriteRequest {
            target: DatasetTarget::new("TEST.DATA", "MEM"),
            source: FileOption::Local("/no/such/file".into()),
        };
        let err = orchestrator.execute(request, &ctx).unwrap_err();

        assert_eq!(orchestrator.state(), StepState::Failed);
        assert!(matches!(err, AppError::SourceRead { .. }));
        assert_eq!(client.listing_count(), 0);
        assert_eq!(client.write_count(), 0);
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn existence_check_failure_does_not_block_the_write() {
        let client = ScriptedClient::new(
            vec![Err(AppError::Connection("gateway listing unreachable".to_string()))],
            vec![Ok(())],
        );
        let reader = FilesystemSourceReader::new();
        let sink = MemoryLogSink::new();
        let ctx = ExecutionContext::new(".", &sink);
        let mut orchestrator = StepOrchestrator::new(&client, &reader);

        let result = orchestrator.execute(request("TEST.DATA", "MEM"), &ctx);

        assert!(result.is_ok());
        assert_eq!(orchestrator.state(), StepState::Done);
        let messages = sink.messages();
        assert!(messages[0].starts_with("Writing to dataset TEST.DATA(MEM)"));
        assert!(messages[0].ends_with("member will be created"));
    }

    #[test]
    fn unlisted_dataset_switches_progress_wording() {
        let client = ScriptedClient::new(
            vec![Ok(DatasetListing::default())],
            vec![Ok(())],
        );
        let reader = FilesystemSourceReader::new();
        let sink = MemoryLogSink::new();
        let ctx = ExecutionContext::new(".", &sink);
        let mut orchestrator = StepOrchestrator::new(&client, &reader);

        orchestrator.execute(request("TEST.DATA", "MEM"), &ctx).unwrap();
        assert_eq!(
            sink.messages()[0],
            "Writing to dataset TEST.DATA(MEM), member will be created"
        );
    }

    #[test]
    fn write_failure_propagates_and_suppresses_completion_line() {
        let client = ScriptedClient::new(
            vec![Ok(listing_with("TEST.IJMP.DATASET1"))],
            vec![Err(AppError::Remote { message: "Server error".to_string(), status: Some(500) })],
        );
        let reader = FilesystemSourceReader::new();
        let sink = MemoryLogSink::new();
        let ctx = ExecutionContext::new(".", &sink);
        let mut orchestrator = StepOrchestrator::new(&client, &reader);

        let err = orchestrator.execute(request("TEST.IJMP.DATASET1", "#1"), &ctx).unwrap_err();

        assert_eq!(orchestrator.state(), StepState::Failed);
        assert!(matches!(err, AppError::Remote { status: Some(500), .. }));
        let messages = sink.messages();
        assert_eq!(messages.len(), 1);
        assert!(!messages.iter().any(|m| m.contains("Data has been written")));
    }

    #[test]
    fn cancellation_is_honored_between_phases() {
        let client = ScriptedClient::new(vec![], vec![]);
        let reader = FilesystemSourceReader::new();
        let sink = MemoryLogSink::new();
        let cancel = CancelToken::new();
        cancel.cancel();
        let ctx = ExecutionContext::new(".", &sink).with_cancel(cancel);
        let mut orchestrator = StepOrchestrator::new(&client, &reader);

        let err = orchestrator.execute(request("TEST.DATA", "MEM"), &ctx).unwrap_err();

        assert_eq!(orchestrator.state(), StepState::Failed);
        assert!(matches!(err, AppError::Cancelled));
        assert_eq!(client.listing_count(), 0);
        assert_eq!(client.write_count(), 0);
    }
}
