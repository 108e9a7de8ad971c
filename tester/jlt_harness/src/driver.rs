//! Session orchestration.
//!
//! ```text
//! Idle ──▶ TypecheckPass ─────────────┐
//!   └───▶ BackendPass(b) ──▶ ... ─────┴──▶ Reporting ──▶ Done
//! ```
//!
//! Passes run strictly in sequence, and so do the tests within a pass. A
//! [`HarnessError`] leaves the driver at the state it was in and skips the
//! remaining tests and passes. `a.out` is still removed.
//!
//! [`OrchestrationDriver::run`] ends in `Reporting`;
//! [`OrchestrationDriver::report`] renders the results and ends in `Done`.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::aggregate::{FailureDetail, PassReport, ResultAggregator, SessionReport, TestVerdict};
use crate::backend::{BackendImpl, BackendKind};
use crate::catalog::{TestCase, TestCatalog};
use crate::compile::CompilerInvoker;
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::program::ProgramRunner;
use crate::report::{status_line, ColorMode, ReportRenderer};

/// Where the driver is in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    TypecheckPass,
    BackendPass(BackendKind),
    Reporting,
    Done,
}

/// Receives live progress while a session runs.
pub trait ProgressSink {
    /// Called after every test with the counts of the pass in progress.
    fn test_finished(&mut self, pass: &PassReport);

    /// Called once a pass has recorded every test.
    fn pass_finished(&mut self, pass: &PassReport);
}

/// Progress sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn test_finished(&mut self, _pass: &PassReport) {}

    fn pass_finished(&mut self, _pass: &PassReport) {}
}

/// Rewrites a single status line in place, one line per pass.
pub struct ConsoleProgress<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(writer: W) -> Self {
        ConsoleProgress { writer }
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    // Progress output is best effort; a closed stdout must not abort a session.
    fn test_finished(&mut self, pass: &PassReport) {
        let line = status_line(pass.backend.label(), pass.ok, pass.failed, pass.total);
        let _ = write!(self.writer, "{line}");
        let _ = self.writer.flush();
    }

    fn pass_finished(&mut self, _pass: &PassReport) {
        let _ = writeln!(self.writer);
    }
}

/// Removes the linked test program when dropped.
///
/// Held for the whole session so `a.out` is gone however the session ends.
#[derive(Debug)]
pub struct ExecutableGuard {
    path: PathBuf,
}

impl ExecutableGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ExecutableGuard { path: path.into() }
    }
}

impl Drop for ExecutableGuard {
    fn drop(&mut self) {
        if self.path.is_file() {
            if let Err(err) = fs::remove_file(&self.path) {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "could not remove test program"
                );
            }
        }
    }
}

/// Runs every pass of a session and reports its results.
///
/// Progress is lent to [`run`](Self::run) only, so the same writer can
/// receive the status lines and then the report.
pub struct OrchestrationDriver<'a> {
    config: &'a HarnessConfig,
    state: DriverState,
}

impl<'a> OrchestrationDriver<'a> {
    pub fn new(config: &'a HarnessConfig) -> Self {
        OrchestrationDriver {
            config,
            state: DriverState::Idle,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Run every pass and return the aggregated results.
    #[tracing::instrument(level = "debug", skip_all, fields(prefix = %self.config.prefix))]
    pub fn run<P: ProgressSink>(
        &mut self,
        progress: &mut P,
    ) -> Result<SessionReport, HarnessError> {
        let _executable = ExecutableGuard::new(self.config.executable_path());
        let catalog = TestCatalog::discover(&self.config.testsuite, &self.config.extensions);
        tracing::debug!(tests = catalog.len(), "discovered test cases");

        let mut aggregator = ResultAggregator::new();
        for kind in self.config.passes() {
            self.state = if kind.is_concrete() {
                DriverState::BackendPass(kind)
            } else {
                DriverState::TypecheckPass
            };
            self.run_pass(kind, &catalog, &mut aggregator, progress)?;
        }

        self.state = DriverState::Reporting;
        Ok(aggregator.finalize())
    }

    /// Render `report` to `out` and finish the session.
    ///
    /// Returns whether every pass was free of failures.
    pub fn report<W: Write>(
        &mut self,
        report: &SessionReport,
        out: W,
        color: ColorMode,
        is_tty: bool,
    ) -> Result<bool, HarnessError> {
        let mut renderer = ReportRenderer::with_color_mode(out, color, is_tty);
        renderer.render(report)?;
        self.state = DriverState::Done;
        Ok(report.all_passed())
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, catalog, aggregator, progress),
        fields(tests = catalog.len())
    )]
    fn run_pass<P: ProgressSink>(
        &self,
        kind: BackendKind,
        catalog: &TestCatalog,
        aggregator: &mut ResultAggregator,
        progress: &mut P,
    ) -> Result<(), HarnessError> {
        let invoker = CompilerInvoker::new(self.config.compiler_path(kind));
        let backend = BackendImpl::for_kind(kind, self.config);

        aggregator.reset(kind, catalog.len());
        for case in catalog {
            let verdict = self.run_case(&invoker, backend.as_ref(), case)?;
            aggregator.record(case, verdict);
            if let Some(pass) = aggregator.running() {
                progress.test_finished(pass);
            }
        }
        if let Some(pass) = aggregator.running() {
            tracing::debug!(ok = pass.ok, failed = pass.failed, "pass finished");
            progress.pass_finished(pass);
        }
        Ok(())
    }

    /// Compile one test and, for accepted programs under a backend, link and run it.
    fn run_case(
        &self,
        invoker: &CompilerInvoker,
        backend: Option<&BackendImpl>,
        case: &TestCase,
    ) -> Result<TestVerdict, HarnessError> {
        let compiled = invoker.invoke(case)?;
        if !compiled.passed {
            return Ok(TestVerdict::failed(FailureDetail::compile(case, &compiled)));
        }

        let Some(backend) = backend.filter(|_| case.is_good()) else {
            return Ok(TestVerdict::Passed);
        };

        let linked = backend.link_program(&compiled.stdout, &self.config.executable_path())?;
        let ran = ProgramRunner::new().run(&linked.executable, case)?;
        if ran.passed {
            Ok(TestVerdict::Passed)
        } else {
            Ok(TestVerdict::failed(FailureDetail::run(case, &compiled, &ran)))
        }
    }
}
