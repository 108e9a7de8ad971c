//! Per-pass result accounting.

use crate::backend::BackendKind;
use crate::catalog::TestCase;
use crate::compile::CompileOutcome;
use crate::program::RunOutcome;

/// Expected versus actual output of a failing test.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailureDetail {
    pub stderr_expected: String,
    pub stderr_actual: String,
    /// Empty unless the test reached the run stage.
    pub stdout_expected: String,
    pub stdout_actual: String,
}

impl FailureDetail {
    /// Detail for a test whose compile stage did not match its expectation.
    pub fn compile(case: &TestCase, compile: &CompileOutcome) -> Self {
        FailureDetail {
            stderr_expected: case.expectation.expected_stderr().to_string(),
            stderr_actual: compile.stderr.clone(),
            stdout_expected: String::new(),
            stdout_actual: String::new(),
        }
    }

    /// Detail for a test whose program output did not match the fixture.
    pub fn run(case: &TestCase, compile: &CompileOutcome, run: &RunOutcome) -> Self {
        FailureDetail {
            stdout_expected: String::from_utf8_lossy(&run.expected).into_owned(),
            stdout_actual: String::from_utf8_lossy(&run.stdout).into_owned(),
            ..Self::compile(case, compile)
        }
    }
}

/// Final verdict for one test in one pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestVerdict {
    Passed,
    Failed(FailureDetail),
}

impl TestVerdict {
    #[cold]
    pub fn failed(detail: FailureDetail) -> Self {
        TestVerdict::Failed(detail)
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, TestVerdict::Passed)
    }
}

/// A failing test and why it failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureRecord {
    pub case: TestCase,
    pub detail: FailureDetail,
}

/// Counts and failures of one pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassReport {
    pub backend: BackendKind,
    /// Number of test cases in the catalog.
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
    /// Failures in the order they were recorded.
    pub failures: Vec<FailureRecord>,
}

impl PassReport {
    pub fn new(backend: BackendKind, total: usize) -> Self {
        PassReport {
            backend,
            total,
            ok: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }

    pub fn add(&mut self, case: &TestCase, verdict: TestVerdict) {
        match verdict {
            TestVerdict::Passed => self.ok += 1,
            TestVerdict::Failed(detail) => {
                self.failed += 1;
                self.failures.push(FailureRecord {
                    case: case.clone(),
                    detail,
                });
            }
        }
    }

    /// Tests recorded so far.
    pub fn completed(&self) -> usize {
        self.ok + self.failed
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Results of a whole session, one entry per pass in run order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub passes: Vec<PassReport>,
}

impl SessionReport {
    /// True when every pass finished without failures.
    pub fn all_passed(&self) -> bool {
        self.passes.iter().all(PassReport::is_clean)
    }
}

/// Accumulates verdicts pass by pass.
///
/// Call [`reset`](Self::reset) at the start of each pass. Counts never carry
/// over between passes.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    finished: Vec<PassReport>,
    current: Option<PassReport>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current pass, if any, and start a fresh one.
    pub fn reset(&mut self, backend: BackendKind, total: usize) {
        if let Some(pass) = self.current.take() {
            self.finished.push(pass);
        }
        self.current = Some(PassReport::new(backend, total));
    }

    /// Record the verdict for `case` in the current pass.
    ///
    /// Recording before any `reset` opens an implicit type-checking pass.
    pub fn record(&mut self, case: &TestCase, verdict: TestVerdict) {
        let pass = self
            .current
            .get_or_insert_with(|| PassReport::new(BackendKind::TypecheckOnly, 0));
        pass.add(case, verdict);
        pass.total = pass.total.max(pass.completed());
    }

    /// Counts of the pass in progress.
    pub fn running(&self) -> Option<&PassReport> {
        self.current.as_ref()
    }

    /// Consume the aggregator, producing the report.
    pub fn finalize(mut self) -> SessionReport {
        if let Some(pass) = self.current.take() {
            self.finished.push(pass);
        }
        SessionReport {
            passes: self.finished,
        }
    }
}
