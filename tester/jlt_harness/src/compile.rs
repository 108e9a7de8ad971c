//! Running the compiler-under-test.
//!
//! The compiler reads the program on stdin and writes generated code to
//! stdout. On success it prints exactly `OK` on stderr and exits 0. On
//! failure it prints a line containing `ERROR` and exits non-zero.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::catalog::{Expectation, TestCase};
use crate::error::HarnessError;

/// What the compiler did with one test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOutcome {
    /// Exit code, `None` when the compiler was killed by a signal.
    pub exit_code: Option<i32>,
    /// Generated code.
    pub stdout: Vec<u8>,
    /// Diagnostic text, whitespace-trimmed.
    pub stderr: String,
    /// Whether the behavior matched the test case's expectation.
    pub passed: bool,
}

/// Decide whether a compiler run matches `expectation`.
///
/// Accepting is an exact match: trimmed stderr is `OK` and the exit code is
/// 0. Rejecting is a substring match: stderr contains `ERROR` and the
/// compiler did not exit with 0. Death by signal counts as non-zero.
pub fn classify(expectation: Expectation, stderr: &str, exit_code: Option<i32>) -> bool {
    match expectation {
        Expectation::Good => stderr.trim() == "OK" && exit_code == Some(0),
        Expectation::Bad => stderr.contains("ERROR") && exit_code != Some(0),
    }
}

/// Runs one compiler executable over test sources.
#[derive(Clone, Debug)]
pub struct CompilerInvoker {
    compiler: PathBuf,
}

impl CompilerInvoker {
    pub fn new(compiler: impl Into<PathBuf>) -> Self {
        CompilerInvoker {
            compiler: compiler.into(),
        }
    }

    pub fn compiler(&self) -> &Path {
        &self.compiler
    }

    /// Compile `case`, feeding its source on stdin.
    ///
    /// A compiler that cannot be launched aborts the session.
    pub fn invoke(&self, case: &TestCase) -> Result<CompileOutcome, HarnessError> {
        let source_path = case.source();
        let source = File::open(&source_path).map_err(|source| HarnessError::Fixture {
            path: source_path.clone(),
            source,
        })?;

        let output = Command::new(&self.compiler)
            .stdin(Stdio::from(source))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| HarnessError::CompilerLaunch {
                compiler: self.compiler.clone(),
                source,
            })?;

        let exit_code = output.status.code();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let passed = classify(case.expectation, &stderr, exit_code);
        tracing::trace!(
            case = %case.name(),
            ?exit_code,
            passed,
            "compiled"
        );

        Ok(CompileOutcome {
            exit_code,
            stdout: output.stdout,
            stderr,
            passed,
        })
    }
}
