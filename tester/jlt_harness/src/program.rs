//! Running linked test programs.

use std::fs::{self, File};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::catalog::TestCase;
use crate::error::HarnessError;

/// Output of one program run, compared against the expected output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub stdout: Vec<u8>,
    /// Contents of the output fixture, empty when there is none.
    pub expected: Vec<u8>,
    /// Byte-exact match between `stdout` and `expected`.
    pub passed: bool,
}

/// Runs a linked program with the test case's input fixture on stdin.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgramRunner;

impl ProgramRunner {
    pub fn new() -> Self {
        ProgramRunner
    }

    /// Run `executable` for `case`.
    ///
    /// Stdin is the input fixture if present, otherwise empty. The exit
    /// status and stderr of the program do not affect the verdict.
    pub fn run(&self, executable: &Path, case: &TestCase) -> Result<RunOutcome, HarnessError> {
        let expected = match &case.output {
            Some(path) => fs::read(path).map_err(|source| HarnessError::Fixture {
                path: path.clone(),
                source,
            })?,
            None => Vec::new(),
        };

        let stdin = match &case.input {
            Some(path) => Stdio::from(File::open(path).map_err(|source| {
                HarnessError::Fixture {
                    path: path.clone(),
                    source,
                }
            })?),
            None => Stdio::null(),
        };

        let output = Command::new(executable)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| HarnessError::ProgramLaunch {
                executable: executable.to_path_buf(),
                source,
            })?;

        let passed = output.stdout == expected;
        tracing::trace!(
            case = %case.name(),
            status = ?output.status,
            passed,
            "ran program"
        );

        Ok(RunOutcome {
            stdout: output.stdout,
            expected,
            passed,
        })
    }
}
