//! One tester invocation, from flag validation to the final report.
//!
//! ```text
//! validate ─▶ [unpack] ─▶ layout ─▶ make ─▶ executables ─▶ runtimes
//!          ─▶ banner ─▶ passes ─▶ report ─▶ cleanup
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use jlt_harness::{
    available_extensions, indent_with, write_banner, ColorMode, ConsoleProgress, ExecutableGuard,
    HarnessConfig, HarnessError, OrchestrationDriver,
};
use jlt_submission::{unpack, SubmissionError};
use thiserror::Error;

use crate::cli::Cli;

/// Why a session could not produce a verdict.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not a valid extension: {0}")]
    InvalidExtension(String),

    #[error("Not a file: {}\n(--archive flag was passed)", .0.display())]
    NotAFile(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot list extensions in {}: {source}", dir.display())]
    Extensions {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

impl SessionError {
    /// Whether the error is about the command line rather than the submission.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidExtension(_)
                | SessionError::NotAFile(_)
                | SessionError::NotADirectory(_)
                | SessionError::Extensions { .. }
        )
    }

    /// Text printed on stderr.
    ///
    /// Usage errors are printed as-is; everything else is a failed session.
    pub fn render(&self) -> String {
        if self.is_usage() {
            self.to_string()
        } else {
            format!("\njlt failed with:\n{}", indent_with(4, &self.to_string()))
        }
    }
}

/// Run the session described by `cli` with `workdir` as scratch space.
///
/// Returns whether every test passed. Progress and the report go to `out`.
pub fn execute<W: Write>(
    cli: &Cli,
    workdir: &Path,
    out: &mut W,
    is_tty: bool,
) -> Result<bool, SessionError> {
    if cli.list {
        let extensions = list_extensions(&cli.testsuite)?;
        writeln!(out, "Available extensions:")?;
        for ext in extensions {
            writeln!(out, "  * {ext}")?;
        }
        return Ok(true);
    }

    let submission = validate(cli)?;
    let mut config = HarnessConfig::new(&submission)
        .with_prefix(&cli.prefix)
        .with_backends(cli.backends())
        .with_extensions(cli.extensions.clone())
        .with_testsuite(&cli.testsuite)
        .with_workdir(workdir);
    let _executable = ExecutableGuard::new(config.executable_path());

    if !cli.archive {
        return test_submission(&config, out, cli.color.into(), is_tty);
    }

    let unpacked = unpack(&submission, workdir, &config.toolchain.tar, out)?;
    config.submission = unpacked.path().to_path_buf();
    let result = test_submission(&config, out, cli.color.into(), is_tty);

    if cli.noclean {
        let kept = unpacked.keep();
        writeln!(out, "Keeping temporary files in: {}", kept.display())?;
    } else {
        writeln!(out, "Removing temporary files in: {}", unpacked.path().display())?;
        drop(unpacked);
    }
    result
}

fn list_extensions(testsuite: &Path) -> Result<Vec<String>, SessionError> {
    available_extensions(testsuite).map_err(|source| SessionError::Extensions {
        dir: testsuite.join("extensions"),
        source,
    })
}

/// Check the requested extensions and the submission path.
fn validate(cli: &Cli) -> Result<PathBuf, SessionError> {
    if !cli.extensions.is_empty() {
        let available = list_extensions(&cli.testsuite)?;
        if let Some(unknown) = cli.extensions.iter().find(|ext| !available.contains(*ext)) {
            return Err(SessionError::InvalidExtension(unknown.clone()));
        }
    }

    let submission = cli.submission.clone().unwrap_or_default();
    if cli.archive && !submission.is_file() {
        return Err(SessionError::NotAFile(submission));
    }
    if !cli.archive && !submission.is_dir() {
        return Err(SessionError::NotADirectory(submission));
    }
    Ok(submission)
}

/// Build the submission, run every pass and print the report.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(submission = %config.submission.display())
)]
fn test_submission<W: Write>(
    config: &HarnessConfig,
    out: &mut W,
    color: ColorMode,
    is_tty: bool,
) -> Result<bool, SessionError> {
    jlt_submission::prepare(config, out)?;
    write_banner(out, &config.prefix, &config.backends, &config.extensions)?;

    let mut driver = OrchestrationDriver::new(config);
    let report = driver.run(&mut ConsoleProgress::new(&mut *out))?;
    Ok(driver.report(&report, &mut *out, color, is_tty)?)
}
