//! Building the submission and checking its compiler executables.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use jlt_harness::process::run_tool;
use jlt_harness::{BackendKind, HarnessConfig};

use crate::error::SubmissionError;
use crate::step;

/// Run `make -C <submission>`.
pub fn run_make<W: Write>(
    submission: &Path,
    make: &Path,
    out: &mut W,
) -> Result<(), SubmissionError> {
    let label = format!("Running \"make\" in {}", submission.display());
    step(out, &label, || {
        let mut cmd = Command::new(make);
        cmd.arg("-C").arg(submission);
        run_tool(&mut cmd)?;
        Ok(())
    })
}

/// Check that the build produced an executable compiler for every pass.
pub fn check_executables<W: Write>(
    config: &HarnessConfig,
    out: &mut W,
) -> Result<(), SubmissionError> {
    step(out, "Checking for executable(s)", || {
        for kind in config.passes() {
            check_executable(config, kind)?;
        }
        Ok(())
    })
}

fn check_executable(config: &HarnessConfig, kind: BackendKind) -> Result<(), SubmissionError> {
    let name = kind.compiler_name(&config.prefix);
    let path = config.compiler_path(kind);
    if !path.is_file() {
        let purpose = match kind {
            BackendKind::TypecheckOnly => "type checking".to_string(),
            concrete => format!("the {concrete} backend"),
        };
        return Err(SubmissionError::MissingExecutable { name, purpose });
    }
    if !is_executable(&path) {
        return Err(SubmissionError::NotExecutable(name));
    }
    Ok(())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|meta| meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
