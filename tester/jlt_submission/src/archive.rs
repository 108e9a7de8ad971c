//! Archived submissions.
//!
//! The `N`th attempt at assignment `X` is named `partX-N.tar.gz` (or `.tgz`,
//! `.tar.bz2`, `.tar.xz`). It is unpacked with `tar` into a fresh
//! `testing_*` directory.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use jlt_harness::process::run_tool;
use jlt_harness::HarnessError;
use regex::Regex;
use tempfile::{Builder, TempDir};

use crate::error::SubmissionError;
use crate::step;

/// Accepted archive file names.
pub const ARCHIVE_PATTERN: &str = r"^part(A|B|C)-[1-9][0-9]*\.(tgz|tar\.(gz|bz2|xz))$";

/// Check the archive's file name against the submission guidelines.
pub fn check_archive_name(archive: &Path) -> Result<(), SubmissionError> {
    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if Regex::new(ARCHIVE_PATTERN)?.is_match(&name) {
        Ok(())
    } else {
        Err(SubmissionError::ArchiveName { name })
    }
}

/// `tar` flags for the archive's compression, chosen by its final extension.
pub fn tar_flags(archive: &Path) -> &'static str {
    match archive.extension().and_then(|e| e.to_str()) {
        Some("tar") => "xf",
        Some("gz" | "tgz") => "xzf",
        Some("bz2") => "xjf",
        _ => "xJf",
    }
}

/// A submission unpacked into a temporary directory.
///
/// The directory is removed on drop unless [`keep`](Self::keep) is called.
#[derive(Debug)]
pub struct UnpackedSubmission {
    dir: TempDir,
}

impl UnpackedSubmission {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Leave the directory on disk and return its path.
    #[allow(deprecated)]
    pub fn keep(self) -> PathBuf {
        self.dir.into_path()
    }
}

/// Validate and unpack `archive` into a new `testing_*` directory under `parent`.
pub fn unpack<W: Write>(
    archive: &Path,
    parent: &Path,
    tar: &Path,
    out: &mut W,
) -> Result<UnpackedSubmission, SubmissionError> {
    check_archive_name(archive)?;

    let dir = Builder::new()
        .prefix("testing_")
        .tempdir_in(parent)
        .map_err(|source| SubmissionError::UnpackDir {
            parent: parent.to_path_buf(),
            source,
        })?;

    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let label = format!("Unpacking {name} to \"{}\"", dir.path().display());
    step(out, &label, || {
        let mut cmd = Command::new(tar);
        cmd.arg(tar_flags(archive))
            .arg(archive)
            .arg("-C")
            .arg(dir.path());
        run_tool(&mut cmd).map_err(|err| match err {
            HarnessError::ToolFailed { stderr, .. } => SubmissionError::Unpack { stderr },
            other => SubmissionError::Harness(other),
        })
    })?;

    tracing::debug!(dir = %dir.path().display(), "unpacked submission");
    Ok(UnpackedSubmission { dir })
}
