//! Submission directory layout.

use std::path::Path;

use crate::error::SubmissionError;

/// Directories every submission carries at its root.
pub const REQUIRED_DIRS: [&str; 3] = ["doc", "lib", "src"];

/// Check for `doc/`, `lib/`, `src/` and a `Makefile` at the submission root.
pub fn check_layout(submission: &Path) -> Result<(), SubmissionError> {
    for dir in REQUIRED_DIRS {
        if !submission.join(dir).is_dir() {
            return Err(SubmissionError::MissingDirectory(dir));
        }
    }
    if !submission.join("Makefile").is_file() {
        return Err(SubmissionError::MissingMakefile);
    }
    Ok(())
}
