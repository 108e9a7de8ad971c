//! Errors raised while preparing a submission.

use std::io;
use std::path::PathBuf;

use jlt_harness::HarnessError;
use thiserror::Error;

/// A submission that cannot be tested.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Archive is not named according to submission guidelines")]
    ArchiveName { name: String },

    #[error("Unpacking failed with:\n{stderr}")]
    Unpack { stderr: String },

    #[error("cannot create unpack directory in {}: {source}", parent.display())]
    UnpackDir {
        parent: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Submission lacks directory: \"{0}\"")]
    MissingDirectory(&'static str),

    #[error("Submission lacks Makefile in root")]
    MissingMakefile,

    #[error("Build did not produce the executable \"{name}\" required for {purpose}")]
    MissingExecutable { name: String, purpose: String },

    #[error("The file \"{0}\" is not executable")]
    NotExecutable(String),

    #[error("\"{0}\" is missing from \"lib\"")]
    MissingRuntimeSource(&'static str),

    #[error("invalid archive name pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error("cannot write progress: {0}")]
    Output(#[from] io::Error),
}
