//! Session-fatal errors.
//!
//! A `HarnessError` means the submission or the environment is broken, not
//! that a single test failed. It unwinds out of the current pass and the
//! whole session.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error that aborts a test session.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The compiler-under-test could not be executed.
    #[error("Unable to execute {} for some reason: {source}", compiler.display())]
    CompilerLaunch {
        compiler: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The linked test program could not be executed.
    #[error("Unable to execute {} for some reason: {source}", executable.display())]
    ProgramLaunch {
        executable: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An external tool (assembler, linker, make, tar) could not be executed.
    #[error("{tool} could not be executed: {source}")]
    ToolLaunch {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// An external tool ran but exited unsuccessfully.
    #[error("{tool} failed with:\n{stderr}\n({}, command: {command})", exit_status_text(.exit_code))]
    ToolFailed {
        tool: String,
        exit_code: Option<i32>,
        stderr: String,
        command: String,
    },

    /// A fixture file exists in the catalog but could not be read.
    #[error("cannot read fixture {}: {source}", path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A scratch file could not be created or written in the working directory.
    #[error("cannot create scratch file in {}: {source}", dir.display())]
    Scratch {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A runtime artifact required for linking does not exist.
    #[error("runtime artifact {} is missing", path.display())]
    MissingArtifact { path: PathBuf },

    /// Writing the report failed.
    #[error("cannot write report: {0}")]
    Output(#[from] io::Error),
}

fn exit_status_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}
