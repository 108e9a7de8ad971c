//! Preparing a Javalette compiler submission for testing.
//!
//! A submission is a directory (optionally shipped as a `partX-N` tarball)
//! holding `doc/`, `lib/`, `src/` and a `Makefile`. Preparation unpacks it,
//! checks that layout, runs `make`, checks that the compiler executables
//! exist and assembles the runtime library for each requested backend.

pub mod archive;
pub mod build;
pub mod error;
pub mod layout;
pub mod runtime;

pub use archive::{check_archive_name, tar_flags, unpack, UnpackedSubmission};
pub use build::{check_executables, run_make};
pub use error::SubmissionError;
pub use layout::check_layout;
pub use runtime::prepare_runtimes;

use std::io::Write;

use jlt_harness::HarnessConfig;

/// Check, build and prepare the submission described by `config`.
///
/// Progress lines go to `out`.
pub fn prepare<W: Write>(config: &HarnessConfig, out: &mut W) -> Result<(), SubmissionError> {
    check_layout(&config.submission)?;
    run_make(&config.submission, &config.toolchain.make, out)?;
    check_executables(config, out)?;
    prepare_runtimes(config, out)
}

/// Run one preparation step, reporting `- <label> ... Ok.` or `Failed.`.
pub(crate) fn step<W, T>(
    out: &mut W,
    label: &str,
    f: impl FnOnce() -> Result<T, SubmissionError>,
) -> Result<T, SubmissionError>
where
    W: Write,
{
    write!(out, "- {label} ... ")?;
    out.flush()?;
    match f() {
        Ok(value) => {
            writeln!(out, "Ok.")?;
            Ok(value)
        }
        Err(err) => {
            writeln!(out, "Failed.")?;
            Err(err)
        }
    }
}
