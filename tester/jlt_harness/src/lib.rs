//! Test execution pipeline for Javalette compiler submissions.
//!
//! A session discovers fixture programs, feeds each one to the
//! compiler-under-test and, when a backend is requested, assembles, links
//! and runs the generated code against the expected output.
//!
//! # Pipeline
//!
//! ```text
//! TestCatalog ──▶ CompilerInvoker ──▶ BackendImpl ──▶ ProgramRunner
//!                        │               (llvm/x86/x64)      │
//!                        └──────────────┬────────────────────┘
//!                                       ▼
//!                               ResultAggregator ──▶ ReportRenderer
//! ```
//!
//! The [`OrchestrationDriver`] sequences one pass per requested backend, or a
//! single type-checking pass when no backend is requested.
//!
//! Per-test mismatches are data ([`TestVerdict::Failed`]). Anything that
//! points at a broken build or environment is a [`HarnessError`] and aborts
//! the session.

pub mod aggregate;
pub mod backend;
pub mod catalog;
pub mod compile;
pub mod config;
pub mod driver;
pub mod error;
pub mod process;
pub mod program;
pub mod report;

#[cfg(test)]
mod test_helpers;

pub use aggregate::{
    FailureDetail, FailureRecord, PassReport, ResultAggregator, SessionReport, TestVerdict,
};
pub use backend::{Backend, BackendImpl, BackendKind, LinkOutcome, ObjectFormat, WordWidth};
pub use catalog::{available_extensions, Expectation, TestCase, TestCatalog};
pub use compile::{classify, CompileOutcome, CompilerInvoker};
pub use config::{HarnessConfig, Toolchain};
pub use driver::{
    ConsoleProgress, DriverState, ExecutableGuard, NoProgress, OrchestrationDriver, ProgressSink,
};
pub use error::HarnessError;
pub use program::{ProgramRunner, RunOutcome};
pub use report::{indent_with, status_line, write_banner, ColorMode, ReportRenderer};
