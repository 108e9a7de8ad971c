//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use jlt_harness::{BackendKind, ColorMode};

/// Test a Javalette compiler submission.
///
/// Without `--llvm`, `--x86` or `--x64` only parsing and type checking are tested.
#[derive(Parser, Debug)]
#[command(name = "jlt", version, about, long_about = None)]
pub struct Cli {
    /// Path to the submission directory, or to its archive with `--archive`
    #[arg(value_name = "submission", required_unless_present = "list")]
    pub submission: Option<PathBuf>,

    /// Compiler executable prefix
    #[arg(short = 's', value_name = "name", default_value = "jlc")]
    pub prefix: String,

    /// Test the LLVM backend
    #[arg(long)]
    pub llvm: bool,

    /// Test the 32-bit x86 backend
    #[arg(long)]
    pub x86: bool,

    /// Test the 64-bit x86 backend
    #[arg(long)]
    pub x64: bool,

    /// Test one or more extensions
    #[arg(short = 'x', value_name = "ext", num_args = 1..)]
    pub extensions: Vec<String>,

    /// Treat the submission as an archive
    #[arg(long)]
    pub archive: bool,

    /// Keep the unpacked archive (only useful with --archive)
    #[arg(long)]
    pub noclean: bool,

    /// List the available extensions
    #[arg(long)]
    pub list: bool,

    /// Root of the test suite
    #[arg(long, value_name = "dir", default_value = "testsuite")]
    pub testsuite: PathBuf,

    /// When to color the report
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

impl Cli {
    /// Requested backends, in the order they are tested.
    pub fn backends(&self) -> Vec<BackendKind> {
        [
            (self.llvm, BackendKind::Llvm),
            (self.x86, BackendKind::X86),
            (self.x64, BackendKind::X64),
        ]
        .into_iter()
        .filter_map(|(requested, kind)| requested.then_some(kind))
        .collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => ColorMode::Auto,
            ColorChoice::Always => ColorMode::Always,
            ColorChoice::Never => ColorMode::Never,
        }
    }
}
