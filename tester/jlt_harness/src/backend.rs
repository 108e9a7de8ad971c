//! Assembling and linking generated code.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 BackendImpl                  │
//! │  - Chosen once per pass from BackendKind     │
//! │  - link_program: assemble, link, a.out       │
//! └──────────────────────┬───────────────────────┘
//!              ┌─────────┴──────────┐
//!              ▼                    ▼
//!      ┌──────────────┐     ┌──────────────┐
//!      │ LlvmBackend  │     │ NasmBackend  │
//!      │ llvm-as      │     │ nasm         │
//!      │ llvm-link    │     │ clang        │
//!      │ clang        │     │ (32/64-bit)  │
//!      └──────────────┘     └──────────────┘
//! ```
//!
//! Every intermediate file is a [`tempfile::NamedTempFile`] in the working
//! directory, so it is removed when the stage returns, including on error.

mod llvm;
mod nasm;
mod scratch;

pub use llvm::LlvmBackend;
pub use nasm::NasmBackend;
pub use scratch::Scratch;

use std::fmt;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::HarnessConfig;
use crate::error::HarnessError;

/// A session pass: type checking only, or one code-generation target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    TypecheckOnly,
    Llvm,
    /// 32-bit x86 assembly.
    X86,
    /// 64-bit x86 assembly.
    X64,
}

impl BackendKind {
    /// Short name used in status lines and on the command line.
    pub fn label(self) -> &'static str {
        match self {
            BackendKind::TypecheckOnly => "typecheck",
            BackendKind::Llvm => "llvm",
            BackendKind::X86 => "x86",
            BackendKind::X64 => "x64",
        }
    }

    /// Name of the compiler executable the submission builds for this pass.
    pub fn compiler_name(self, prefix: &str) -> String {
        match self {
            BackendKind::TypecheckOnly | BackendKind::Llvm => prefix.to_string(),
            BackendKind::X86 | BackendKind::X64 => format!("{prefix}_{}", self.label()),
        }
    }

    /// Runtime artifact in the submission's `lib/`, linked into every program.
    pub fn runtime_artifact(self) -> Option<&'static str> {
        match self {
            BackendKind::TypecheckOnly => None,
            BackendKind::Llvm => Some("runtime.bc"),
            BackendKind::X86 => Some("runtimex86.o"),
            BackendKind::X64 => Some("runtimex64.o"),
        }
    }

    /// Whether this pass generates, links and runs code.
    pub fn is_concrete(self) -> bool {
        !matches!(self, BackendKind::TypecheckOnly)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Word width of an x86 target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordWidth {
    Bits32,
    Bits64,
}

/// Host object file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectFormat {
    Elf,
    MachO,
}

impl ObjectFormat {
    /// The format native to the host this harness was built for.
    pub fn host() -> Self {
        if cfg!(target_vendor = "apple") {
            ObjectFormat::MachO
        } else {
            ObjectFormat::Elf
        }
    }

    /// Value for `nasm -f`.
    pub fn nasm_format(self, width: WordWidth) -> &'static str {
        match (self, width) {
            (ObjectFormat::Elf, WordWidth::Bits32) => "elf32",
            (ObjectFormat::Elf, WordWidth::Bits64) => "elf64",
            (ObjectFormat::MachO, WordWidth::Bits32) => "macho32",
            (ObjectFormat::MachO, WordWidth::Bits64) => "macho64",
        }
    }
}

/// A runnable program produced by a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkOutcome {
    pub executable: PathBuf,
}

/// The two steps every backend performs.
pub trait Backend {
    /// Turn generated code into a linkable artifact held in a scratch file.
    fn assemble(&self, code: &[u8]) -> Result<NamedTempFile, HarnessError>;

    /// Link `object` against the runtime, writing the program to `output`.
    fn link(&self, object: &Path, output: &Path) -> Result<(), HarnessError>;
}

/// Backend selected for a pass.
///
/// Enum dispatch keeps backend selection exhaustive. X86 and X64 share an
/// implementation parameterized by word width.
#[derive(Clone, Debug)]
pub enum BackendImpl {
    Llvm(LlvmBackend),
    X86(NasmBackend),
    X64(NasmBackend),
}

/// Forward a `Backend` method to the active variant.
macro_rules! impl_backend_forward {
    ($method:ident($($arg:ident: $ty:ty),* $(,)?) -> $ret:ty) => {
        fn $method(&self, $($arg: $ty),*) -> $ret {
            match self {
                Self::Llvm(b) => b.$method($($arg),*),
                Self::X86(b) | Self::X64(b) => b.$method($($arg),*),
            }
        }
    };
}

impl Backend for BackendImpl {
    impl_backend_forward!(assemble(code: &[u8]) -> Result<NamedTempFile, HarnessError>);
    impl_backend_forward!(link(object: &Path, output: &Path) -> Result<(), HarnessError>);
}

impl BackendImpl {
    /// Select the implementation for `kind`. `None` for type checking only.
    pub fn for_kind(kind: BackendKind, config: &HarnessConfig) -> Option<Self> {
        let runtime = config.lib_dir().join(kind.runtime_artifact()?);
        let scratch = Scratch::new(&config.workdir);
        let toolchain = config.toolchain.clone();
        let format = config.object_format;

        let backend = match kind {
            BackendKind::TypecheckOnly => return None,
            BackendKind::Llvm => {
                BackendImpl::Llvm(LlvmBackend::new(toolchain, runtime, scratch))
            }
            BackendKind::X86 => BackendImpl::X86(NasmBackend::new(
                toolchain,
                runtime,
                scratch,
                WordWidth::Bits32,
                format,
            )),
            BackendKind::X64 => BackendImpl::X64(NasmBackend::new(
                toolchain,
                runtime,
                scratch,
                WordWidth::Bits64,
                format,
            )),
        };
        Some(backend)
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            BackendImpl::Llvm(_) => BackendKind::Llvm,
            BackendImpl::X86(_) => BackendKind::X86,
            BackendImpl::X64(_) => BackendKind::X64,
        }
    }

    /// Assemble and link `code` into `output`.
    ///
    /// Intermediate files are gone by the time this returns.
    pub fn link_program(&self, code: &[u8], output: &Path) -> Result<LinkOutcome, HarnessError> {
        let object = self.assemble(code)?;
        self.link(object.path(), output)?;
        Ok(LinkOutcome {
            executable: output.to_path_buf(),
        })
    }
}

/// Fail with `MissingArtifact` unless the runtime file exists.
fn require_runtime(runtime: &Path) -> Result<(), HarnessError> {
    if runtime.is_file() {
        Ok(())
    } else {
        Err(HarnessError::MissingArtifact {
            path: runtime.to_path_buf(),
        })
    }
}
