//! Session configuration.

use std::path::PathBuf;

use crate::backend::{BackendKind, ObjectFormat};

/// Names (or paths) of the external programs the pipeline drives.
///
/// Defaults to the programs found on `PATH`. Tests substitute scripts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    /// LLVM assembler, textual IR to bitcode.
    pub llvm_as: PathBuf,
    /// LLVM bitcode linker.
    pub llvm_link: PathBuf,
    /// Native compiler driver used for the final link.
    pub cc: PathBuf,
    /// Assembler for the x86 backends.
    pub nasm: PathBuf,
    pub make: PathBuf,
    pub tar: PathBuf,
}

impl Default for Toolchain {
    fn default() -> Self {
        Toolchain {
            llvm_as: PathBuf::from("llvm-as"),
            llvm_link: PathBuf::from("llvm-link"),
            cc: PathBuf::from("clang"),
            nasm: PathBuf::from("nasm"),
            make: PathBuf::from("make"),
            tar: PathBuf::from("tar"),
        }
    }
}

/// Everything a session needs to know about the submission under test.
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    /// Root of the built submission (holds the compiler executables and `lib/`).
    pub submission: PathBuf,
    /// Compiler executable prefix, `jlc` by default.
    pub prefix: String,
    /// Requested backends in run order. Empty means type checking only.
    pub backends: Vec<BackendKind>,
    /// Extension test directories to include.
    pub extensions: Vec<String>,
    /// Root of the fixture tree (`good/`, `bad/`, `extensions/`).
    pub testsuite: PathBuf,
    /// Scratch directory for temporaries and `a.out`.
    pub workdir: PathBuf,
    pub toolchain: Toolchain,
    pub object_format: ObjectFormat,
}

impl HarnessConfig {
    pub const DEFAULT_PREFIX: &'static str = "jlc";

    /// Create a configuration for `submission` with default settings.
    pub fn new(submission: impl Into<PathBuf>) -> Self {
        HarnessConfig {
            submission: submission.into(),
            prefix: Self::DEFAULT_PREFIX.to_string(),
            backends: Vec::new(),
            extensions: Vec::new(),
            testsuite: PathBuf::from("testsuite"),
            workdir: PathBuf::from("."),
            toolchain: Toolchain::default(),
            object_format: ObjectFormat::host(),
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_backends(mut self, backends: Vec<BackendKind>) -> Self {
        self.backends = backends;
        self
    }

    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    #[must_use]
    pub fn with_testsuite(mut self, testsuite: impl Into<PathBuf>) -> Self {
        self.testsuite = testsuite.into();
        self
    }

    #[must_use]
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    #[must_use]
    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// The passes a session runs, in order.
    ///
    /// A single type-checking pass when no backend was requested.
    pub fn passes(&self) -> Vec<BackendKind> {
        if self.backends.is_empty() {
            vec![BackendKind::TypecheckOnly]
        } else {
            self.backends.clone()
        }
    }

    /// Path of the compiler executable used for `backend`.
    pub fn compiler_path(&self, backend: BackendKind) -> PathBuf {
        self.submission.join(backend.compiler_name(&self.prefix))
    }

    /// The submission's runtime library directory.
    pub fn lib_dir(&self) -> PathBuf {
        self.submission.join("lib")
    }

    /// Where the final link places the test program.
    pub fn executable_path(&self) -> PathBuf {
        self.workdir.join("a.out")
    }
}
