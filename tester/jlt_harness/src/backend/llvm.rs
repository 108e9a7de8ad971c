//! LLVM backend: textual IR through `llvm-as`, `llvm-link` and `clang`.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::NamedTempFile;

use super::{require_runtime, Backend, Scratch};
use crate::config::Toolchain;
use crate::error::HarnessError;
use crate::process::run_tool;

/// Links LLVM IR against the submission's `runtime.bc`.
#[derive(Clone, Debug)]
pub struct LlvmBackend {
    toolchain: Toolchain,
    runtime: PathBuf,
    scratch: Scratch,
}

impl LlvmBackend {
    pub fn new(toolchain: Toolchain, runtime: PathBuf, scratch: Scratch) -> Self {
        LlvmBackend {
            toolchain,
            runtime,
            scratch,
        }
    }
}

impl Backend for LlvmBackend {
    fn assemble(&self, code: &[u8]) -> Result<NamedTempFile, HarnessError> {
        let source = self.scratch.file_with("test_llvm_", ".ll", code)?;
        let bitcode = self.scratch.file("test_llvm_", ".bc")?;

        run_tool(
            Command::new(&self.toolchain.llvm_as)
                .arg(source.path())
                .arg("-o")
                .arg(bitcode.path()),
        )?;
        Ok(bitcode)
    }

    fn link(&self, object: &Path, output: &Path) -> Result<(), HarnessError> {
        require_runtime(&self.runtime)?;
        let linked = self.scratch.file("test_llvm_main_", ".bc")?;

        run_tool(
            Command::new(&self.toolchain.llvm_link)
                .arg(object)
                .arg(&self.runtime)
                .arg("-o")
                .arg(linked.path()),
        )?;
        run_tool(
            Command::new(&self.toolchain.cc)
                .arg(linked.path())
                .arg("-o")
                .arg(output),
        )?;
        Ok(())
    }
}
