//! x86 backends: NASM assembly through `nasm` and `clang`.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::NamedTempFile;

use super::{require_runtime, Backend, ObjectFormat, Scratch, WordWidth};
use crate::config::Toolchain;
use crate::error::HarnessError;
use crate::process::run_tool;

/// Links x86 assembly against `runtimex86.o` or `runtimex64.o`.
#[derive(Clone, Debug)]
pub struct NasmBackend {
    toolchain: Toolchain,
    runtime: PathBuf,
    scratch: Scratch,
    width: WordWidth,
    format: ObjectFormat,
}

impl NasmBackend {
    pub fn new(
        toolchain: Toolchain,
        runtime: PathBuf,
        scratch: Scratch,
        width: WordWidth,
        format: ObjectFormat,
    ) -> Self {
        NasmBackend {
            toolchain,
            runtime,
            scratch,
            width,
            format,
        }
    }
}

impl Backend for NasmBackend {
    fn assemble(&self, code: &[u8]) -> Result<NamedTempFile, HarnessError> {
        let source = self.scratch.file_with("test_x86_", ".s", code)?;
        let object = self.scratch.file("test_x86_", ".o")?;

        run_tool(
            Command::new(&self.toolchain.nasm)
                .arg("-f")
                .arg(self.format.nasm_format(self.width))
                .arg(source.path())
                .arg("-o")
                .arg(object.path()),
        )?;
        Ok(object)
    }

    fn link(&self, object: &Path, output: &Path) -> Result<(), HarnessError> {
        require_runtime(&self.runtime)?;

        let mut cmd = Command::new(&self.toolchain.cc);
        if self.width == WordWidth::Bits32 {
            // 32-bit objects need the 32-bit C runtime on 64-bit hosts.
            cmd.arg("-m32");
        }
        cmd.arg(object).arg(&self.runtime).arg("-o").arg(output);
        run_tool(&mut cmd)?;
        Ok(())
    }
}
