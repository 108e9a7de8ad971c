//! Assembling the submission's runtime library.
//!
//! `lib/runtime.ll` becomes `runtime.bc` for the LLVM backend, and
//! `lib/runtime.s` becomes `runtimex86.o` / `runtimex64.o` for the x86
//! backends. The harness links these into every test program.

use std::io::Write;
use std::process::Command;

use jlt_harness::process::run_tool;
use jlt_harness::{BackendKind, HarnessConfig, WordWidth};

use crate::error::SubmissionError;
use crate::step;

/// Assemble the runtime artifact for every requested backend.
pub fn prepare_runtimes<W: Write>(
    config: &HarnessConfig,
    out: &mut W,
) -> Result<(), SubmissionError> {
    step(out, "Checking for runtime(s)", || {
        for &kind in &config.backends {
            prepare_runtime(config, kind)?;
        }
        Ok(())
    })
}

fn prepare_runtime(config: &HarnessConfig, kind: BackendKind) -> Result<(), SubmissionError> {
    let lib = config.lib_dir();
    let Some(artifact) = kind.runtime_artifact() else {
        return Ok(());
    };
    let target = lib.join(artifact);

    let mut cmd = match kind {
        BackendKind::TypecheckOnly => return Ok(()),
        BackendKind::Llvm => {
            let source = lib.join("runtime.ll");
            if !source.is_file() {
                return Err(SubmissionError::MissingRuntimeSource("runtime.ll"));
            }
            let mut cmd = Command::new(&config.toolchain.llvm_as);
            cmd.arg(source).arg("-o").arg(&target);
            cmd
        }
        BackendKind::X86 | BackendKind::X64 => {
            let source = lib.join("runtime.s");
            if !source.is_file() {
                return Err(SubmissionError::MissingRuntimeSource("runtime.s"));
            }
            let width = if kind == BackendKind::X86 {
                WordWidth::Bits32
            } else {
                WordWidth::Bits64
            };
            let mut cmd = Command::new(&config.toolchain.nasm);
            cmd.arg("-f")
                .arg(config.object_format.nasm_format(width))
                .arg(source)
                .arg("-o")
                .arg(&target);
            cmd
        }
    };

    run_tool(&mut cmd)?;
    tracing::debug!(backend = %kind, artifact = %target.display(), "assembled runtime");
    Ok(())
}
