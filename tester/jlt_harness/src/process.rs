//! Running external tools.
//!
//! Every tool the harness drives (assemblers, linkers, `make`, `tar`) goes
//! through [`run_tool`]: output is captured, stdin is closed, and any
//! launch failure or non-zero exit becomes a session-fatal [`HarnessError`].

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::HarnessError;

/// Run `cmd` to completion, failing unless it exits successfully.
pub fn run_tool(cmd: &mut Command) -> Result<Output, HarnessError> {
    let tool = tool_name(cmd.get_program());
    let command = command_line(cmd);
    tracing::debug!(%command, "running tool");

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| HarnessError::ToolLaunch {
            tool: tool.clone(),
            source,
        })?;

    if output.status.success() {
        Ok(output)
    } else {
        tracing::debug!(%command, status = ?output.status, "tool failed");
        Err(HarnessError::ToolFailed {
            tool,
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            command,
        })
    }
}

/// Render a command line for diagnostics.
pub fn command_line(cmd: &Command) -> String {
    let mut line = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Short name of a program, `clang` for `/usr/bin/clang`.
fn tool_name(program: &OsStr) -> String {
    Path::new(program)
        .file_name()
        .unwrap_or(program)
        .to_string_lossy()
        .into_owned()
}
