//! Test helpers: shell-script stand-ins for compilers and tools.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Expectation, TestCase};

/// Write an executable `#!/bin/sh` script named `name` into `dir`.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Create `<dir>/<stem>.jl` plus the optional fixtures and return its test case.
pub fn write_case(
    dir: &Path,
    stem: &str,
    expectation: Expectation,
    input: Option<&str>,
    output: Option<&str>,
) -> TestCase {
    fs::create_dir_all(dir).unwrap();
    let base = dir.join(stem);
    fs::write(base.with_extension("jl"), "int main() { return 0; }\n").unwrap();
    if let Some(input) = input {
        fs::write(base.with_extension("input"), input).unwrap();
    }
    if let Some(output) = output {
        fs::write(base.with_extension("output"), output).unwrap();
    }
    TestCase::new(base, expectation)
}
