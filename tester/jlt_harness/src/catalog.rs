//! Test case discovery.
//!
//! A fixture tree looks like:
//!
//! ```text
//! testsuite/
//!   good/                 programs the compiler must accept
//!   bad/                  programs the compiler must reject
//!   extensions/<name>/    accepted programs exercising a language extension
//! ```
//!
//! Each `N.jl` is one test case. `N.input` and `N.output` next to it are the
//! optional stdin and expected stdout for the run stage.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of compiler source files.
pub const SOURCE_EXTENSION: &str = "jl";

/// What the compiler is expected to do with a test case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Expectation {
    /// The compiler must accept the program.
    Good,
    /// The compiler must reject the program.
    Bad,
}

impl Expectation {
    /// The stderr text a conforming compiler produces, shown in failure reports.
    pub fn expected_stderr(self) -> &'static str {
        match self {
            Expectation::Good => "OK",
            Expectation::Bad => "ERROR",
        }
    }
}

/// A single discovered test program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    /// Path of the program without extension, e.g. `testsuite/good/core001`.
    pub base: PathBuf,
    pub expectation: Expectation,
    /// Stdin for the run stage, if the fixture exists.
    pub input: Option<PathBuf>,
    /// Expected stdout for the run stage, if the fixture exists.
    pub output: Option<PathBuf>,
}

impl TestCase {
    /// Build a test case for `base`, attaching the fixtures that exist on disk.
    pub fn new(base: PathBuf, expectation: Expectation) -> Self {
        let input = Some(with_suffix(&base, "input")).filter(|p| p.is_file());
        let output = Some(with_suffix(&base, "output")).filter(|p| p.is_file());
        TestCase {
            base,
            expectation,
            input,
            output,
        }
    }

    /// The `.jl` source file.
    pub fn source(&self) -> PathBuf {
        with_suffix(&self.base, SOURCE_EXTENSION)
    }

    /// Display name used in reports, the base path.
    pub fn name(&self) -> String {
        self.base.display().to_string()
    }

    pub fn is_good(&self) -> bool {
        self.expectation == Expectation::Good
    }
}

/// Append `.suffix` to a path without touching dots already in the file name.
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// The ordered list of test cases for a session.
#[derive(Clone, Debug, Default)]
pub struct TestCatalog {
    cases: Vec<TestCase>,
}

impl TestCatalog {
    /// Discover `good/`, `bad/` and each requested `extensions/<name>/` under `testsuite`.
    pub fn discover(testsuite: &Path, extensions: &[String]) -> Self {
        let mut dirs = vec![
            (testsuite.join("good"), Expectation::Good),
            (testsuite.join("bad"), Expectation::Bad),
        ];
        for ext in extensions {
            dirs.push((testsuite.join("extensions").join(ext), Expectation::Good));
        }
        Self::from_dirs(&dirs)
    }

    /// Scan each directory in order. A missing directory contributes nothing.
    pub fn from_dirs(dirs: &[(PathBuf, Expectation)]) -> Self {
        let mut cases = Vec::new();
        for (dir, expectation) in dirs {
            let found = scan_dir(dir, *expectation);
            tracing::debug!(dir = %dir.display(), count = found.len(), "scanned fixtures");
            cases.extend(found);
        }
        TestCatalog { cases }
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }
}

impl<'a> IntoIterator for &'a TestCatalog {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collect the `.jl` files directly inside `dir`, sorted by file name.
fn scan_dir(dir: &Path, expectation: Expectation) -> Vec<TestCase> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut bases: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|e| e == SOURCE_EXTENSION)
        })
        .map(|path| path.with_extension(""))
        .collect();
    bases.sort();

    bases
        .into_iter()
        .map(|base| TestCase::new(base, expectation))
        .collect()
}

/// Names of the extension test directories under `testsuite/extensions`, sorted.
pub fn available_extensions(testsuite: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(testsuite.join("extensions"))? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests;
