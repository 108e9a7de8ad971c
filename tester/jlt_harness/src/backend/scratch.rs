//! Uniquely named scratch files in the working directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::error::HarnessError;

/// Factory for scratch files. Each file is deleted when its handle drops.
#[derive(Clone, Debug)]
pub struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Scratch { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create an empty file named `<prefix><random><suffix>`.
    pub fn file(&self, prefix: &str, suffix: &str) -> Result<NamedTempFile, HarnessError> {
        Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(&self.dir)
            .map_err(|source| self.error(source))
    }

    /// Create a scratch file holding `contents`.
    pub fn file_with(
        &self,
        prefix: &str,
        suffix: &str,
        contents: &[u8],
    ) -> Result<NamedTempFile, HarnessError> {
        let mut file = self.file(prefix, suffix)?;
        file.write_all(contents)
            .and_then(|()| file.flush())
            .map_err(|source| self.error(source))?;
        Ok(file)
    }

    fn error(&self, source: std::io::Error) -> HarnessError {
        HarnessError::Scratch {
            dir: self.dir.clone(),
            source,
        }
    }
}
