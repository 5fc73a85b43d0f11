//! Fatal conditions that abort a check run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that prevent a meaningful verdict.
///
/// Structural mismatches are never errors; they are collected as
/// [`CheckFailure`](crate::CheckFailure) records instead.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to list {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("run log: {0}")]
    Log(#[from] std::io::Error),
}

impl CheckError {
    pub(crate) fn read_input(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::ReadInput { path, source }
    }
}

/// Read a whole input file, mapping failure to [`CheckError::ReadInput`].
pub fn read_input(path: &std::path::Path) -> Result<String, CheckError> {
    std::fs::read_to_string(path).map_err(CheckError::read_input(path))
}
