//! Error types for the resolver module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while computing an output location.
#[derive(Debug, Error)]
pub enum PathError {
    /// Failed to create the destination directory.
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source path has no file name to derive an output name from.
    #[error("Cannot derive an output name from: {path}")]
    InvalidSourcePath { path: PathBuf },

    /// The working directory fallback could not be read.
    #[error("Current directory unavailable")]
    CurrentDirUnavailable(#[source] std::io::Error),
}

impl PathError {
    /// Creates a directory creation error.
    pub fn directory_creation_failed(path: PathBuf, source: std::io::Error) -> Self {
        Self::DirectoryCreationFailed { path, source }
    }
}
