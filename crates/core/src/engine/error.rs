//! Error types for the engine module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::format::Format;
use crate::resolver::PathError;
use crate::transformer::TransformerError;

/// Why a single request failed. Never aborts a batch.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The source extension is not in the catalog.
    #[error("Unsupported source format '{extension}' for {path}")]
    UnsupportedSourceFormat { path: PathBuf, extension: String },

    /// The catalog has no edge from the source format to the target.
    #[error("Cannot convert {from} to {to}")]
    IncompatibleConversion { from: Format, to: Format },

    /// The source does not exist or is not a regular file.
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// The source exceeds the configured size limit.
    #[error("{path} is {size_bytes} bytes, limit is {limit_bytes}")]
    FileTooLarge {
        path: PathBuf,
        size_bytes: u64,
        limit_bytes: u64,
    },

    /// Output location could not be prepared.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The transformer failed for this file.
    #[error(transparent)]
    Transformer(#[from] TransformerError),

    /// The batch was cancelled before this request started.
    #[error("Cancelled before start")]
    Cancelled,
}

impl ConversionError {
    /// Classifies the error for reporting.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UnsupportedSourceFormat { .. } => FailureKind::UnsupportedSourceFormat,
            Self::IncompatibleConversion { .. } => FailureKind::IncompatibleConversion,
            Self::SourceNotFound { .. } => FailureKind::SourceNotFound,
            Self::FileTooLarge { .. } => FailureKind::FileTooLarge,
            Self::Path(PathError::DirectoryCreationFailed { .. }) => {
                FailureKind::DirectoryCreationFailed
            }
            Self::Path(_) => FailureKind::InvalidOutputPath,
            Self::Transformer(TransformerError::Timeout { .. }) => FailureKind::TransformerTimeout,
            Self::Transformer(TransformerError::Unavailable { .. }) => {
                FailureKind::TransformerUnavailable
            }
            Self::Transformer(_) => FailureKind::InvocationFailure,
            Self::Cancelled => FailureKind::Cancelled,
        }
    }
}

/// Serializable classification of a failed outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnsupportedSourceFormat,
    IncompatibleConversion,
    SourceNotFound,
    FileTooLarge,
    DirectoryCreationFailed,
    InvalidOutputPath,
    InvocationFailure,
    TransformerTimeout,
    TransformerUnavailable,
    Cancelled,
}

impl FailureKind {
    /// Returns the snake_case name used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedSourceFormat => "unsupported_source_format",
            Self::IncompatibleConversion => "incompatible_conversion",
            Self::SourceNotFound => "source_not_found",
            Self::FileTooLarge => "file_too_large",
            Self::DirectoryCreationFailed => "directory_creation_failed",
            Self::InvalidOutputPath => "invalid_output_path",
            Self::InvocationFailure => "invocation_failure",
            Self::TransformerTimeout => "transformer_timeout",
            Self::TransformerUnavailable => "transformer_unavailable",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that prevent an engine from being built.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The transformer failed its availability check.
    #[error("Transformer failed its availability check")]
    TransformerUnavailable(#[source] TransformerError),

    /// The engine configuration is unusable.
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_kind_mapping() {
        let timeout: ConversionError = TransformerError::Timeout {
            timeout: Duration::from_secs(1),
        }
        .into();
        assert_eq!(timeout.kind(), FailureKind::TransformerTimeout);

        let failed: ConversionError = TransformerError::invocation_failed(Some(1), "boom").into();
        assert_eq!(failed.kind(), FailureKind::InvocationFailure);

        let missing: ConversionError = TransformerError::OutputMissing {
            path: PathBuf::from("out.html"),
        }
        .into();
        assert_eq!(missing.kind(), FailureKind::InvocationFailure);

        let invalid: ConversionError = PathError::InvalidSourcePath {
            path: PathBuf::from("/"),
        }
        .into();
        assert_eq!(invalid.kind(), FailureKind::InvalidOutputPath);

        assert_eq!(ConversionError::Cancelled.kind(), FailureKind::Cancelled);
    }

    #[test]
    fn test_invocation_failure_display_is_verbatim() {
        let err: ConversionError =
            TransformerError::invocation_failed(Some(64), "no pandoc writer for html5").into();
        assert_eq!(err.to_string(), "no pandoc writer for html5");
    }

    #[test]
    fn test_incompatible_display() {
        let err = ConversionError::IncompatibleConversion {
            from: Format::Markdown,
            to: Format::PlainText,
        };
        assert_eq!(err.to_string(), "Cannot convert Markdown to plain text");
    }

    #[test]
    fn test_failure_kind_serialization() {
        let json = serde_json::to_string(&FailureKind::TransformerTimeout).unwrap();
        assert_eq!(json, "\"transformer_timeout\"");
        assert_eq!(FailureKind::DirectoryCreationFailed.to_string(), "directory_creation_failed");
    }
}
