//! Error types for the transformer module.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Diagnostic used when the transformer fails without writing to stderr.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Errors that can occur while running the external transformer.
#[derive(Debug, Error)]
pub enum TransformerError {
    /// The transformer executable is missing or cannot run.
    #[error("Transformer unavailable at {program}: {reason}")]
    Unavailable { program: PathBuf, reason: String },

    /// The transformer ran and exited with a nonzero status.
    #[error("{diagnostic}")]
    InvocationFailed {
        exit_code: Option<i32>,
        diagnostic: String,
    },

    /// The transformer did not finish within its time budget.
    #[error("Transformer timed out after {:.1}s", .timeout.as_secs_f64())]
    Timeout { timeout: Duration },

    /// Exit status was zero but the output file is not there.
    #[error("Transformer exited successfully but did not write {path}")]
    OutputMissing { path: PathBuf },

    /// I/O error while talking to the process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransformerError {
    /// Creates an invocation failure from captured stderr.
    ///
    /// Blank stderr becomes [`UNKNOWN_ERROR`].
    pub fn invocation_failed(exit_code: Option<i32>, stderr: &str) -> Self {
        let trimmed = stderr.trim();
        Self::InvocationFailed {
            exit_code,
            diagnostic: if trimmed.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                trimmed.to_string()
            },
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(program: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            program: program.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_failed_keeps_stderr() {
        let err = TransformerError::invocation_failed(Some(64), "no pandoc writer for html5\n");
        assert_eq!(err.to_string(), "no pandoc writer for html5");
        assert!(matches!(
            err,
            TransformerError::InvocationFailed {
                exit_code: Some(64),
                ..
            }
        ));
    }

    #[test]
    fn test_invocation_failed_blank_stderr() {
        let err = TransformerError::invocation_failed(Some(1), "  \n");
        assert_eq!(err.to_string(), UNKNOWN_ERROR);
    }

    #[test]
    fn test_timeout_message() {
        let err = TransformerError::Timeout {
            timeout: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "Transformer timed out after 30.0s");
    }
}
