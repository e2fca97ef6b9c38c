//! Types for the transformer module.

use std::path::PathBuf;
use std::time::Duration;

use crate::format::Format;

/// One call to the external transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Input document.
    pub source_path: PathBuf,
    /// Where the transformer must write its result.
    pub output_path: PathBuf,
    /// Format of the input document.
    pub source_format: Format,
    /// Format to produce.
    pub target_format: Format,
    /// Budget after which the process is killed.
    pub timeout: Duration,
}

/// Result of a transformer call that exited with status zero.
#[derive(Debug, Clone)]
pub struct InvocationOutput {
    /// Output path handed to the transformer.
    pub output_path: PathBuf,
    /// Anything the transformer printed on stderr (warnings).
    pub stderr: String,
    /// Wall time of the process in milliseconds.
    pub duration_ms: u64,
}
