//! Types for the engine module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::format::Format;
use crate::resolver::NamingPolicy;

use super::error::{ConversionError, FailureKind};

/// One file to convert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Document to convert.
    pub source_path: PathBuf,
    /// Format to produce.
    pub target_format: Format,
    /// Where to write the output, defaults to the source's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_directory: Option<PathBuf>,
    /// How to name the output file.
    #[serde(default)]
    pub naming_policy: NamingPolicy,
}

impl ConversionRequest {
    /// Creates a request with the default naming policy and no destination.
    pub fn new(source_path: impl Into<PathBuf>, target_format: Format) -> Self {
        Self {
            source_path: source_path.into(),
            target_format,
            destination_directory: None,
            naming_policy: NamingPolicy::default(),
        }
    }

    /// Sets the destination directory.
    pub fn with_destination(mut self, directory: impl Into<PathBuf>) -> Self {
        self.destination_directory = Some(directory.into());
        self
    }

    /// Sets the naming policy.
    pub fn with_naming(mut self, policy: NamingPolicy) -> Self {
        self.naming_policy = policy;
        self
    }

    /// Destination directory as a path reference.
    pub fn destination(&self) -> Option<&Path> {
        self.destination_directory.as_deref()
    }
}

/// Terminal record of one conversion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub request: ConversionRequest,
    /// Produced file, set only on success.
    pub output_path: Option<PathBuf>,
    pub success: bool,
    /// Failure message, or transformer warnings on success.
    pub diagnostic: Option<String>,
    pub failure: Option<FailureKind>,
    /// Size of the produced file.
    pub output_size_bytes: Option<u64>,
    pub duration_ms: u64,
}

impl ConversionOutcome {
    /// Creates a successful outcome.
    pub fn succeeded(
        request: ConversionRequest,
        output_path: PathBuf,
        output_size_bytes: u64,
        warnings: Option<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            request,
            output_path: Some(output_path),
            success: true,
            diagnostic: warnings,
            failure: None,
            output_size_bytes: Some(output_size_bytes),
            duration_ms,
        }
    }

    /// Creates a failed outcome from the error that ended the request.
    pub fn failed(request: ConversionRequest, error: &ConversionError, duration_ms: u64) -> Self {
        Self {
            request,
            output_path: None,
            success: false,
            diagnostic: Some(error.to_string()),
            failure: Some(error.kind()),
            output_size_bytes: None,
            duration_ms,
        }
    }

    /// Whether this request was skipped by cancellation.
    pub fn is_cancelled(&self) -> bool {
        self.failure == Some(FailureKind::Cancelled)
    }
}

/// Ordered outcomes of a batch, one per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub outcomes: Vec<ConversionOutcome>,
    /// Wall time for the whole batch.
    pub duration_ms: u64,
}

impl BatchResult {
    /// Number of requests.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of successful requests.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    /// Number of failed requests, cancelled ones included.
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Number of requests that never started.
    pub fn cancelled(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_cancelled()).count()
    }

    /// True when every request succeeded.
    pub fn is_complete_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }

    /// Output paths of the successful requests, in request order.
    pub fn successful_outputs(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| o.output_path.as_deref())
            .collect()
    }
}

/// Shared flag that abandons the rest of a batch once set.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Requests already running are not interrupted.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
