//! Mock transformer for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::transformer::{Invocation, InvocationOutput, Transformer, TransformerError};

/// What the mock does when asked to convert a given source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockBehavior {
    /// Write the output file and exit cleanly.
    Succeed,
    /// Succeed after waiting.
    Delay(Duration),
    /// Exit nonzero with this stderr.
    Fail(String),
    /// Report a timeout.
    Timeout,
    /// Exit cleanly without writing the output file.
    SkipOutput,
}

/// Mock implementation of the Transformer trait.
///
/// Provides controllable behavior for testing:
/// - Records every invocation for assertions
/// - Writes a small output file on success
/// - Per-source failures, timeouts and missing outputs
/// - Simulated unavailability
///
/// # Example
///
/// ```rust,ignore
/// use docuflow_core::testing::{MockBehavior, MockTransformer};
///
/// let transformer = MockTransformer::new();
/// transformer
///     .set_behavior("/docs/bad.md", MockBehavior::Fail("no pandoc writer for html5".into()))
///     .await;
///
/// let engine = ConversionEngine::new(EngineConfig::default(), transformer.clone()).await?;
/// engine.convert_batch(&requests, &NoopReporter).await;
///
/// assert_eq!(transformer.invocation_count().await, requests.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransformer {
    /// Recorded invocations.
    invocations: Arc<RwLock<Vec<Invocation>>>,
    /// Behavior by source path, anything else succeeds.
    behaviors: Arc<RwLock<HashMap<PathBuf, MockBehavior>>>,
    /// Fail `validate` and every `run`.
    unavailable: Arc<RwLock<bool>>,
    /// Warnings printed on successful runs.
    warnings: Arc<RwLock<Option<String>>>,
}

impl MockTransformer {
    /// Create a new mock transformer that converts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded invocations.
    pub async fn recorded_invocations(&self) -> Vec<Invocation> {
        self.invocations.read().await.clone()
    }

    /// Get the number of invocations performed.
    pub async fn invocation_count(&self) -> usize {
        self.invocations.read().await.len()
    }

    /// Clear recorded invocations.
    pub async fn clear_recorded(&self) {
        self.invocations.write().await.clear();
    }

    /// Set the behavior for one source path.
    pub async fn set_behavior(&self, source: impl AsRef<Path>, behavior: MockBehavior) {
        self.behaviors
            .write()
            .await
            .insert(source.as_ref().to_path_buf(), behavior);
    }

    /// Make the transformer look missing.
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }

    /// Set stderr output for successful runs.
    pub async fn set_warnings(&self, warnings: impl Into<String>) {
        *self.warnings.write().await = Some(warnings.into());
    }

    fn unavailable_error() -> TransformerError {
        TransformerError::unavailable("mock-pandoc", "marked unavailable")
    }
}

#[async_trait]
impl Transformer for MockTransformer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn validate(&self) -> Result<(), TransformerError> {
        if *self.unavailable.read().await {
            return Err(Self::unavailable_error());
        }
        Ok(())
    }

    async fn run(&self, invocation: &Invocation) -> Result<InvocationOutput, TransformerError> {
        let start = Instant::now();
        self.invocations.write().await.push(invocation.clone());

        if *self.unavailable.read().await {
            return Err(Self::unavailable_error());
        }

        let behavior = self
            .behaviors
            .read()
            .await
            .get(&invocation.source_path)
            .cloned()
            .unwrap_or(MockBehavior::Succeed);

        match behavior {
            MockBehavior::Succeed | MockBehavior::SkipOutput => {}
            MockBehavior::Delay(duration) => tokio::time::sleep(duration).await,
            MockBehavior::Fail(stderr) => {
                return Err(TransformerError::invocation_failed(Some(1), &stderr));
            }
            MockBehavior::Timeout => {
                return Err(TransformerError::Timeout {
                    timeout: invocation.timeout,
                });
            }
        }

        if behavior != MockBehavior::SkipOutput {
            let content = format!(
                "{} converted from {}\n",
                invocation.target_format,
                invocation.source_path.display()
            );
            tokio::fs::write(&invocation.output_path, content).await?;
        }

        Ok(InvocationOutput {
            output_path: invocation.output_path.clone(),
            stderr: self.warnings.read().await.clone().unwrap_or_default(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
