//! Pandoc-based transformer implementation.

use async_trait::async_trait;
use std::ffi::OsString;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

use super::config::TransformerConfig;
use super::error::TransformerError;
use super::traits::Transformer;
use super::types::{Invocation, InvocationOutput};

/// How long `pandoc --version` may take before pandoc is considered broken.
const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pandoc-based transformer implementation.
pub struct PandocTransformer {
    config: TransformerConfig,
}

impl PandocTransformer {
    /// Creates a new pandoc transformer with the given configuration.
    pub fn new(config: TransformerConfig) -> Self {
        Self { config }
    }

    /// Creates a transformer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TransformerConfig::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    /// Builds the pandoc argument vector for one invocation.
    ///
    /// Paths are passed as raw OS strings so non-UTF-8 names reach pandoc intact.
    pub fn build_args(&self, invocation: &Invocation) -> Vec<OsString> {
        let mut args: Vec<OsString> =
            self.config.base_args.iter().map(OsString::from).collect();

        args.extend([
            invocation.source_path.clone().into_os_string(),
            OsString::from("-o"),
            invocation.output_path.clone().into_os_string(),
        ]);

        args.extend(
            self.config
                .args_for(invocation.target_format)
                .iter()
                .map(OsString::from),
        );

        args.extend(self.config.extra_args.iter().map(OsString::from));

        args
    }

    fn launch_error(&self, e: std::io::Error) -> TransformerError {
        if e.kind() == std::io::ErrorKind::NotFound {
            TransformerError::unavailable(&self.config.program, "executable not found")
        } else {
            TransformerError::Io(e)
        }
    }
}

#[async_trait]
impl Transformer for PandocTransformer {
    fn name(&self) -> &str {
        "pandoc"
    }

    async fn validate(&self) -> Result<(), TransformerError> {
        let probe = Command::new(&self.config.program)
            .args(&self.config.base_args)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match timeout(VERSION_PROBE_TIMEOUT, probe).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(TransformerError::unavailable(
                    &self.config.program,
                    e.to_string(),
                ))
            }
            Err(_) => {
                return Err(TransformerError::unavailable(
                    &self.config.program,
                    "version probe timed out",
                ))
            }
        };

        if !output.status.success() {
            return Err(TransformerError::unavailable(
                &self.config.program,
                format!("`--version` exited with code {:?}", output.status.code()),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = stdout.lines().next().unwrap_or("unknown").trim();
        tracing::info!(
            program = %self.config.program.display(),
            version,
            "Transformer available"
        );

        Ok(())
    }

    async fn run(&self, invocation: &Invocation) -> Result<InvocationOutput, TransformerError> {
        let start = Instant::now();
        let args = self.build_args(invocation);

        tracing::debug!(
            program = %self.config.program.display(),
            ?args,
            "Running transformer"
        );

        // Dropping the child on timeout kills the process
        let child = Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.launch_error(e))?;

        let output = match timeout(invocation.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(TransformerError::Timeout {
                    timeout: invocation.timeout,
                })
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(TransformerError::invocation_failed(
                output.status.code(),
                &stderr,
            ));
        }

        Ok(InvocationOutput {
            output_path: invocation.output_path.clone(),
            stderr,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
