//! Conversion engine implementation.

use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::fs;

use crate::format::{Format, FormatCatalog};
use crate::resolver::PathResolver;
use crate::transformer::{Invocation, Transformer, TransformerError};

use super::config::EngineConfig;
use super::error::{ConversionError, EngineError};
use super::progress::ProgressReporter;
use super::types::{BatchResult, CancelFlag, ConversionOutcome, ConversionRequest};

/// A file the transformer produced.
struct Produced {
    path: PathBuf,
    size_bytes: u64,
    warnings: Option<String>,
}

/// Validates requests, resolves output paths and drives the transformer.
///
/// One failed request never affects another; every request yields exactly
/// one [`ConversionOutcome`].
pub struct ConversionEngine<T: Transformer> {
    config: EngineConfig,
    catalog: Arc<FormatCatalog>,
    resolver: PathResolver,
    transformer: Arc<T>,
}

impl<T: Transformer> ConversionEngine<T> {
    /// Creates an engine after checking the config and the transformer.
    ///
    /// The transformer's availability is checked here and nowhere else.
    pub async fn new(config: EngineConfig, transformer: T) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;

        if let Err(e) = transformer.validate().await {
            tracing::error!(
                transformer = transformer.name(),
                error = %e,
                "Transformer failed availability check"
            );
            return Err(EngineError::TransformerUnavailable(e));
        }

        let catalog = Arc::new(FormatCatalog::builtin().clone());

        Ok(Self {
            config,
            resolver: PathResolver::new(Arc::clone(&catalog)),
            catalog,
            transformer: Arc::new(transformer),
        })
    }

    /// Replaces the format catalog.
    pub fn with_catalog(mut self, catalog: FormatCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self.resolver = PathResolver::new(Arc::clone(&self.catalog));
        self
    }

    /// Returns the format catalog.
    pub fn catalog(&self) -> &FormatCatalog {
        &self.catalog
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the transformer.
    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    /// Whether a file with `source_extension` can become `target`.
    pub fn can_convert(&self, source_extension: &str, target: Format) -> bool {
        self.catalog
            .classify_extension(source_extension)
            .is_some_and(|source| self.catalog.can_convert(source, target))
    }

    /// Extensions accepted as conversion inputs.
    pub fn supported_input_extensions(&self) -> BTreeSet<String> {
        self.catalog.extensions()
    }

    /// Targets reachable from `source_extension`, empty when unrecognised.
    pub fn supported_conversions(&self, source_extension: &str) -> BTreeSet<Format> {
        self.catalog
            .classify_extension(source_extension)
            .map(|source| self.catalog.targets(source))
            .unwrap_or_default()
    }

    /// Converts one file.
    pub async fn convert_one(&self, request: &ConversionRequest) -> ConversionOutcome {
        let start = Instant::now();
        let result = self.try_convert(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(produced) => {
                tracing::info!(
                    source = %request.source_path.display(),
                    output = %produced.path.display(),
                    size_bytes = produced.size_bytes,
                    duration_ms,
                    "Converted"
                );
                ConversionOutcome::succeeded(
                    request.clone(),
                    produced.path,
                    produced.size_bytes,
                    produced.warnings,
                    duration_ms,
                )
            }
            Err(e) => {
                tracing::warn!(
                    source = %request.source_path.display(),
                    target = %request.target_format,
                    kind = %e.kind(),
                    error = %e,
                    "Conversion failed"
                );
                ConversionOutcome::failed(request.clone(), &e, duration_ms)
            }
        }
    }

    async fn try_convert(&self, request: &ConversionRequest) -> Result<Produced, ConversionError> {
        let source_path = &request.source_path;
        let target = request.target_format;

        // Catalog checks come before any filesystem or process work
        let source_format = self.catalog.classify_path(source_path).ok_or_else(|| {
            ConversionError::UnsupportedSourceFormat {
                path: source_path.clone(),
                extension: source_path
                    .extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_default(),
            }
        })?;

        if !self.catalog.can_convert(source_format, target) {
            return Err(ConversionError::IncompatibleConversion {
                from: source_format,
                to: target,
            });
        }

        self.check_source(source_path).await?;

        let resolved = self
            .resolver
            .resolve(
                source_path,
                target,
                request.destination(),
                request.naming_policy,
            )
            .await?;

        // A file left by an earlier run must not count as this run's output
        if resolved.path != *source_path {
            match fs::remove_file(&resolved.path).await {
                Ok(()) => {
                    tracing::debug!(path = %resolved.path.display(), "Removed previous output")
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(TransformerError::Io(e).into()),
            }
        }

        let invocation = Invocation {
            source_path: source_path.clone(),
            output_path: resolved.path,
            source_format,
            target_format: target,
            timeout: self.config.timeout(),
        };

        let output = self.transformer.run(&invocation).await?;

        let size_bytes = match fs::metadata(&output.output_path).await {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => {
                return Err(TransformerError::OutputMissing {
                    path: output.output_path,
                }
                .into())
            }
        };

        let warnings = Some(output.stderr.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Produced {
            path: output.output_path,
            size_bytes,
            warnings,
        })
    }

    async fn check_source(&self, path: &std::path::Path) -> Result<(), ConversionError> {
        let meta = match fs::metadata(path).await {
            Ok(meta) if meta.is_file() => meta,
            _ => {
                return Err(ConversionError::SourceNotFound {
                    path: path.to_path_buf(),
                })
            }
        };

        let limit = self.config.max_file_size_bytes;
        if limit > 0 && meta.len() > limit {
            return Err(ConversionError::FileTooLarge {
                path: path.to_path_buf(),
                size_bytes: meta.len(),
                limit_bytes: limit,
            });
        }

        Ok(())
    }

    /// Converts every request, in order unless parallel mode is enabled.
    pub async fn convert_batch(
        &self,
        requests: &[ConversionRequest],
        reporter: &dyn ProgressReporter,
    ) -> BatchResult {
        self.convert_batch_with_cancel(requests, reporter, &CancelFlag::new())
            .await
    }

    /// Like [`convert_batch`](Self::convert_batch), stopping early when
    /// `cancel` is set.
    ///
    /// Requests that had not started are returned as cancelled outcomes.
    pub async fn convert_batch_with_cancel(
        &self,
        requests: &[ConversionRequest],
        reporter: &dyn ProgressReporter,
        cancel: &CancelFlag,
    ) -> BatchResult {
        let start = Instant::now();
        let total = requests.len();

        tracing::info!(
            total,
            parallel = self.config.parallel,
            max_workers = self.config.max_workers,
            "Starting batch"
        );

        let outcomes = if self.config.parallel && total > 1 {
            self.run_parallel(requests, reporter, cancel).await
        } else {
            self.run_sequential(requests, reporter, cancel).await
        };

        let result = BatchResult {
            outcomes,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            total,
            succeeded = result.succeeded(),
            failed = result.failed(),
            cancelled = result.cancelled(),
            duration_ms = result.duration_ms,
            "Batch complete"
        );

        reporter.on_batch_complete(&result);
        result
    }

    async fn run_sequential(
        &self,
        requests: &[ConversionRequest],
        reporter: &dyn ProgressReporter,
        cancel: &CancelFlag,
    ) -> Vec<ConversionOutcome> {
        let total = requests.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, request) in requests.iter().enumerate() {
            let outcome = self.convert_unless_cancelled(request, cancel).await;
            reporter.on_progress(index, total, &outcome);
            outcomes.push(outcome);
        }

        outcomes
    }

    async fn run_parallel(
        &self,
        requests: &[ConversionRequest],
        reporter: &dyn ProgressReporter,
        cancel: &CancelFlag,
    ) -> Vec<ConversionOutcome> {
        let total = requests.len();
        let mut slots: Vec<Option<ConversionOutcome>> = vec![None; total];

        let mut completed = stream::iter(requests.iter().enumerate())
            .map(|(index, request)| async move {
                (index, self.convert_unless_cancelled(request, cancel).await)
            })
            .buffer_unordered(self.config.max_workers);

        while let Some((index, outcome)) = completed.next().await {
            reporter.on_progress(index, total, &outcome);
            slots[index] = Some(outcome);
        }

        slots
            .into_iter()
            .zip(requests)
            .map(|(slot, request)| slot.unwrap_or_else(|| Self::cancelled(request)))
            .collect()
    }

    async fn convert_unless_cancelled(
        &self,
        request: &ConversionRequest,
        cancel: &CancelFlag,
    ) -> ConversionOutcome {
        if cancel.is_cancelled() {
            tracing::debug!(source = %request.source_path.display(), "Skipping cancelled request");
            return Self::cancelled(request);
        }
        self.convert_one(request).await
    }

    fn cancelled(request: &ConversionRequest) -> ConversionOutcome {
        ConversionOutcome::failed(request.clone(), &ConversionError::Cancelled, 0)
    }
}
