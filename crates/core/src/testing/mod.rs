//! Testing utilities for driving the engine without pandoc.
//!
//! # Example
//!
//! ```rust,ignore
//! use docuflow_core::testing::{MockTransformer, RecordingReporter};
//!
//! let transformer = MockTransformer::new();
//! let reporter = RecordingReporter::new();
//!
//! let engine = ConversionEngine::new(EngineConfig::default(), transformer.clone()).await?;
//! let result = engine.convert_batch(&requests, &reporter).await;
//!
//! assert_eq!(reporter.indices().len(), result.total());
//! ```

mod mock_transformer;
mod recording_reporter;

pub use mock_transformer::{MockBehavior, MockTransformer};
pub use recording_reporter::{ProgressCall, RecordingReporter};
