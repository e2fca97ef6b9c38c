//! Conversion orchestration.
//!
//! The engine checks each request against the format catalog, resolves where
//! the output goes, runs the transformer once and records a
//! [`ConversionOutcome`]. Batches isolate failures: every request produces an
//! outcome and the [`BatchResult`] keeps input order.
//!
//! # Example
//!
//! ```ignore
//! use docuflow_core::engine::{ConversionEngine, ConversionRequest, EngineConfig, NoopReporter};
//! use docuflow_core::format::Format;
//! use docuflow_core::transformer::PandocTransformer;
//!
//! let engine = ConversionEngine::new(EngineConfig::default(), PandocTransformer::with_defaults()).await?;
//!
//! let requests = vec![
//!     ConversionRequest::new("notes.md", Format::Html),
//!     ConversionRequest::new("book.docx", Format::Epub).with_destination("out"),
//! ];
//! let result = engine.convert_batch(&requests, &NoopReporter).await;
//! println!("{} of {} converted", result.succeeded(), result.total());
//! ```

mod config;
#[allow(clippy::module_inception)]
mod engine;
mod error;
mod progress;
mod types;

pub use config::EngineConfig;
pub use engine::ConversionEngine;
pub use error::{ConversionError, EngineError, FailureKind};
pub use progress::{BatchEvent, ChannelReporter, NoopReporter, ProgressReporter};
pub use types::{BatchResult, CancelFlag, ConversionOutcome, ConversionRequest};
