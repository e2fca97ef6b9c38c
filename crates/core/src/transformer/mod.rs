//! Transformer module for running the external document converter.
//!
//! This module provides the `Transformer` trait and the pandoc implementation.
//! A transformer is judged only by its exit status and what it prints on
//! stderr; the engine never looks inside the documents.
//!
//! # Example
//!
//! ```ignore
//! use docuflow_core::transformer::{Invocation, PandocTransformer, Transformer, TransformerConfig};
//!
//! let transformer = PandocTransformer::new(TransformerConfig::default());
//!
//! // Fails with `TransformerError::Unavailable` when pandoc is missing
//! transformer.validate().await?;
//!
//! let output = transformer
//!     .run(&Invocation {
//!         source_path: PathBuf::from("notes.md"),
//!         output_path: PathBuf::from("notes.html"),
//!         source_format: Format::Markdown,
//!         target_format: Format::Html,
//!         timeout: Duration::from_secs(30),
//!     })
//!     .await?;
//! println!("Converted in {} ms", output.duration_ms);
//! ```

mod config;
mod error;
mod pandoc;
mod traits;
mod types;

pub use config::TransformerConfig;
pub use error::{TransformerError, UNKNOWN_ERROR};
pub use pandoc::PandocTransformer;
pub use traits::Transformer;
pub use types::{Invocation, InvocationOutput};
