//! Supported document formats and which conversions between them are legal.
//!
//! The catalog is the first thing consulted for every request: a conversion
//! that is not listed here never reaches the filesystem or the transformer.

mod catalog;
mod error;
mod types;

pub use catalog::FormatCatalog;
pub use error::FormatError;
pub use types::Format;
