//! Error types for the format module.

use thiserror::Error;

/// Errors raised while naming formats.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The name does not match any known format.
    #[error("Unknown format: {name}")]
    UnknownFormat { name: String },
}
