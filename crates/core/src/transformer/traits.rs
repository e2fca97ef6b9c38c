//! Trait definitions for the transformer module.

use async_trait::async_trait;

use super::error::TransformerError;
use super::types::{Invocation, InvocationOutput};

/// An external program that turns one document into another.
///
/// Implementations run exactly one process per [`Transformer::run`] call and
/// never retry.
#[async_trait]
pub trait Transformer: Send + Sync {
    /// Returns the name of this transformer implementation.
    fn name(&self) -> &str;

    /// Checks that the transformer can be launched at all.
    ///
    /// Called once when the engine is built, not per file.
    async fn validate(&self) -> Result<(), TransformerError>;

    /// Converts one file.
    async fn run(&self, invocation: &Invocation) -> Result<InvocationOutput, TransformerError>;
}
