//! Configuration for the transformer module.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::format::Format;

/// Configuration for the pandoc-based transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerConfig {
    /// Path to the pandoc binary.
    #[serde(default = "default_program")]
    pub program: PathBuf,

    /// Arguments placed before everything else (e.g. a wrapper script).
    #[serde(default)]
    pub base_args: Vec<String>,

    /// Arguments appended to every invocation.
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Flags added when converting to a given target format.
    #[serde(default = "default_format_args")]
    pub format_args: BTreeMap<Format, Vec<String>>,
}

fn default_program() -> PathBuf {
    PathBuf::from("pandoc")
}

fn default_format_args() -> BTreeMap<Format, Vec<String>> {
    let mut args = BTreeMap::new();
    args.insert(
        Format::Html,
        vec!["--standalone".to_string(), "--self-contained".to_string()],
    );
    args.insert(
        Format::Epub,
        vec![
            "--epub-cover-image=".to_string(),
            "--epub-metadata=".to_string(),
        ],
    );
    args
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            base_args: Vec::new(),
            extra_args: Vec::new(),
            format_args: default_format_args(),
        }
    }
}

impl TransformerConfig {
    /// Creates a config for a custom pandoc location.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Sets the leading arguments.
    pub fn with_base_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the trailing arguments.
    pub fn with_extra_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the flags used for one target format.
    pub fn with_format_args(
        mut self,
        format: Format,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.format_args
            .insert(format, args.into_iter().map(Into::into).collect());
        self
    }

    /// Flags for a target format, empty if none are configured.
    pub fn args_for(&self, format: Format) -> &[String] {
        self.format_args
            .get(&format)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
