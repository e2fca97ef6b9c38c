//! Document format definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::FormatError;

/// A document representation the engine knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Markdown text
    Markdown,
    /// Office Open XML word-processing package (.docx)
    WordPackage,
    /// HTML document
    Html,
    /// EPUB e-book
    Epub,
    /// Plain text
    PlainText,
}

impl Format {
    /// Every format, in declaration order.
    pub const ALL: [Format; 5] = [
        Self::Markdown,
        Self::WordPackage,
        Self::Html,
        Self::Epub,
        Self::PlainText,
    ];

    /// Returns the extension written for outputs of this format (with leading dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => ".md",
            Self::WordPackage => ".docx",
            Self::Html => ".html",
            Self::Epub => ".epub",
            Self::PlainText => ".txt",
        }
    }

    /// Returns the short name used on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::WordPackage => "docx",
            Self::Html => "html",
            Self::Epub => "epub",
            Self::PlainText => "txt",
        }
    }

    /// Returns a human readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Markdown => "Markdown document",
            Self::WordPackage => "Microsoft Word document",
            Self::Html => "HTML document",
            Self::Epub => "EPUB e-book",
            Self::PlainText => "Plain text file",
        }
    }

    fn serde_name(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::WordPackage => "word_package",
            Self::Html => "html",
            Self::Epub => "epub",
            Self::PlainText => "plain_text",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Markdown => "Markdown",
            Self::WordPackage => "Word",
            Self::Html => "HTML",
            Self::Epub => "EPUB",
            Self::PlainText => "plain text",
        };
        f.write_str(name)
    }
}

impl FromStr for Format {
    type Err = FormatError;

    /// Accepts `html`, `.html`, `HTML` or `plain_text` style names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| {
                needle == format.short_name()
                    || needle == format.serde_name()
                    || needle == format.extension().trim_start_matches('.')
            })
            .or(match needle.as_str() {
                "htm" => Some(Self::Html),
                "text" | "plain" => Some(Self::PlainText),
                _ => None,
            })
            .ok_or_else(|| FormatError::UnknownFormat {
                name: s.to_string(),
            })
    }
}
