//! Format registry and compatibility graph.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::types::Format;

static BUILTIN: Lazy<FormatCatalog> = Lazy::new(FormatCatalog::standard);

/// Registry of input extensions and the conversions allowed between formats.
///
/// The graph is directed: an edge `Markdown -> Html` says nothing about
/// `Html -> Markdown`. Every edge must be listed explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatCatalog {
    /// Lowercased extension (with leading dot) to format.
    extensions: BTreeMap<String, Format>,
    /// Source format to reachable target formats.
    graph: BTreeMap<Format, BTreeSet<Format>>,
}

impl Default for FormatCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl FormatCatalog {
    /// Returns the process-wide builtin catalog.
    pub fn builtin() -> &'static FormatCatalog {
        &BUILTIN
    }

    /// Creates a catalog with no extensions and no conversions.
    pub fn empty() -> Self {
        Self {
            extensions: BTreeMap::new(),
            graph: BTreeMap::new(),
        }
    }

    /// Builds the catalog of formats pandoc handles for us.
    fn standard() -> Self {
        use Format::*;

        Self::empty()
            .with_extension(".md", Markdown)
            .with_extension(".markdown", Markdown)
            .with_extension(".docx", WordPackage)
            .with_extension(".html", Html)
            .with_extension(".htm", Html)
            .with_extension(".epub", Epub)
            .with_extension(".txt", PlainText)
            .with_conversions(Markdown, [WordPackage, Html, Epub])
            .with_conversions(WordPackage, [Markdown, Html, Epub, PlainText])
            .with_conversions(Html, [Markdown, WordPackage, Epub])
            .with_conversions(Epub, [Markdown, WordPackage, Html])
            .with_conversions(PlainText, [Markdown, Html, WordPackage])
    }

    /// Registers an input extension.
    pub fn with_extension(mut self, extension: &str, format: Format) -> Self {
        self.extensions.insert(normalize_extension(extension), format);
        self
    }

    /// Adds a single compatibility edge.
    pub fn with_conversion(mut self, source: Format, target: Format) -> Self {
        self.graph.entry(source).or_default().insert(target);
        self
    }

    /// Adds several compatibility edges from one source.
    pub fn with_conversions(
        mut self,
        source: Format,
        targets: impl IntoIterator<Item = Format>,
    ) -> Self {
        self.graph.entry(source).or_default().extend(targets);
        self
    }

    /// Extensions recognised as conversion inputs.
    pub fn extensions(&self) -> BTreeSet<String> {
        self.extensions.keys().cloned().collect()
    }

    /// Whether `target` is reachable from `source`.
    pub fn can_convert(&self, source: Format, target: Format) -> bool {
        self.graph
            .get(&source)
            .is_some_and(|targets| targets.contains(&target))
    }

    /// Maps an extension such as `.md` to its format.
    ///
    /// Input is lowercased and a missing leading dot is tolerated.
    /// `None` means the extension is not recognised.
    pub fn classify_extension(&self, extension: &str) -> Option<Format> {
        if extension.trim_start_matches('.').is_empty() {
            return None;
        }
        self.extensions.get(&normalize_extension(extension)).copied()
    }

    /// Classifies a path by its extension.
    pub fn classify_path(&self, path: &Path) -> Option<Format> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.classify_extension(ext))
    }

    /// Targets reachable from `source`, empty if none are.
    pub fn targets(&self, source: Format) -> BTreeSet<Format> {
        self.graph.get(&source).cloned().unwrap_or_default()
    }

    /// Extension written for outputs of `format`.
    pub fn target_extension(&self, format: Format) -> &'static str {
        format.extension()
    }
}

/// Lowercases an extension and makes sure it starts with a dot.
fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().trim_start_matches('.');
    format!(".{}", trimmed.to_ascii_lowercase())
}
