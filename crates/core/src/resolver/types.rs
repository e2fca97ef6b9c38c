//! Types for the resolver module.

use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// How the output file name is derived from the source file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    /// `report.md` becomes `report.html`.
    #[default]
    KeepOriginalStem,
    /// `report.md` becomes `report_converted.html`.
    AppendSuffix,
}

impl NamingPolicy {
    /// Suffix inserted between stem and extension.
    pub const SUFFIX: &'static str = "_converted";

    /// Builds the output file name for a stem and extension (with dot).
    ///
    /// The stem is kept as raw OS bytes, so names that are not UTF-8 survive.
    pub fn file_name(&self, stem: &OsStr, extension: &str) -> OsString {
        let mut name = stem.to_os_string();
        if *self == Self::AppendSuffix {
            name.push(Self::SUFFIX);
        }
        name.push(extension);
        name
    }
}

/// Output location computed for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutput {
    /// Full path the transformer should write to.
    pub path: PathBuf,
    /// Whether the directory had to be created.
    pub directory_created: bool,
}
