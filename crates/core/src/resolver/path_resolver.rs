//! Output path resolution.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

use crate::format::{Format, FormatCatalog};

use super::error::PathError;
use super::types::{NamingPolicy, ResolvedOutput};

/// Computes where a converted file goes and makes sure its directory exists.
#[derive(Debug, Clone)]
pub struct PathResolver {
    catalog: Arc<FormatCatalog>,
}

impl PathResolver {
    /// Creates a resolver backed by the given catalog.
    pub fn new(catalog: Arc<FormatCatalog>) -> Self {
        Self { catalog }
    }

    /// Computes the output path without touching the filesystem.
    ///
    /// The directory is `destination` when given and non-empty, otherwise the
    /// source's own directory, otherwise the current working directory.
    pub fn plan(
        &self,
        source_path: &Path,
        target: Format,
        destination: Option<&Path>,
        naming: NamingPolicy,
    ) -> Result<PathBuf, PathError> {
        let stem = source_path
            .file_stem()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PathError::InvalidSourcePath {
                path: source_path.to_path_buf(),
            })?;

        let directory = Self::effective_directory(source_path, destination)?;
        let file_name = naming.file_name(stem, self.catalog.target_extension(target));

        Ok(directory.join(file_name))
    }

    /// Computes the output path and creates its directory if needed.
    ///
    /// Directory creation is attempted once. An existing directory is fine,
    /// anything else in the way is a `DirectoryCreationFailed`.
    pub async fn resolve(
        &self,
        source_path: &Path,
        target: Format,
        destination: Option<&Path>,
        naming: NamingPolicy,
    ) -> Result<ResolvedOutput, PathError> {
        let path = self.plan(source_path, target, destination, naming)?;

        let directory_created = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                Self::ensure_directory(parent).await?
            }
            _ => false,
        };

        tracing::debug!(
            source = %source_path.display(),
            output = %path.display(),
            directory_created,
            "Resolved output path"
        );

        Ok(ResolvedOutput {
            path,
            directory_created,
        })
    }

    fn effective_directory(
        source_path: &Path,
        destination: Option<&Path>,
    ) -> Result<PathBuf, PathError> {
        if let Some(dest) = destination.filter(|d| !d.as_os_str().is_empty()) {
            return Ok(dest.to_path_buf());
        }

        match source_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
            _ => std::env::current_dir().map_err(PathError::CurrentDirUnavailable),
        }
    }

    /// Returns whether the directory was created by this call.
    async fn ensure_directory(dir: &Path) -> Result<bool, PathError> {
        if let Ok(meta) = fs::metadata(dir).await {
            if meta.is_dir() {
                return Ok(false);
            }
        }

        // create_dir_all treats a concurrently created directory as success
        fs::create_dir_all(dir)
            .await
            .map_err(|e| PathError::directory_creation_failed(dir.to_path_buf(), e))?;

        Ok(true)
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(Arc::new(FormatCatalog::builtin().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plan_keep_original_stem() {
        let resolver = PathResolver::default();
        let path = resolver
            .plan(
                Path::new("/docs/report.md"),
                Format::Html,
                None,
                NamingPolicy::KeepOriginalStem,
            )
            .unwrap();
        assert_eq!(path, PathBuf::from("/docs/report.html"));
    }

    #[test]
    fn test_plan_append_suffix() {
        let resolver = PathResolver::default();
        let path = resolver
            .plan(
                Path::new("/docs/report.md"),
                Format::Html,
                None,
                NamingPolicy::AppendSuffix,
            )
            .unwrap();
        assert_eq!(path, PathBuf::from("/docs/report_converted.html"));
    }

    #[test]
    fn test_plan_destination_override() {
        let resolver = PathResolver::default();
        let path = resolver
            .plan(
                Path::new("/docs/book.epub"),
                Format::Markdown,
                Some(Path::new("/out")),
                NamingPolicy::KeepOriginalStem,
            )
            .unwrap();
        assert_eq!(path, PathBuf::from("/out/book.md"));
    }

    #[test]
    fn test_plan_empty_destination_uses_source_dir() {
        let resolver = PathResolver::default();
        let path = resolver
            .plan(
                Path::new("/docs/report.md"),
                Format::WordPackage,
                Some(Path::new("")),
                NamingPolicy::KeepOriginalStem,
            )
            .unwrap();
        assert_eq!(path, PathBuf::from("/docs/report.docx"));
    }

    #[test]
    fn test_plan_bare_file_name_uses_cwd() {
        let resolver = PathResolver::default();
        let path = resolver
            .plan(
                Path::new("report.md"),
                Format::Html,
                None,
                NamingPolicy::KeepOriginalStem,
            )
            .unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(path, cwd.join("report.html"));
    }

    #[test]
    fn test_plan_rejects_path_without_file_name() {
        let resolver = PathResolver::default();
        let result = resolver.plan(
            Path::new("/"),
            Format::Html,
            None,
            NamingPolicy::KeepOriginalStem,
        );
        assert!(matches!(result, Err(PathError::InvalidSourcePath { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_plan_non_utf8_source_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let mut source = PathBuf::from("/docs");
        source.push(OsStr::from_bytes(b"rap\xffport.md"));

        let path = PathResolver::default()
            .plan(&source, Format::Html, None, NamingPolicy::KeepOriginalStem)
            .unwrap();

        assert_eq!(path.parent(), Some(Path::new("/docs")));
        assert_eq!(
            path.file_name().map(|n| n.to_os_string().into_vec()),
            Some(b"rap\xffport.html".to_vec())
        );
    }

    #[tokio::test]
    async fn test_resolve_creates_nested_directory() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("a/b/c");
        let resolver = PathResolver::default();

        let resolved = resolver
            .resolve(
                Path::new("/docs/notes.md"),
                Format::Html,
                Some(&dest),
                NamingPolicy::KeepOriginalStem,
            )
            .await
            .unwrap();

        assert!(resolved.directory_created);
        assert!(dest.is_dir());
        assert_eq!(resolved.path, dest.join("notes.html"));
    }

    #[tokio::test]
    async fn test_resolve_is_deterministic_and_idempotent() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        let resolver = PathResolver::default();

        let first = resolver
            .resolve(
                Path::new("/docs/notes.md"),
                Format::Epub,
                Some(&dest),
                NamingPolicy::AppendSuffix,
            )
            .await
            .unwrap();
        let second = resolver
            .resolve(
                Path::new("/docs/notes.md"),
                Format::Epub,
                Some(&dest),
                NamingPolicy::AppendSuffix,
            )
            .await
            .unwrap();

        assert_eq!(first.path, second.path);
        assert!(first.directory_created);
        assert!(!second.directory_created);
    }

    #[tokio::test]
    async fn test_resolve_fails_when_file_is_in_the_way() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").await.unwrap();
        let resolver = PathResolver::default();

        let result = resolver
            .resolve(
                Path::new("/docs/notes.md"),
                Format::Html,
                Some(&blocker.join("nested")),
                NamingPolicy::KeepOriginalStem,
            )
            .await;

        assert!(matches!(
            result,
            Err(PathError::DirectoryCreationFailed { .. })
        ));
    }
}
