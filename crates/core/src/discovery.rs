//! Expanding command-line inputs into source files.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::format::FormatCatalog;

/// Turns files and directories into an ordered list of sources.
///
/// Explicit files and missing paths are kept as given so the engine can
/// report them. Directories contribute their supported files in sorted
/// order, descending into subdirectories only when `recursive` is set.
pub async fn collect_sources(
    inputs: &[PathBuf],
    recursive: bool,
    catalog: &FormatCatalog,
) -> io::Result<Vec<PathBuf>> {
    let mut sources = Vec::new();

    for input in inputs {
        match fs::metadata(input).await {
            Ok(meta) if meta.is_dir() => {
                let found = scan_directory(input, recursive, catalog).await?;
                tracing::debug!(
                    directory = %input.display(),
                    count = found.len(),
                    "Scanned directory"
                );
                sources.extend(found);
            }
            _ => sources.push(input.clone()),
        }
    }

    Ok(sources)
}

async fn scan_directory(
    root: &Path,
    recursive: bool,
    catalog: &FormatCatalog,
) -> io::Result<Vec<PathBuf>> {
    walk(root, vec![root.to_path_buf()], recursive, catalog).await
}

/// Lists `pending` directories until none are left.
///
/// Only a failure to read `root` itself is returned. Subdirectories that
/// vanish or cannot be read are logged and skipped.
async fn walk(
    root: &Path,
    mut pending: Vec<PathBuf>,
    recursive: bool,
    catalog: &FormatCatalog,
) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    while let Some(dir) = pending.pop() {
        let result = list_directory(&dir, recursive, catalog, &mut found, &mut pending).await;
        match result {
            Ok(()) => {}
            Err(e) if dir == root => return Err(e),
            Err(e) => {
                tracing::warn!(
                    directory = %dir.display(),
                    error = %e,
                    "Skipping unreadable directory"
                );
            }
        }
    }

    found.sort();
    Ok(found)
}

async fn list_directory(
    dir: &Path,
    recursive: bool,
    catalog: &FormatCatalog,
    found: &mut Vec<PathBuf>,
    pending: &mut Vec<PathBuf>,
) -> io::Result<()> {
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let file_type = match entry.file_type().await {
            Ok(file_type) => file_type,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if file_type.is_dir() {
            if recursive {
                pending.push(path);
            }
        } else if catalog.classify_path(&path).is_some() {
            found.push(path);
        }
    }

    Ok(())
}

/// Human readable size with one decimal, e.g. `1.5 KB`.
pub fn format_file_size(size_bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if size_bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = size_bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, UNITS[unit])
}
