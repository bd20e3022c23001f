use crate::error::{ScanError, StatCause, StatError};
use crate::types::FileEntry;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct ScanResult {
    pub entries: Vec<FileEntry>,
    pub errors: Vec<StatError>,
}

/// Resolve the scan root, keeping the absolute form of the input for messages
/// when the path does not exist.
pub fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
    let canonical = fs::canonicalize(root).map_err(|_| {
        ScanError::NotFound(std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf()))
    })?;

    if !canonical.is_dir() {
        return Err(ScanError::NotADirectory(canonical));
    }
    Ok(canonical)
}

/// Rank regular files under `root` by size, largest first, keeping at most
/// `top_n`. Entries that fail to stat are collected and skipped.
pub fn scan_largest(root: &Path, top_n: usize, recursive: bool) -> Result<ScanResult, ScanError> {
    let root = resolve_root(root)?;
    log::info!(
        "scanning {} ({})",
        root.display(),
        if recursive { "recursive" } else { "top level" }
    );

    let mut walker = WalkDir::new(&root).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut result = ScanResult::default();

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map_or_else(|| root.clone(), Path::to_path_buf);
                log::warn!("skipping {}: {e}", path.display());
                result.errors.push(StatError {
                    path,
                    source: e.into(),
                });
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        // Symlinks are followed so a link to a regular file ranks with the
        // target's size; broken links surface as stat errors.
        let metadata: Result<fs::Metadata, StatCause> = if entry.path_is_symlink() {
            fs::metadata(entry.path()).map_err(Into::into)
        } else {
            entry.metadata().map_err(Into::into)
        };

        match metadata {
            Ok(m) if m.is_file() => result.entries.push(FileEntry {
                path: entry.into_path(),
                size: m.len(),
            }),
            Ok(_) => log::trace!("not a regular file: {}", entry.path().display()),
            Err(source) => {
                log::warn!("skipping {}: {source}", entry.path().display());
                result.errors.push(StatError {
                    path: entry.into_path(),
                    source,
                });
            }
        }
    }

    rank_by_size(&mut result.entries, top_n);
    Ok(result)
}

/// Stable sort, so equal sizes keep traversal order.
fn rank_by_size(entries: &mut Vec<FileEntry>, top_n: usize) {
    entries.sort_by(|a, b| b.size.cmp(&a.size));
    entries.truncate(top_n);
}
