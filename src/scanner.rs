//! Glob expansion into a concrete, deduplicated file list.
//!
//! Sidecar files are dropped from the result set when their source file is
//! also part of the expansion, so digest files are never processed as data
//! files. Orphaned sidecars (no matching source) stay in and are treated as
//! ordinary files.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::error::DgstoreError;
use crate::sidecar;

/// Metadata for a scanned candidate file.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path as produced by the glob expansion
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
}

/// Expand glob patterns into a deduplicated list of [`FileEntry`] values.
///
/// Directories are skipped; duplicate matches across patterns are collapsed
/// to their first occurrence, so the result order follows the patterns and,
/// within a pattern, the sorted order of the `glob` crate.
///
/// # Errors
///
/// - [`DgstoreError::Pattern`] when a pattern does not compile.
/// - [`DgstoreError::Io`] when a matched path cannot be inspected.
/// - [`DgstoreError::NoMatch`] when the combined expansion yields zero files.
pub fn scan(patterns: &[String]) -> Result<Vec<FileEntry>, DgstoreError> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files: Vec<FileEntry> = Vec::new();

    for pattern in patterns {
        let paths = glob::glob(pattern).map_err(|source| DgstoreError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        for result in paths {
            let path = result.map_err(|err| DgstoreError::Io {
                path: err.path().to_path_buf(),
                source: err.into_error(),
            })?;

            if !seen.insert(path.clone()) {
                continue;
            }

            let metadata = fs::metadata(&path).map_err(|err| DgstoreError::io(&path, err))?;
            if metadata.is_dir() {
                continue;
            }

            let modified = metadata
                .modified()
                .map_err(|err| DgstoreError::io(&path, err))?;

            files.push(FileEntry {
                path,
                size: metadata.len(),
                modified,
            });
        }
    }

    if files.is_empty() {
        return Err(DgstoreError::NoMatch);
    }

    log::debug!("scan matched {} file(s) before sidecar exclusion", files.len());

    // Exclude X.sha512 only when X itself was matched; orphaned sidecars
    // remain ordinary files.
    let matched: HashSet<PathBuf> = files.iter().map(|entry| entry.path.clone()).collect();
    files.retain(|entry| {
        sidecar::source_path(&entry.path).is_none_or(|source| !matched.contains(&source))
    });

    Ok(files)
}
