//! The digest compare/store pipeline.
//!
//! Files are processed strictly sequentially: the scan completes before any
//! hashing begins, and each file's read/hash/compare/store finishes before
//! the next file starts. Progress is reported through a synchronous observer
//! interface; observers carry no control flow back into the pipeline.

use std::path::PathBuf;

use crate::digest::Digest;
use crate::error::DgstoreError;
use crate::hasher;
use crate::scanner::{self, FileEntry};
use crate::sidecar::{self, SidecarRecord};

/// Options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Persist digests for files that have none yet.
    pub write: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self { write: true }
    }
}

/// Lifecycle events of one pipeline run.
///
/// Observers are invoked synchronously, in registration order, from the
/// pipeline's own thread of control. They must not block; the pipeline does
/// not await them and does not catch their panics.
pub trait PipelineObserver {
    /// The scan is about to start.
    fn scan_start(&self) {}

    /// The scan finished; `files` is the filtered entry list, in
    /// processing order.
    fn scan_end(&self, _files: &[FileEntry]) {}

    /// A file is about to be hashed.
    fn hash_start(&self, _file: &FileEntry) {}

    /// A file was processed.
    fn hash_end(&self, _result: &FileResult) {}
}

/// Outcome classification for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// No prior digest existed; the fresh one was written to a sidecar file.
    Stored,
    /// No prior digest existed and writing was disabled.
    New,
    /// The stored digest matches the file's current content.
    Unchanged,
    /// The stored digest differs from the file's current content.
    Changed,
}

/// The outcome for one processed file.
#[derive(Debug, Clone)]
pub struct FileResult {
    /// Path of the processed file
    pub path: PathBuf,
    /// Freshly computed digest of the file's content
    pub digest: Digest,
    /// The associated sidecar record, if one exists or was created
    pub sidecar: Option<SidecarRecord>,
}

impl FileResult {
    /// Classify this result.
    #[must_use]
    pub fn status(&self) -> FileStatus {
        match &self.sidecar {
            None => FileStatus::New,
            Some(record) if record.created => FileStatus::Stored,
            Some(record) if record.digest == self.digest => FileStatus::Unchanged,
            Some(_) => FileStatus::Changed,
        }
    }

    /// The previously stored digest, when one existed before this run.
    #[must_use]
    pub fn previous_digest(&self) -> Option<&Digest> {
        match &self.sidecar {
            Some(record) if !record.created => Some(&record.digest),
            _ => None,
        }
    }
}

/// Sequential digest pipeline.
pub struct Pipeline<'a> {
    options: PipelineOptions,
    observers: Vec<&'a dyn PipelineObserver>,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline with the given options and no observers.
    #[must_use]
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            observers: Vec::new(),
        }
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn add_observer(&mut self, observer: &'a dyn PipelineObserver) {
        self.observers.push(observer);
    }

    /// Run the pipeline over the given glob patterns.
    ///
    /// Returns one [`FileResult`] per matched file, in scan order.
    ///
    /// # Errors
    ///
    /// Any error during scanning, sidecar reading, hashing or writing aborts
    /// the run immediately and is returned unchanged; no partial results are
    /// produced.
    pub fn run(&self, patterns: &[String]) -> Result<Vec<FileResult>, DgstoreError> {
        for observer in &self.observers {
            observer.scan_start();
        }

        let files = scanner::scan(patterns)?;
        log::debug!("processing {} file(s)", files.len());

        for observer in &self.observers {
            observer.scan_end(&files);
        }

        let mut results = Vec::with_capacity(files.len());
        for file in &files {
            for observer in &self.observers {
                observer.hash_start(file);
            }

            let result = self.compare_or_store(file)?;

            for observer in &self.observers {
                observer.hash_end(&result);
            }

            results.push(result);
        }

        Ok(results)
    }

    /// Process one file: read its sidecar, hash its content, and decide.
    ///
    /// A fresh digest is persisted only when no prior one exists and writing
    /// is enabled. A mismatching sidecar is never overwritten; the drift is
    /// surfaced for the user to act on.
    fn compare_or_store(&self, file: &FileEntry) -> Result<FileResult, DgstoreError> {
        let previous = sidecar::read_digest(&file.path)?;
        let digest = hasher::hash_file(&file.path)?;

        let record = match previous {
            None if self.options.write => {
                sidecar::write_digest(&file.path, &digest)?;
                log::debug!("stored digest for {}", file.path.display());
                Some(SidecarRecord {
                    path: sidecar::sidecar_path(&file.path),
                    digest: digest.clone(),
                    created: true,
                })
            }
            None => None,
            Some(previous) => Some(SidecarRecord {
                path: sidecar::sidecar_path(&file.path),
                digest: previous,
                created: false,
            }),
        };

        Ok(FileResult {
            path: file.path.clone(),
            digest,
            sidecar: record,
        })
    }
}
