//! Terminal reporter: a spinner during work and one result line per file.
//!
//! Implements [`PipelineObserver`] over an `indicatif` spinner. Digests are
//! displayed as short unambiguous prefixes via a per-run
//! [`DigestShortener`]; `--full-digest` switches to full-length output.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use yansi::Paint;

use crate::error::DgstoreError;
use crate::pipeline::{FileResult, FileStatus, PipelineObserver};
use crate::scanner::FileEntry;
use crate::shortener::{DigestShortener, ShortenerOptions};

/// Console reporter for one pipeline run.
pub struct Reporter {
    spinner: ProgressBar,
    // Observer callbacks take &self; the shortener's history is mutable.
    shortener: Mutex<DigestShortener>,
    quiet: bool,
}

impl Reporter {
    /// Create a reporter.
    ///
    /// # Arguments
    ///
    /// * `full_digest` - Show full digests instead of short prefixes.
    /// * `quiet` - Suppress the spinner and all result lines.
    ///
    /// # Errors
    ///
    /// Propagates [`DgstoreError::InvalidOption`] from the shortener.
    pub fn new(full_digest: bool, quiet: bool) -> Result<Self, DgstoreError> {
        let spinner = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };

        let shortener = DigestShortener::new(ShortenerOptions {
            full_length: full_digest,
            min_length: None,
        })?;

        Ok(Self {
            spinner,
            shortener: Mutex::new(shortener),
            quiet,
        })
    }

    /// Stop the spinner, leaving the printed result lines in place.
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }

    /// Print a line above the spinner.
    fn println(&self, line: String) {
        if !self.quiet {
            self.spinner.println(line);
        }
    }
}

impl PipelineObserver for Reporter {
    fn scan_start(&self) {
        self.spinner.set_message("Listing files");
    }

    fn scan_end(&self, files: &[FileEntry]) {
        let plural = if files.len() == 1 { "" } else { "s" };
        self.println(format!("{} matching file{} found", files.len(), plural));
    }

    fn hash_start(&self, file: &FileEntry) {
        self.spinner
            .set_message(format!("Hashing {}", file.path.display()));
    }

    fn hash_end(&self, result: &FileResult) {
        let mut shortener = self.shortener.lock().unwrap();
        let path = result.path.display();

        let line = match result.status() {
            FileStatus::Stored => {
                let short = shortener.shorten(&result.digest, None);
                let sidecar = result.sidecar.as_ref().map_or_else(
                    || String::from("?"),
                    |record| record.path.display().to_string(),
                );
                format!(
                    "✓ {} {} {}",
                    short.cyan(),
                    path,
                    format!("(stored digest to {sidecar})").yellow()
                )
            }
            FileStatus::New => {
                let short = shortener.shorten(&result.digest, None);
                format!("✓ {} {} (digest not stored)", short.cyan(), path)
            }
            FileStatus::Unchanged => {
                let short = shortener.shorten(&result.digest, None);
                format!(
                    "✓ {} {} {}",
                    short.green(),
                    path,
                    "(no change)".dim()
                )
            }
            FileStatus::Changed => {
                // status() only reports Changed when a pre-existing record
                // is attached.
                let Some(previous) = result.previous_digest() else {
                    return;
                };
                let short = shortener.shorten(&result.digest, Some(previous));
                let previous_short = shortener.shorten(previous, Some(&result.digest));
                format!(
                    "✗ {} {} {}",
                    short.red(),
                    path,
                    format!("(previous digest was {previous_short})").yellow()
                )
            }
        };

        self.println(line);
    }
}
