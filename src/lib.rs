//! dgstore - SHA-512 digest store
//!
//! Computes SHA-512 digests of files matched by glob patterns, stores them
//! in `.sha512` sidecar files next to the originals, and reports changes
//! against previously stored digests.

pub mod cli;
pub mod digest;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod shortener;
pub mod sidecar;

use anyhow::Result;

use crate::cli::Cli;
use crate::error::ExitCode;
use crate::pipeline::{Pipeline, PipelineOptions};
use crate::report::Reporter;

/// Run the application with parsed CLI arguments.
///
/// # Errors
///
/// Returns the underlying [`error::DgstoreError`] (wrapped in `anyhow`) when
/// the run aborts; the binary maps it to an exit code.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    if cli.no_color {
        yansi::disable();
    }

    let reporter = Reporter::new(cli.full_digest, cli.quiet)?;

    let mut pipeline = Pipeline::new(PipelineOptions { write: cli.write });
    pipeline.add_observer(&reporter);

    let outcome = pipeline.run(&cli.patterns);
    reporter.finish();

    let results = outcome?;
    log::debug!("run complete: {} file(s) processed", results.len());

    Ok(ExitCode::Success)
}
