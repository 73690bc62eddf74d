//! Command-line interface definitions for dgstore.
//!
//! All arguments and flags use the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Hash and store digests for all text files
//! dgstore '**/*.txt'
//!
//! # Check without storing digests for new files
//! dgstore --write=false '**/*'
//!
//! # Show full digests instead of short prefixes
//! dgstore -l '**/*'
//! ```

use clap::{ArgAction, Parser};

/// Compute and store SHA-512 digests of files next to them.
///
/// dgstore hashes every file matched by the given glob patterns, compares
/// the result against the digest stored in the file's `.sha512` sidecar,
/// and stores digests for files that have none yet.
#[derive(Debug, Parser)]
#[command(name = "dgstore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files, directories or glob patterns to process
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Show full digests instead of short prefixes
    #[arg(short = 'l', long)]
    pub full_digest: bool,

    /// Store digests next to the files
    #[arg(
        short = 'w',
        long,
        action = ArgAction::Set,
        default_value_t = true,
        default_missing_value = "true",
        num_args = 0..=1,
        require_equals = true,
        value_name = "BOOL"
    )]
    pub write: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}
