//! Error taxonomy, exit codes and structured error output.

use std::path::PathBuf;

use serde::Serialize;

use crate::digest::DigestParseError;

/// Errors produced by the digest pipeline.
///
/// The pipeline performs no retries and no partial-failure recovery: any
/// error raised while scanning or processing a file unwinds the entire run.
/// The only condition converted to a normal value is a missing sidecar file,
/// which is reported as "no prior digest" rather than an error.
#[derive(thiserror::Error, Debug)]
pub enum DgstoreError {
    /// No files matched the given patterns.
    #[error("no files matched the given patterns")]
    NoMatch,

    /// A glob pattern could not be compiled.
    #[error("pattern '{pattern}' is invalid: {source}")]
    Pattern {
        /// The offending pattern as given on the command line
        pattern: String,
        /// The underlying glob error
        #[source]
        source: glob::PatternError,
    },

    /// An I/O error occurred while scanning, reading, hashing or writing.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A sidecar file does not contain a valid SHA-512 digest.
    #[error("malformed digest in {path}: {source}")]
    MalformedDigest {
        /// Path of the sidecar file
        path: PathBuf,
        /// Why the content could not be decoded
        #[source]
        source: DigestParseError,
    },

    /// A component was constructed with an invalid option.
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl DgstoreError {
    /// Wrap an I/O error with the path it occurred at.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Exit codes for the dgstore binary.
///
/// - 0: Success (all files processed)
/// - 1: General error (I/O failure, malformed sidecar, invalid option)
/// - 2: No files matched the given patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: every matched file was hashed and reported.
    Success = 0,
    /// General error: an unexpected failure aborted the run.
    GeneralError = 1,
    /// No match: the patterns expanded to zero files.
    NoMatch = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DG000",
            Self::GeneralError => "DG001",
            Self::NoMatch => "DG002",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DG001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::NoMatch.as_i32(), 2);
    }

    #[test]
    fn test_code_prefixes() {
        assert_eq!(ExitCode::Success.code_prefix(), "DG000");
        assert_eq!(ExitCode::GeneralError.code_prefix(), "DG001");
        assert_eq!(ExitCode::NoMatch.code_prefix(), "DG002");
    }

    #[test]
    fn test_no_match_display() {
        let err = DgstoreError::NoMatch;
        assert_eq!(err.to_string(), "no files matched the given patterns");
    }

    #[test]
    fn test_io_display_includes_path() {
        let err = DgstoreError::io(
            std::path::Path::new("/some/file"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/some/file"));
    }

    #[test]
    fn test_structured_error() {
        let err = anyhow::anyhow!("boom");
        let structured = StructuredError::new(&err, ExitCode::GeneralError);
        assert_eq!(structured.code, "DG001");
        assert_eq!(structured.exit_code, 1);
        assert_eq!(structured.message, "boom");
    }
}
