//! Sidecar files: a digest persisted next to its source file.
//!
//! The sidecar for `X` is the plain-text file `X.sha512` holding the
//! lowercase hex encoding of the digest, optionally followed by trailing
//! whitespace. A missing sidecar is not an error; it means no prior digest.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::digest::Digest;
use crate::error::DgstoreError;

/// Suffix appended to a file path to form its sidecar path.
///
/// Tied to the hash algorithm's name by convention, not enforced.
pub const SIDECAR_SUFFIX: &str = ".sha512";

/// The persisted digest for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarRecord {
    /// Path of the sidecar file itself
    pub path: PathBuf,
    /// The digest it holds
    pub digest: Digest,
    /// Whether the sidecar was written during this run
    pub created: bool,
}

/// Build the sidecar path for a file by appending [`SIDECAR_SUFFIX`].
///
/// The suffix is appended to the full file name, so `a.txt` maps to
/// `a.txt.sha512`.
#[must_use]
pub fn sidecar_path(path: &Path) -> PathBuf {
    let mut os_string = path.as_os_str().to_os_string();
    os_string.push(SIDECAR_SUFFIX);
    PathBuf::from(os_string)
}

/// If `path` names a sidecar file, return the path of its source file.
#[must_use]
pub fn source_path(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(SIDECAR_SUFFIX)?;
    if stem.is_empty() {
        // A bare ".sha512" has no source file; treat it as ordinary data.
        return None;
    }
    Some(path.with_file_name(stem))
}

/// Read the stored digest for `path` from its sidecar file.
///
/// Returns `Ok(None)` when the sidecar does not exist. The content is
/// trimmed before decoding.
///
/// # Errors
///
/// [`DgstoreError::Io`] for any failure other than a missing file and
/// [`DgstoreError::MalformedDigest`] when the content is not a valid
/// SHA-512 hex string.
pub fn read_digest(path: &Path) -> Result<Option<Digest>, DgstoreError> {
    let sidecar = sidecar_path(path);

    let contents = match fs::read_to_string(&sidecar) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(DgstoreError::io(&sidecar, err)),
    };

    let digest =
        Digest::from_hex(contents.trim()).map_err(|source| DgstoreError::MalformedDigest {
            path: sidecar,
            source,
        })?;

    Ok(Some(digest))
}

/// Write the digest for `path` to its sidecar file, overwriting any
/// existing content.
///
/// # Errors
///
/// [`DgstoreError::Io`] when the sidecar cannot be written.
pub fn write_digest(path: &Path, digest: &Digest) -> Result<(), DgstoreError> {
    let sidecar = sidecar_path(path);
    fs::write(&sidecar, digest.hex()).map_err(|err| DgstoreError::io(&sidecar, err))
}
