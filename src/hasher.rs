//! Streaming SHA-512 computation over file contents.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use sha2::{Digest as _, Sha512};

use crate::digest::{Digest, DIGEST_SIZE};

/// Hash a file's contents with SHA-512.
///
/// The file is streamed through the hasher in chunks, so arbitrarily large
/// files are handled in constant memory.
///
/// # Errors
///
/// [`crate::error::DgstoreError::Io`] when the file cannot be opened or read.
pub fn hash_file(path: &Path) -> Result<Digest, crate::error::DgstoreError> {
    let file = File::open(path).map_err(|err| crate::error::DgstoreError::io(path, err))?;
    let mut reader = BufReader::new(file);

    let mut hasher = Sha512::new();
    io::copy(&mut reader, &mut hasher).map_err(|err| crate::error::DgstoreError::io(path, err))?;

    let mut bytes = [0u8; DIGEST_SIZE];
    bytes.copy_from_slice(&hasher.finalize());
    Ok(Digest::new(bytes))
}
