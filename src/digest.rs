//! The `Digest` value type: a fixed-size SHA-512 output with memoized hex.

use std::fmt;
use std::sync::OnceLock;

/// Size of a SHA-512 digest in bytes.
pub const DIGEST_SIZE: usize = 64;

/// An immutable SHA-512 digest.
///
/// Equality is byte-wise. The lowercase hexadecimal encoding is derived on
/// first access and cached for the lifetime of the value.
pub struct Digest {
    bytes: [u8; DIGEST_SIZE],
    hex: OnceLock<String>,
}

/// Errors raised when parsing a digest from its hex representation.
#[derive(thiserror::Error, Debug)]
pub enum DigestParseError {
    /// The string is not valid hexadecimal.
    #[error("invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The decoded value has the wrong length for a SHA-512 digest.
    #[error("expected {expected} bytes, got {actual}")]
    Length {
        /// Required digest size
        expected: usize,
        /// Size actually decoded
        actual: usize,
    },
}

impl Digest {
    /// Wrap a raw SHA-512 output.
    #[must_use]
    pub fn new(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self {
            bytes,
            hex: OnceLock::new(),
        }
    }

    /// Parse a digest from its lowercase (or uppercase) hex encoding.
    ///
    /// The input must decode to exactly [`DIGEST_SIZE`] bytes. Callers are
    /// expected to trim surrounding whitespace beforehand.
    ///
    /// # Errors
    ///
    /// Returns [`DigestParseError`] for invalid hex or a wrong-length value.
    pub fn from_hex(s: &str) -> Result<Self, DigestParseError> {
        let decoded = hex::decode(s)?;
        let bytes: [u8; DIGEST_SIZE] =
            decoded
                .try_into()
                .map_err(|v: Vec<u8>| DigestParseError::Length {
                    expected: DIGEST_SIZE,
                    actual: v.len(),
                })?;
        Ok(Self::new(bytes))
    }

    /// The raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.bytes
    }

    /// The lowercase hexadecimal encoding, computed once and cached.
    #[must_use]
    pub fn hex(&self) -> &str {
        self.hex.get_or_init(|| hex::encode(self.bytes))
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Digest {}

impl Clone for Digest {
    fn clone(&self) -> Self {
        // The hex cache is rebuilt lazily on the clone.
        Self::new(self.bytes)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}…)", &self.hex()[..12])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}
