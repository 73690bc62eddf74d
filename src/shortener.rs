//! Shortest-unambiguous-prefix computation for digest display.
//!
//! A [`DigestShortener`] produces, for each digest it is handed, the shortest
//! hex prefix (of at least a configured minimum length) that does not collide
//! with any digest it has seen before. Shortening is stateful and
//! order-dependent: every call records the digest's full hex in the
//! instance's history, so re-shortening the same digest through one instance
//! falls back to the full string. One instance belongs to one reporting pass;
//! it must not be shared across concurrent runs without external
//! synchronization.

use crate::digest::Digest;
use crate::error::DgstoreError;

/// Default minimum prefix length in hex characters.
pub const DEFAULT_MIN_LENGTH: usize = 6;

/// Options for constructing a [`DigestShortener`].
#[derive(Debug, Clone, Default)]
pub struct ShortenerOptions {
    /// Always return the full hex string instead of a prefix.
    pub full_length: bool,

    /// Minimum prefix length in hex characters.
    /// `None` selects [`DEFAULT_MIN_LENGTH`]; an explicit 0 is rejected.
    pub min_length: Option<usize>,
}

/// Stateful digest shortener.
///
/// The history holds the full-length hex of every digest ever passed to
/// [`shorten`](Self::shorten), which makes the collision test a plain
/// one-directional `starts_with` against full strings: only the candidate is
/// ever truncated.
#[derive(Debug)]
pub struct DigestShortener {
    full_length: bool,
    min_length: usize,
    known: Vec<String>,
}

impl DigestShortener {
    /// Create a shortener from the given options.
    ///
    /// # Errors
    ///
    /// Returns [`DgstoreError::InvalidOption`] if `min_length` is explicitly
    /// set to 0, since a zero-length prefix can never disambiguate.
    pub fn new(options: ShortenerOptions) -> Result<Self, DgstoreError> {
        if options.min_length == Some(0) {
            return Err(DgstoreError::InvalidOption(
                "\"min_length\" must be greater than or equal to one; got 0".to_string(),
            ));
        }

        Ok(Self {
            full_length: options.full_length,
            min_length: options.min_length.unwrap_or(DEFAULT_MIN_LENGTH),
            known: Vec::new(),
        })
    }

    /// Create a shortener with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            full_length: false,
            min_length: DEFAULT_MIN_LENGTH,
            known: Vec::new(),
        }
    }

    /// The configured minimum prefix length.
    #[must_use]
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Shorten a digest to its shortest unambiguous hex prefix.
    ///
    /// The prefix is guaranteed not to be the start of any previously
    /// shortened digest's full hex, nor of `differs_from` when given. When no
    /// prefix below the full length is free of collisions (or in full-length
    /// mode) the full hex is returned. Either way the digest's full hex is
    /// appended to the history.
    pub fn shorten(&mut self, digest: &Digest, differs_from: Option<&Digest>) -> String {
        let hex = digest.hex();

        if self.full_length {
            self.known.push(hex.to_string());
            return hex.to_string();
        }

        let mut length = self.min_length;
        while length <= hex.len() {
            let candidate = &hex[..length];

            let collides = self
                .known
                .iter()
                .map(String::as_str)
                .chain(differs_from.map(Digest::hex))
                .any(|other| other.starts_with(candidate));

            if !collides {
                let short = candidate.to_string();
                self.known.push(hex.to_string());
                return short;
            }

            length += 1;
        }

        self.known.push(hex.to_string());
        hex.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DIGEST_SIZE;

    fn digest_from_prefix(prefix: &[u8]) -> Digest {
        let mut bytes = [0u8; DIGEST_SIZE];
        bytes[..prefix.len()].copy_from_slice(prefix);
        Digest::new(bytes)
    }

    #[test]
    fn test_min_length_defaults_to_six() {
        let mut shortener = DigestShortener::with_defaults();
        let short = shortener.shorten(&digest_from_prefix(&[0xab, 0xcd, 0xef]), None);
        assert_eq!(short, "abcdef");
    }

    #[test]
    fn test_zero_min_length_is_rejected() {
        let err = DigestShortener::new(ShortenerOptions {
            full_length: false,
            min_length: Some(0),
        })
        .unwrap_err();
        assert!(matches!(err, DgstoreError::InvalidOption(_)));
    }

    #[test]
    fn test_custom_min_length() {
        let mut shortener = DigestShortener::new(ShortenerOptions {
            full_length: false,
            min_length: Some(2),
        })
        .unwrap();
        assert_eq!(shortener.shorten(&digest_from_prefix(&[0xab]), None), "ab");
    }

    #[test]
    fn test_lengthens_past_shared_prefix() {
        // Hexes "abc1…" and "abd2…" share "ab" and diverge at position 3:
        // with min_length 2 both must come out at length 3.
        let mut shortener = DigestShortener::new(ShortenerOptions {
            full_length: false,
            min_length: Some(2),
        })
        .unwrap();

        let first = digest_from_prefix(&[0xab, 0xc1]);
        let second = digest_from_prefix(&[0xab, 0xd2]);

        assert_eq!(shortener.shorten(&first, None), "ab");
        assert_eq!(shortener.shorten(&second, None), "abd");
    }

    #[test]
    fn test_differs_from_forces_distinct_prefixes() {
        let mut shortener = DigestShortener::new(ShortenerOptions {
            full_length: false,
            min_length: Some(2),
        })
        .unwrap();

        let digest = digest_from_prefix(&[0xab, 0xc1]);
        let other = digest_from_prefix(&[0xab, 0xd2]);

        // "ab" is a prefix of the other digest's hex, so the candidate must
        // grow until it diverges.
        assert_eq!(shortener.shorten(&digest, Some(&other)), "abc");
        assert_eq!(shortener.shorten(&other, Some(&digest)), "abd");
    }

    #[test]
    fn test_full_length_mode_always_returns_full_hex() {
        let mut shortener = DigestShortener::new(ShortenerOptions {
            full_length: true,
            min_length: None,
        })
        .unwrap();

        let digest = digest_from_prefix(&[0x12, 0x34]);
        assert_eq!(shortener.shorten(&digest, None), digest.hex());
        // History does not change the outcome.
        assert_eq!(shortener.shorten(&digest, None), digest.hex());
    }

    #[test]
    fn test_reshortening_same_digest_returns_full_hex() {
        let mut shortener = DigestShortener::with_defaults();
        let digest = digest_from_prefix(&[0xab, 0xcd, 0xef]);

        assert_eq!(shortener.shorten(&digest, None), "abcdef");
        // The first call put the full hex into the history; every prefix of
        // the same digest now collides with it.
        assert_eq!(shortener.shorten(&digest, None), digest.hex());
    }

    #[test]
    fn test_distinct_digests_get_non_overlapping_prefixes() {
        let mut shortener = DigestShortener::with_defaults();

        let first = digest_from_prefix(&[0x11, 0x22, 0x33]);
        let second = digest_from_prefix(&[0x44, 0x55, 0x66]);

        let a = shortener.shorten(&first, None);
        let b = shortener.shorten(&second, None);

        assert!(!a.starts_with(&b));
        assert!(!b.starts_with(&a));
    }

    #[test]
    fn test_deterministic_given_same_history() {
        let digests = [
            digest_from_prefix(&[0xaa, 0xbb]),
            digest_from_prefix(&[0xaa, 0xcc]),
            digest_from_prefix(&[0xdd]),
        ];

        let mut first = DigestShortener::with_defaults();
        let mut second = DigestShortener::with_defaults();

        for digest in &digests {
            assert_eq!(first.shorten(digest, None), second.shorten(digest, None));
        }
    }

    #[test]
    fn test_min_length_beyond_hex_length_falls_back_to_full() {
        let mut shortener = DigestShortener::new(ShortenerOptions {
            full_length: false,
            min_length: Some(DIGEST_SIZE * 2 + 1),
        })
        .unwrap();

        let digest = digest_from_prefix(&[0x01]);
        assert_eq!(shortener.shorten(&digest, None), digest.hex());
    }
}
