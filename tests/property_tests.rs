//! Property-based tests for the digest shortener.

use proptest::prelude::*;

use dgstore::digest::{Digest, DIGEST_SIZE};
use dgstore::shortener::{DigestShortener, ShortenerOptions, DEFAULT_MIN_LENGTH};

fn digest_strategy() -> impl Strategy<Value = Digest> {
    prop::collection::vec(any::<u8>(), DIGEST_SIZE).prop_map(|bytes| {
        let mut array = [0u8; DIGEST_SIZE];
        array.copy_from_slice(&bytes);
        Digest::new(array)
    })
}

proptest! {
    /// Every emitted prefix identifies its digest against everything seen
    /// before it: it is a prefix of the digest's own hex, at least the
    /// minimum length, and no earlier digest's hex starts with it.
    #[test]
    fn shortened_prefixes_do_not_collide_with_history(
        digests in prop::collection::vec(digest_strategy(), 1..20)
    ) {
        let mut shortener = DigestShortener::with_defaults();
        let mut history: Vec<String> = Vec::new();

        for digest in &digests {
            let short = shortener.shorten(digest, None);

            prop_assert!(digest.hex().starts_with(&short));
            prop_assert!(short.len() >= DEFAULT_MIN_LENGTH || short == digest.hex());

            if short != digest.hex() {
                for earlier in &history {
                    prop_assert!(!earlier.starts_with(&short));
                }
            }

            history.push(digest.hex().to_string());
        }
    }

    /// Full-length mode always returns the complete hex string.
    #[test]
    fn full_length_mode_ignores_history(
        digests in prop::collection::vec(digest_strategy(), 1..10)
    ) {
        let mut shortener = DigestShortener::new(ShortenerOptions {
            full_length: true,
            min_length: None,
        }).unwrap();

        for digest in &digests {
            prop_assert_eq!(shortener.shorten(digest, None), digest.hex());
        }
    }

    /// Shortening is deterministic for identical input sequences.
    #[test]
    fn shortening_is_deterministic(
        digests in prop::collection::vec(digest_strategy(), 1..10)
    ) {
        let mut first = DigestShortener::with_defaults();
        let mut second = DigestShortener::with_defaults();

        for digest in &digests {
            prop_assert_eq!(first.shorten(digest, None), second.shorten(digest, None));
        }
    }

    /// The differs-from digest is never a hex extension of the result.
    #[test]
    fn differs_from_is_respected(a in digest_strategy(), b in digest_strategy()) {
        prop_assume!(a != b);

        let mut shortener = DigestShortener::with_defaults();
        let short = shortener.shorten(&a, Some(&b));

        if short != a.hex() {
            prop_assert!(!b.hex().starts_with(&short));
        }
    }
}
