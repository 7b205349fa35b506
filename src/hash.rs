//! Polynomial string hash used for bucket placement.
//!
//! `hash("") == 0` and `hash(s + c) == hash(s) * 65599 + c`, evaluated in
//! wrapping `u64` arithmetic. Bucket placement depends on this exact output,
//! so the fold below must stay bit-for-bit stable.

/// Multiplier applied to the running hash before adding each character.
pub const HASH_MULTIPLIER: u64 = 65599;

/// Hash `key` by folding its bytes left to right.
///
/// Each byte contributes the value of a signed 8-bit character: bytes at or
/// above `0x80` are sign-extended before being added, so non-ASCII keys hash
/// the same way as their C-string counterparts on platforms with signed
/// `char`.
#[inline]
pub fn hash_code(key: &str) -> u64 {
    key.bytes().fold(0u64, |acc, b| {
        acc.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(b as i8 as i64 as u64)
    })
}

/// Bucket index of `key` in a generation with `bucket_count` buckets.
#[inline]
pub(crate) fn bucket_index(key: &str, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0);
    (hash_code(key) % bucket_count as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: the empty key hashes to zero.
    #[test]
    fn empty_key_is_zero() {
        assert_eq!(hash_code(""), 0);
    }

    /// Invariant: single characters hash to their character code.
    #[test]
    fn single_char_is_its_code() {
        assert_eq!(hash_code("a"), 97);
        assert_eq!(hash_code("A"), 65);
        assert_eq!(hash_code("0"), 48);
    }

    /// Invariant: the fold matches the peel-the-last-character recurrence.
    #[test]
    fn matches_recurrence() {
        assert_eq!(hash_code("ab"), 97 * 65599 + 98);
        assert_eq!(hash_code("abc"), 417_419_622_498);

        fn peel(s: &str) -> u64 {
            match s.as_bytes().split_last() {
                None => 0,
                Some((&last, rest)) => {
                    let prefix = std::str::from_utf8(rest).unwrap_or("");
                    peel(prefix)
                        .wrapping_mul(65599)
                        .wrapping_add(last as i8 as i64 as u64)
                }
            }
        }
        for s in ["hello", "world", "key-0001", "zzzzzzzzzzzzzzzzzzzzzzz"] {
            assert_eq!(hash_code(s), peel(s), "mismatch for {s:?}");
        }
    }

    /// Invariant: long keys wrap instead of overflowing.
    #[test]
    fn long_keys_wrap() {
        let long = "x".repeat(4096);
        assert_eq!(hash_code(&long), hash_code(&long));
        assert_ne!(hash_code(&long), 0);
    }

    /// Invariant: bytes above 0x7f are sign-extended before being added.
    #[test]
    fn high_bytes_are_sign_extended() {
        // "é" is 0xC3 0xA9 in UTF-8, i.e. -61 and -87 as signed chars.
        assert_eq!(hash_code("é"), (-61i64 * 65599 - 87) as u64);
    }

    /// Invariant: the hash is order-sensitive.
    #[test]
    fn order_sensitive() {
        assert_ne!(hash_code("ab"), hash_code("ba"));
    }

    #[test]
    fn bucket_index_in_range() {
        for n in [1usize, 7, 8, 16, 1024] {
            for k in ["", "a", "hello", "é"] {
                let i = bucket_index(k, n);
                assert!(i < n);
                assert_eq!(i as u64, hash_code(k) % n as u64);
            }
        }
    }
}
