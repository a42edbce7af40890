//! Key hashing and the bucket-count sequence.
//!
//! The hash is the classic multiplicative string hash
//! `h = h * 65599 + byte`, computed over `u64` with wrapping arithmetic so
//! values are identical on every platform. Bucket counts are drawn from a
//! fixed ascending sequence of primes to reduce clustering.

/// Multiplier applied to the running hash before adding each byte.
pub const HASH_MULTIPLIER: u64 = 65599;

/// Valid bucket counts, smallest first. Index into this array is a "tier".
pub const BUCKET_COUNTS: [usize; 8] = [509, 1021, 2039, 4093, 8191, 16381, 32749, 65521];

/// Full 64-bit hash of `key`. Overflow wraps.
#[inline]
pub fn hash_key(key: &str) -> u64 {
    key.bytes().fold(0u64, |h, b| {
        h.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u64::from(b))
    })
}

/// Reduce a full hash to a bucket index in `[0, bucket_count)`.
///
/// # Panics
///
/// Panics if `bucket_count` is zero.
#[inline]
pub fn reduce(hash: u64, bucket_count: usize) -> usize {
    (hash % bucket_count as u64) as usize
}

/// Bucket index of `key` in a table of `bucket_count` buckets.
///
/// # Panics
///
/// Panics if `bucket_count` is zero.
#[inline]
pub fn bucket_index(key: &str, bucket_count: usize) -> usize {
    reduce(hash_key(key), bucket_count)
}

/// Smallest tier whose bucket count is at least `capacity`, saturating at
/// the last tier.
pub fn tier_for_capacity(capacity: usize) -> usize {
    BUCKET_COUNTS
        .iter()
        .position(|&c| c >= capacity)
        .unwrap_or(BUCKET_COUNTS.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        assert_eq!(hash_key(""), 0);
        assert_eq!(hash_key("a"), 97);
        assert_eq!(hash_key("ab"), 97 * 65599 + 98);
        assert_eq!(bucket_index("ab", 509), 192);
        assert_eq!(bucket_index("ab", 1021), 329);
    }

    #[test]
    fn long_keys_wrap() {
        // 65599^8 exceeds u64, so this exercises wrapping.
        assert_eq!(hash_key("symtable"), 7_612_010_355_279_080_135);
        assert_eq!(bucket_index("symtable", 509), 78);
    }

    #[test]
    fn index_always_in_range() {
        for &n in BUCKET_COUNTS.iter() {
            for k in ["", "x", "hello world", "\u{1F600}", "zz"] {
                assert!(bucket_index(k, n) < n);
            }
        }
    }

    #[test]
    fn tiers_are_ascending_primes() {
        let is_prime = |n: usize| n > 1 && (2usize..).take_while(|d| d * d <= n).all(|d| n % d != 0);
        assert!(BUCKET_COUNTS.windows(2).all(|w| w[0] < w[1]));
        assert!(BUCKET_COUNTS.iter().all(|&n| is_prime(n)));
    }

    #[test]
    fn tier_selection() {
        assert_eq!(tier_for_capacity(0), 0);
        assert_eq!(tier_for_capacity(509), 0);
        assert_eq!(tier_for_capacity(510), 1);
        assert_eq!(tier_for_capacity(4000), 3);
        assert_eq!(tier_for_capacity(usize::MAX), BUCKET_COUNTS.len() - 1);
    }
}
