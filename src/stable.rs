/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Deterministic string hashing for reproducible "pseudo-random" choices.
//!
//! Text selection must be identical across runs and platforms, so it uses a
//! fixed FNV-1a over the key's UTF-8 bytes rather than any seeded PRNG or the
//! randomly keyed std hasher.

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1a hash of `key`.
pub fn stable_hash(key: &str) -> u32 {
    let mut h = FNV_OFFSET;
    for &b in key.as_bytes() {
        h ^= b as u32;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

/// Map `key` onto `0..len`. Returns 0 for an empty list.
pub fn stable_index(key: &str, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    stable_hash(key) as usize % len
}

/// Order-independent key for a pair of ids: the smaller id followed by the larger.
pub fn pair_key(a: &str, b: &str) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut key = String::with_capacity(lo.len() + hi.len());
    key.push_str(lo);
    key.push_str(hi);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_reference_vectors() {
        assert_eq!(stable_hash(""), 0x811c_9dc5);
        assert_eq!(stable_hash("a"), 0xe40c_292c);
        assert_eq!(stable_hash("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_stable_index_is_in_range_and_repeatable() {
        for len in 1..10 {
            let i = stable_index("T01L21", len);
            assert!(i < len);
            assert_eq!(i, stable_index("T01L21", len));
        }
        assert_eq!(stable_index("anything", 0), 0);
    }

    #[test]
    fn test_pair_key_ignores_argument_order() {
        assert_eq!(pair_key("L21", "T01"), "L21T01");
        assert_eq!(pair_key("T01", "L21"), "L21T01");
        assert_eq!(pair_key("V03", "V03"), "V03V03");
    }
}
