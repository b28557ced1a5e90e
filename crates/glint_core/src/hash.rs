//! Stateless hash suite
//!
//! Pure functions from integers, word slices, plain-old-data values and
//! strings to uniformly distributed 32- or 64-bit words. Nothing is retained
//! between calls, so every function is safe to call from any thread.
//!
//! Seeding is "combine then hash": the key is paired with the seed and the
//! result goes through the unseeded finalizer. [`Digest32`] and [`Digest64`]
//! expose the same derived distributions as [`crate::Random`], computed from
//! a hash instead of an engine draw.

use crate::bits::{self, RangeError};
use crate::pair::{fold32, fold64, fold_left32, fold_left64, pair32, pair64};
use bytemuck::NoUninit;

const MUL64: u64 = 0x9ddf_ea08_eb38_2d69;

/// 64-bit finalizer.
#[inline]
pub fn hash_u64(n: u64) -> u64 {
    let mut x = n.wrapping_mul(MUL64);
    x ^= x >> 47;
    x ^= n;
    x = x.wrapping_mul(MUL64);
    x ^= x >> 47;
    x.wrapping_mul(MUL64)
}

/// 32-bit finalizer (murmur3 fmix32).
#[inline]
pub fn hash_u32(mut n: u32) -> u32 {
    n ^= n >> 16;
    n = n.wrapping_mul(0x85eb_ca6b);
    n ^= n >> 13;
    n = n.wrapping_mul(0xc2b2_ae35);
    n ^= n >> 16;
    n
}

#[inline]
pub fn hash_u64_seeded(n: u64, seed: u64) -> u64 {
    hash_u64(pair64(n, seed))
}

#[inline]
pub fn hash_u32_seeded(n: u32, seed: u32) -> u32 {
    hash_u32(pair32(n, seed))
}

/// Hash several keys folded with the fixed pairing tree.
///
/// Two keys hash exactly like `hash_u64_seeded(keys[0], keys[1])`.
pub fn hash_u64_keys(keys: &[u64]) -> u64 {
    hash_u64(fold64(keys))
}

pub fn hash_u32_keys(keys: &[u32]) -> u32 {
    hash_u32(fold32(keys))
}

// ----------------------------------------------------------------------------
// Word slices, values, arrays and strings
// ----------------------------------------------------------------------------

fn chain64(words: &[u64]) -> u64 {
    match words.split_first() {
        Some((&first, rest)) => fold_left64(first, rest.iter().copied()),
        None => 0,
    }
}

fn chain32(words: &[u32]) -> u32 {
    match words.split_first() {
        Some((&first, rest)) => fold_left32(first, rest.iter().copied()),
        None => 0,
    }
}

/// Little-endian 64-bit words of `bytes`, zero-padding the last one.
fn words64(bytes: &[u8]) -> impl Iterator<Item = u64> + '_ {
    bytes.chunks(8).map(|chunk| {
        let mut word = [0u8; 8];
        word[..chunk.len()].copy_from_slice(chunk);
        u64::from_le_bytes(word)
    })
}

/// Little-endian 32-bit words of `bytes`, zero-padding the last one.
fn words32(bytes: &[u8]) -> impl Iterator<Item = u32> + '_ {
    bytes.chunks(4).map(|chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        u32::from_le_bytes(word)
    })
}

fn value_key64<T: NoUninit>(value: &T) -> u64 {
    let words: Vec<u64> = words64(bytemuck::bytes_of(value)).collect();
    chain64(&words)
}

fn value_key32<T: NoUninit>(value: &T) -> u32 {
    let words: Vec<u32> = words32(bytemuck::bytes_of(value)).collect();
    chain32(&words)
}

// Each element is padded to whole words on its own before folding.
fn array_key64<T: NoUninit>(items: &[T]) -> u64 {
    items
        .iter()
        .fold(0, |x, item| fold_left64(x, words64(bytemuck::bytes_of(item))))
}

fn array_key32<T: NoUninit>(items: &[T]) -> u32 {
    items
        .iter()
        .fold(0, |x, item| fold_left32(x, words32(bytemuck::bytes_of(item))))
}

fn str_key64(text: &str) -> u64 {
    fold_left64(0, text.bytes().map(u64::from))
}

fn str_key32(text: &str) -> u32 {
    fold_left32(0, text.bytes().map(u32::from))
}

/// Hash a slice of words folded left to right from the first word.
pub fn hash_words64(words: &[u64]) -> u64 {
    hash_u64(chain64(words))
}

pub fn hash_words64_seeded(words: &[u64], seed: u64) -> u64 {
    hash_u64_seeded(chain64(words), seed)
}

pub fn hash_words32(words: &[u32]) -> u32 {
    hash_u32(chain32(words))
}

pub fn hash_words32_seeded(words: &[u32], seed: u32) -> u32 {
    hash_u32_seeded(chain32(words), seed)
}

/// Hash the raw little-endian bytes of a plain-old-data value.
pub fn hash_value64<T: NoUninit>(value: &T) -> u64 {
    hash_u64(value_key64(value))
}

pub fn hash_value64_seeded<T: NoUninit>(value: &T, seed: u64) -> u64 {
    hash_u64_seeded(value_key64(value), seed)
}

pub fn hash_value32<T: NoUninit>(value: &T) -> u32 {
    hash_u32(value_key32(value))
}

pub fn hash_value32_seeded<T: NoUninit>(value: &T, seed: u32) -> u32 {
    hash_u32_seeded(value_key32(value), seed)
}

/// Hash every element of `items`, folding all their words from zero.
pub fn hash_array64<T: NoUninit>(items: &[T]) -> u64 {
    hash_u64(array_key64(items))
}

pub fn hash_array64_seeded<T: NoUninit>(items: &[T], seed: u64) -> u64 {
    hash_u64_seeded(array_key64(items), seed)
}

pub fn hash_array32<T: NoUninit>(items: &[T]) -> u32 {
    hash_u32(array_key32(items))
}

pub fn hash_array32_seeded<T: NoUninit>(items: &[T], seed: u32) -> u32 {
    hash_u32_seeded(array_key32(items), seed)
}

/// Hash a string one byte per pairing step. The 32- and 64-bit results are
/// unrelated.
pub fn hash_str64(text: &str) -> u64 {
    hash_u64(str_key64(text))
}

pub fn hash_str64_seeded(text: &str, seed: u64) -> u64 {
    hash_u64_seeded(str_key64(text), seed)
}

pub fn hash_str32(text: &str) -> u32 {
    hash_u32(str_key32(text))
}

pub fn hash_str32_seeded(text: &str, seed: u32) -> u32 {
    hash_u32_seeded(str_key32(text), seed)
}

// ----------------------------------------------------------------------------
// Keyed array operations
// ----------------------------------------------------------------------------

/// Fisher–Yates shuffle driven by `hash_u64_seeded(size, seed)`.
pub fn shuffle64<T>(items: &mut [T], seed: u64) {
    for size in (1..=items.len()).rev() {
        let swap = (hash_u64_seeded(size as u64, seed) % size as u64) as usize;
        items.swap(size - 1, swap);
    }
}

/// Fisher–Yates shuffle driven by `hash_u32_seeded(size, seed)`.
///
/// Slices longer than `u32::MAX` are not supported by the 32-bit variant.
pub fn shuffle32<T>(items: &mut [T], seed: u32) {
    for size in (1..=items.len()).rev() {
        let swap = (hash_u32_seeded(size as u32, seed) % size as u32) as usize;
        items.swap(size - 1, swap);
    }
}

/// Element selected by `hash_u64(key)`; `None` for an empty slice.
pub fn element64<T>(items: &[T], key: u64) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    items.get((hash_u64(key) % items.len() as u64) as usize)
}

/// Element selected by `hash_u32(key)`; `None` for an empty slice.
pub fn element32<T>(items: &[T], key: u32) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    items.get((hash_u32(key) % items.len() as u32) as usize)
}

// ----------------------------------------------------------------------------
// Derived distributions
// ----------------------------------------------------------------------------

/// A finished 64-bit hash with the engine's 64-bit derived distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest64(u64);

impl Digest64 {
    pub fn new(n: u64) -> Self {
        Self(hash_u64(n))
    }

    pub fn seeded(n: u64, seed: u64) -> Self {
        Self(hash_u64_seeded(n, seed))
    }

    pub fn keys(keys: &[u64]) -> Self {
        Self(hash_u64_keys(keys))
    }

    pub fn value<T: NoUninit>(value: &T) -> Self {
        Self(hash_value64(value))
    }

    pub fn array<T: NoUninit>(items: &[T]) -> Self {
        Self(hash_array64(items))
    }

    pub fn str(text: &str) -> Self {
        Self(hash_str64(text))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn as_i64(self) -> i64 {
        bits::as_i64(self.0)
    }

    pub fn positive_i64(self) -> i64 {
        bits::positive_i64(self.0)
    }

    pub fn f64_closed(self) -> f64 {
        bits::f64_closed(self.0)
    }

    pub fn f64_half_open(self) -> f64 {
        bits::f64_half_open(self.0)
    }

    pub fn f64_open(self) -> f64 {
        bits::f64_open(self.0)
    }
}

/// A finished 32-bit hash with the engine's 32-bit derived distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest32(u32);

impl Digest32 {
    pub fn new(n: u32) -> Self {
        Self(hash_u32(n))
    }

    pub fn seeded(n: u32, seed: u32) -> Self {
        Self(hash_u32_seeded(n, seed))
    }

    pub fn keys(keys: &[u32]) -> Self {
        Self(hash_u32_keys(keys))
    }

    pub fn value<T: NoUninit>(value: &T) -> Self {
        Self(hash_value32(value))
    }

    pub fn array<T: NoUninit>(items: &[T]) -> Self {
        Self(hash_array32(items))
    }

    pub fn str(text: &str) -> Self {
        Self(hash_str32(text))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_i32(self) -> i32 {
        bits::as_i32(self.0)
    }

    pub fn positive_i32(self) -> i32 {
        bits::positive_i32(self.0)
    }

    pub fn f32_closed(self) -> f32 {
        bits::f32_closed(self.0)
    }

    pub fn f32_half_open(self) -> f32 {
        bits::f32_half_open(self.0)
    }

    pub fn f32_open(self) -> f32 {
        bits::f32_open(self.0)
    }

    pub fn to_u8(self) -> u8 {
        bits::low_byte(self.0)
    }

    pub fn to_bool(self) -> bool {
        bits::low_bit(self.0)
    }

    pub fn int_between(self, min: i32, max: i32) -> Result<i32, RangeError> {
        bits::int_between(self.0, min, max)
    }

    pub fn f32_between(self, min: f32, max: f32) -> f32 {
        bits::f32_between(self.0, min, max)
    }

    pub fn f32_normal(self) -> f32 {
        bits::normal_from_open(self.f32_open())
    }

    pub fn f32_normal_with(self, mean: f32, std_dev: f32) -> f32 {
        self.f32_normal() * std_dev + mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::{Pod, Zeroable};

    #[derive(Clone, Copy, Pod, Zeroable)]
    #[repr(C)]
    struct Cell {
        x: i32,
        y: i32,
        z: i32,
    }

    #[test]
    fn test_finalizers_are_deterministic() {
        for n in [0u64, 1, 42, u64::MAX] {
            assert_eq!(hash_u64(n), hash_u64(n));
            assert_eq!(hash_u32(n as u32), hash_u32(n as u32));
        }
    }

    #[test]
    fn test_fmix32_reference_values() {
        assert_eq!(hash_u32(0), 0);
        // x ^= x >> 16 leaves 1, then two multiply/xorshift rounds
        let mut x: u32 = 1u32.wrapping_mul(0x85eb_ca6b);
        x ^= x >> 13;
        x = x.wrapping_mul(0xc2b2_ae35);
        x ^= x >> 16;
        assert_eq!(hash_u32(1), x);
    }

    #[test]
    fn test_finalizer64_zero_is_fixed_point() {
        assert_eq!(hash_u64(0), 0);
        assert_ne!(hash_u64(1), 1);
    }

    fn mean_flipped_bits64(samples: u64) -> f64 {
        let mut total = 0u64;
        for n in 1..=samples {
            let base = hash_u64(n * 0x9e37_79b9);
            for bit in 0..64 {
                let flipped = hash_u64((n * 0x9e37_79b9) ^ (1 << bit));
                total += u64::from((base ^ flipped).count_ones());
            }
        }
        total as f64 / (samples * 64) as f64
    }

    fn mean_flipped_bits32(samples: u32) -> f64 {
        let mut total = 0u64;
        for n in 1..=samples {
            let key = n.wrapping_mul(0x9e37_79b9);
            let base = hash_u32(key);
            for bit in 0..32 {
                let flipped = hash_u32(key ^ (1 << bit));
                total += u64::from((base ^ flipped).count_ones());
            }
        }
        total as f64 / (u64::from(samples) * 32) as f64
    }

    #[test]
    fn test_avalanche() {
        let mean64 = mean_flipped_bits64(500);
        assert!((mean64 - 32.0).abs() < 1.5, "64-bit mean flips {}", mean64);

        let mean32 = mean_flipped_bits32(500);
        assert!((mean32 - 16.0).abs() < 1.0, "32-bit mean flips {}", mean32);
    }

    #[test]
    fn test_seeding_combines_then_hashes() {
        assert_eq!(hash_u64_seeded(10, 20), hash_u64(pair64(10, 20)));
        assert_eq!(hash_u32_seeded(10, 20), hash_u32(pair32(10, 20)));
        assert_ne!(hash_u64_seeded(10, 20), hash_u64_seeded(10, 21));
    }

    #[test]
    fn test_keys_use_reduction_tree() {
        assert_eq!(hash_u64_keys(&[1, 2, 3]), hash_u64(69));
        assert_eq!(hash_u32_keys(&[1, 2, 3]), hash_u32(69));
        assert_eq!(hash_u64_keys(&[4, 5]), hash_u64_seeded(4, 5));
        assert_eq!(hash_u64_keys(&[4]), hash_u64(4));
    }

    #[test]
    fn test_words_fold_left_from_first() {
        assert_eq!(hash_words64(&[7]), hash_u64(7));
        assert_eq!(hash_words64(&[1, 2, 3]), hash_u64(pair64(pair64(1, 2), 3)));
        assert_eq!(hash_words32(&[]), hash_u32(0));
        assert_eq!(
            hash_words32_seeded(&[1, 2], 9),
            hash_u32(pair32(pair32(1, 2), 9))
        );
    }

    #[test]
    fn test_value_uses_padded_words() {
        let cell = Cell { x: 1, y: 2, z: 3 };

        // 12 bytes -> two 64-bit words, the second zero-padded
        let lo = 1u64 | (2u64 << 32);
        assert_eq!(hash_value64(&cell), hash_u64(pair64(lo, 3)));

        // 12 bytes -> three 32-bit words
        assert_eq!(hash_value32(&cell), hash_u32(pair32(pair32(1, 2), 3)));
        assert_eq!(hash_value32_seeded(&cell, 5), hash_u32_seeded(69, 5));
    }

    #[test]
    fn test_value_of_single_word_is_plain_hash() {
        assert_eq!(hash_value64(&99u64), hash_u64(99));
        assert_eq!(hash_value32(&99u32), hash_u32(99));
        assert_eq!(hash_value32(&1.0f32), hash_u32(1.0f32.to_bits()));
    }

    #[test]
    fn test_array_folds_from_zero() {
        let items = [1u32, 2, 3];
        let expected = pair32(pair32(pair32(0, 1), 2), 3);
        assert_eq!(hash_array32(&items), hash_u32(expected));
        assert_eq!(hash_array32_seeded(&items, 4), hash_u32_seeded(expected, 4));

        // Each u16 pads to its own 32-bit word
        let halves = [1u16, 2];
        assert_eq!(hash_array32(&halves), hash_u32(pair32(pair32(0, 1), 2)));

        let empty: [u64; 0] = [];
        assert_eq!(hash_array64(&empty), hash_u64(0));
    }

    #[test]
    fn test_string_is_order_and_length_sensitive() {
        assert_eq!(hash_str32("ab"), hash_u32(pair32(pair32(0, 97), 98)));
        assert_ne!(hash_str64("ab"), hash_str64("ba"));
        assert_ne!(hash_str64("a"), hash_str64("a\0"));
        assert_ne!(hash_str32("seed"), hash_str32_seeded("seed", 1));
        assert_eq!(hash_str64_seeded("", 3), hash_u64_seeded(0, 3));
    }

    #[test]
    fn test_keyed_shuffle_is_reproducible_permutation() {
        let original: Vec<u32> = (0..64).collect();

        let mut a = original.clone();
        let mut b = original.clone();
        shuffle64(&mut a, 1234);
        shuffle64(&mut b, 1234);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, original);

        let mut c = original.clone();
        shuffle32(&mut c, 1234);
        let mut sorted = c.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, original);

        let mut one = ['x'];
        shuffle32(&mut one, 9);
        assert_eq!(one, ['x']);
    }

    #[test]
    fn test_keyed_element() {
        let empty: [i32; 0] = [];
        assert!(element64(&empty, 1).is_none());
        assert!(element32(&empty, 1).is_none());

        let items = [10, 20, 30, 40, 50];
        let expected = items[(hash_u32(77) % 5) as usize];
        assert_eq!(element32(&items, 77), Some(&expected));
        assert_eq!(element64(&items, 77), element64(&items, 77));
    }

    #[test]
    fn test_digest_matches_engine_mappings() {
        let d = Digest32::seeded(17, 3);
        let raw = hash_u32_seeded(17, 3);
        assert_eq!(d.get(), raw);
        assert_eq!(d.f32_open(), bits::f32_open(raw));
        assert_eq!(d.int_between(0, 10), bits::int_between(raw, 0, 10));
        assert!(d.int_between(3, 3).is_err());
        assert_eq!(d.to_u8(), raw as u8);

        let d = Digest64::keys(&[1, 2, 3]);
        assert_eq!(d.get(), hash_u64(69));
        assert!((0.0..=1.0).contains(&d.f64_closed()));
        assert!(d.positive_i64() >= 0);
    }

    #[test]
    fn test_digest_from_strings_and_arrays() {
        let cells = [Cell { x: 1, y: 2, z: 3 }, Cell { x: -4, y: 5, z: 0 }];

        assert_eq!(Digest32::str("glint").get(), hash_str32("glint"));
        assert_eq!(Digest64::str("glint").get(), hash_str64("glint"));
        assert_eq!(Digest32::array(&cells).get(), hash_array32(&cells));
        assert_eq!(Digest64::array(&cells).get(), hash_array64(&cells));

        let d = Digest32::str("palette");
        let raw = hash_str32("palette");
        assert_eq!(d.f32_closed(), bits::f32_closed(raw));
        assert_eq!(d.int_between(-3, 9), bits::int_between(raw, -3, 9));
        assert_ne!(Digest32::array(&cells[..1]), Digest32::array(&cells));
    }

    #[test]
    fn test_digest_normal_statistics() {
        let n = 50_000u32;
        let samples: Vec<f64> = (0..n).map(|i| Digest32::new(i).f32_normal() as f64).collect();
        let mean = samples.iter().sum::<f64>() / f64::from(n);
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / f64::from(n);
        assert!(mean.abs() < 0.03, "mean {}", mean);
        assert!((var.sqrt() - 1.098).abs() < 0.02, "std dev {}", var.sqrt());
    }

    #[test]
    fn test_hashing_is_thread_safe() {
        let expected: Vec<u64> = (0..1000).map(hash_u64).collect();
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..1000).map(hash_u64).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
