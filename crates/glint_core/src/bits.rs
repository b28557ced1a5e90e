//! Fixed-width conversions shared by the engine and the hash suite
//!
//! Every derived distribution maps one raw 32- or 64-bit word to its output
//! through the functions below, so `Random` and `Digest32`/`Digest64` reach
//! exactly the same value sets with the same rounding.

use thiserror::Error;

/// Scale of the fast normal quantile: `sqrt(2) * t * ln(2) * 2^-23`.
pub const NORMAL_SCALE: f32 = 5.0003944e-8;

const F64_CLOSED: f64 = 1.0 / 9_007_199_254_740_991.0; // 2^53 - 1
const F64_HALF_OPEN: f64 = 1.0 / 9_007_199_254_740_992.0; // 2^53
const F64_OPEN: f64 = 1.0 / 4_503_599_627_370_496.0; // 2^52
const F32_CLOSED: f32 = 1.0 / 16_777_215.0; // 2^24 - 1
const F32_HALF_OPEN: f32 = 1.0 / 16_777_216.0; // 2^24
const F32_OPEN: f32 = 1.0 / 8_388_608.0; // 2^23

/// Rejected bounded-integer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("empty range [{min}, {max}): max must be greater than min")]
    Empty { min: i32, max: i32 },
}

#[inline]
pub fn as_i64(word: u64) -> i64 {
    word as i64
}

/// Non-negative 63-bit value.
#[inline]
pub fn positive_i64(word: u64) -> i64 {
    (word >> 1) as i64
}

#[inline]
pub fn as_i32(word: u32) -> i32 {
    word as i32
}

/// Non-negative 31-bit value.
#[inline]
pub fn positive_i32(word: u32) -> i32 {
    (word >> 1) as i32
}

/// Double on `[0, 1]` from the top 53 bits.
#[inline]
pub fn f64_closed(word: u64) -> f64 {
    (word >> 11) as f64 * F64_CLOSED
}

/// Double on `[0, 1)` from the top 53 bits.
#[inline]
pub fn f64_half_open(word: u64) -> f64 {
    (word >> 11) as f64 * F64_HALF_OPEN
}

/// Double on `(0, 1)` from the top 52 bits, centred in its bucket.
#[inline]
pub fn f64_open(word: u64) -> f64 {
    ((word >> 12) as f64 + 0.5) * F64_OPEN
}

/// Float on `[0, 1]` from the top 24 bits.
#[inline]
pub fn f32_closed(word: u32) -> f32 {
    (word >> 8) as f32 * F32_CLOSED
}

/// Float on `[0, 1)` from the top 24 bits.
#[inline]
pub fn f32_half_open(word: u32) -> f32 {
    (word >> 8) as f32 * F32_HALF_OPEN
}

/// Float on `(0, 1)` from the top 23 bits, centred in its bucket.
#[inline]
pub fn f32_open(word: u32) -> f32 {
    ((word >> 9) as f32 + 0.5) * F32_OPEN
}

#[inline]
pub fn low_byte(word: u32) -> u8 {
    word as u8
}

#[inline]
pub fn low_bit(word: u32) -> bool {
    word & 1 == 1
}

/// Integer on `[min, max)` as `positive_i32(word) % (max - min) + min`.
///
/// Ranges that do not divide 2^31 evenly favour their low end slightly.
/// Kept as is so seed-derived outputs stay reproducible.
pub fn int_between(word: u32, min: i32, max: i32) -> Result<i32, RangeError> {
    if max <= min {
        return Err(RangeError::Empty { min, max });
    }
    let span = i64::from(max) - i64::from(min);
    let offset = i64::from(positive_i32(word)) % span;
    Ok((offset + i64::from(min)) as i32)
}

/// Float on `[min, max]` by remapping [`f32_closed`].
#[inline]
pub fn f32_between(word: u32, min: f32, max: f32) -> f32 {
    f32_closed(word) * (max - min) + min
}

/// Approximate standard normal sample from a uniform draw on `(0, 1)`.
///
/// `sqrt(2) * erfinv(2u - 1)` is approximated through the near-logarithmic
/// spacing of IEEE-754 bit patterns: `C * (bits(u) - bits(1 - u))`.
/// The result is symmetric around 0 with a standard deviation of about 1.098.
#[inline]
pub fn normal_from_open(u1: f32) -> f32 {
    let u2 = 1.0 - u1;
    let r1 = u1.to_bits() as i32;
    let r2 = u2.to_bits() as i32;
    NORMAL_SCALE * (r1 - r2) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_extremes() {
        assert_eq!(f64_closed(0), 0.0);
        assert_eq!(f64_closed(u64::MAX), 1.0);
        assert!(f64_half_open(u64::MAX) < 1.0);
        assert!(f64_open(0) > 0.0);
        assert!(f64_open(u64::MAX) < 1.0);

        assert_eq!(f32_closed(0), 0.0);
        assert_eq!(f32_closed(u32::MAX), 1.0);
        assert!(f32_half_open(u32::MAX) < 1.0);
        assert!(f32_open(0) > 0.0);
        assert!(f32_open(u32::MAX) < 1.0);
    }

    #[test]
    fn test_signed_views() {
        assert_eq!(as_i32(u32::MAX), -1);
        assert_eq!(positive_i32(u32::MAX), i32::MAX);
        assert_eq!(as_i64(u64::MAX), -1);
        assert_eq!(positive_i64(u64::MAX), i64::MAX);
    }

    #[test]
    fn test_int_between_rejects_empty_range() {
        assert_eq!(int_between(7, 5, 5), Err(RangeError::Empty { min: 5, max: 5 }));
        assert_eq!(int_between(7, 6, 5), Err(RangeError::Empty { min: 6, max: 5 }));
    }

    #[test]
    fn test_int_between_keeps_modulo_mapping() {
        // positive_i32(21) == 10, 10 % 4 == 2
        assert_eq!(int_between(21, 3, 7), Ok(5));
        assert_eq!(int_between(u32::MAX, i32::MIN, i32::MAX), Ok(-1));
    }

    #[test]
    fn test_normal_is_odd_around_half() {
        assert_eq!(normal_from_open(0.5), 0.0);
        let low = normal_from_open(0.25);
        let high = normal_from_open(0.75);
        assert!(low < 0.0 && high > 0.0);
        assert!((low + high).abs() < 1e-6);
    }
}
