//! Seeded pseudorandom engine
//!
//! MT19937-64 (Nishimura & Matsumoto) with a split 32-bit path: one 64-bit
//! draw feeds two consecutive `next_u32` calls, low half first.
//! Every derived distribution goes through [`crate::bits`], which the hash
//! suite shares.

use crate::bits::{self, RangeError};

const STATE_WORDS: usize = 312;
const MID: usize = 156;
const MATRIX_A: u64 = 0xb502_6f5a_a966_19e9;
const UPPER_MASK: u64 = 0xffff_ffff_8000_0000; // most significant 33 bits
const LOWER_MASK: u64 = 0x0000_0000_7fff_ffff; // least significant 31 bits
const INIT_MULTIPLIER: u64 = 0x5851_f42d_4c95_7f2d;

/// Deterministic random engine.
///
/// Two engines built from the same seed yield the same sequence forever.
/// The type is `Clone` but not `Copy`: cloning duplicates the entire future
/// sequence and should be a deliberate choice. Share an engine across threads
/// only behind external synchronization; prefer one engine per task.
#[derive(Clone)]
pub struct Random {
    state: Box<[u64; STATE_WORDS]>,
    index: usize,
    cache: Option<u32>,
}

impl Random {
    /// Create an engine from `seed`. Every seed, zero included, is valid.
    pub fn new(seed: u64) -> Self {
        let mut state = Box::new([0u64; STATE_WORDS]);
        state[0] = seed;
        for i in 1..STATE_WORDS {
            let prev = state[i - 1];
            state[i] = INIT_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 62))
                .wrapping_add(i as u64);
        }

        Self {
            state,
            index: STATE_WORDS, // first draw regenerates the whole state
            cache: None,
        }
    }

    /// Regenerate all 312 words at once.
    fn twist(&mut self) {
        let mt = &mut self.state;
        for i in 0..STATE_WORDS {
            let next = mt[(i + 1) % STATE_WORDS];
            let x = (mt[i] & UPPER_MASK) | (next & LOWER_MASK);
            let mag = if x & 1 == 1 { MATRIX_A } else { 0 };
            mt[i] = mt[(i + MID) % STATE_WORDS] ^ (x >> 1) ^ mag;
        }
        self.index = 0;
    }

    /// Uniform 64-bit word.
    pub fn next_u64(&mut self) -> u64 {
        if self.index >= STATE_WORDS {
            self.twist();
        }

        let mut x = self.state[self.index];
        self.index += 1;

        // Tempering
        x ^= (x >> 29) & 0x5555_5555_5555_5555;
        x ^= (x << 17) & 0x71d6_7fff_eda6_0000;
        x ^= (x << 37) & 0xfff7_eee0_0000_0000;
        x ^= x >> 43;
        x
    }

    /// Uniform 64-bit signed integer.
    pub fn next_i64(&mut self) -> i64 {
        bits::as_i64(self.next_u64())
    }

    /// Uniform integer on `[0, 2^63)`.
    pub fn positive_i64(&mut self) -> i64 {
        bits::positive_i64(self.next_u64())
    }

    /// Uniform 32-bit word. Consumes half of a 64-bit draw.
    pub fn next_u32(&mut self) -> u32 {
        if let Some(high) = self.cache.take() {
            return high;
        }

        let x = self.next_u64();
        self.cache = Some((x >> 32) as u32);
        x as u32
    }

    /// Uniform 32-bit signed integer.
    pub fn next_i32(&mut self) -> i32 {
        bits::as_i32(self.next_u32())
    }

    /// Uniform integer on `[0, 2^31)`.
    pub fn positive_i32(&mut self) -> i32 {
        bits::positive_i32(self.next_u32())
    }

    /// Double on `[0, 1]`.
    pub fn f64_closed(&mut self) -> f64 {
        bits::f64_closed(self.next_u64())
    }

    /// Double on `[0, 1)`.
    pub fn f64_half_open(&mut self) -> f64 {
        bits::f64_half_open(self.next_u64())
    }

    /// Double on `(0, 1)`.
    pub fn f64_open(&mut self) -> f64 {
        bits::f64_open(self.next_u64())
    }

    /// Float on `[0, 1]`.
    pub fn f32_closed(&mut self) -> f32 {
        bits::f32_closed(self.next_u32())
    }

    /// Float on `[0, 1)`.
    pub fn f32_half_open(&mut self) -> f32 {
        bits::f32_half_open(self.next_u32())
    }

    /// Float on `(0, 1)`.
    pub fn f32_open(&mut self) -> f32 {
        bits::f32_open(self.next_u32())
    }

    pub fn next_u8(&mut self) -> u8 {
        bits::low_byte(self.next_u32())
    }

    pub fn next_bool(&mut self) -> bool {
        bits::low_bit(self.next_u32())
    }

    /// Integer on `[min, max)`. See [`bits::int_between`] for the bias note.
    ///
    /// An empty range is rejected before anything is drawn.
    pub fn int_between(&mut self, min: i32, max: i32) -> Result<i32, RangeError> {
        if max <= min {
            return Err(RangeError::Empty { min, max });
        }
        bits::int_between(self.next_u32(), min, max)
    }

    /// Float on `[min, max]`.
    pub fn f32_between(&mut self, min: f32, max: f32) -> f32 {
        bits::f32_between(self.next_u32(), min, max)
    }

    /// Approximately normal float with mean 0. The fast quantile widens the tails,
    /// so the standard deviation comes out near 1.1 rather than 1.
    pub fn f32_normal(&mut self) -> f32 {
        bits::normal_from_open(self.f32_open())
    }

    /// Approximately normal float with the given mean and standard deviation.
    pub fn f32_normal_with(&mut self, mean: f32, std_dev: f32) -> f32 {
        self.f32_normal() * std_dev + mean
    }

    /// Uniform index into a collection of `len` items; `None` when empty.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.next_u32() as usize % len)
    }

    /// Uniformly chosen element; `None` for an empty slice.
    pub fn element<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).map(|i| &items[i])
    }

    pub fn element_mut<'a, T>(&mut self, items: &'a mut [T]) -> Option<&'a mut T> {
        self.index(items.len()).map(move |i| &mut items[i])
    }

    /// Fisher–Yates shuffle in place, walking the length down to 1.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for size in (1..=items.len()).rev() {
            let swap = self.next_u32() as usize % size;
            items.swap(size - 1, swap);
        }
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new(0)
    }
}

impl std::fmt::Debug for Random {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Random")
            .field("index", &self.index)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
