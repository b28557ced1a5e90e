//! Pairing functions for folding several integer keys into one
//!
//! The base case is the Cantor pairing `((a + b)^2 + (a + b)) / 2 + b` with
//! wrapping arithmetic, so results grow roughly as `O(a * b)`. Folds of more
//! than two keys use a fixed reduction tree that keeps intermediate values
//! small; the tree shape is part of every hash built on top of it.

/// Pair two 64-bit keys.
#[inline]
pub fn pair64(k0: u64, k1: u64) -> u64 {
    let sum = k0.wrapping_add(k1);
    (sum.wrapping_mul(sum).wrapping_add(sum) >> 1).wrapping_add(k1)
}

/// Pair two 32-bit keys.
#[inline]
pub fn pair32(k0: u32, k1: u32) -> u32 {
    let sum = k0.wrapping_add(k1);
    (sum.wrapping_mul(sum).wrapping_add(sum) >> 1).wrapping_add(k1)
}

/// Fold 64-bit keys with the fixed reduction tree. An empty slice folds to 0.
pub fn fold64(keys: &[u64]) -> u64 {
    fold_tree(keys, pair64)
}

/// Fold 32-bit keys with the fixed reduction tree. An empty slice folds to 0.
pub fn fold32(keys: &[u32]) -> u32 {
    fold_tree(keys, pair32)
}

/// Left fold `x = pair(x, k)` starting from `init`.
pub fn fold_left64(init: u64, keys: impl IntoIterator<Item = u64>) -> u64 {
    keys.into_iter().fold(init, pair64)
}

/// Left fold `x = pair(x, k)` starting from `init`.
pub fn fold_left32(init: u32, keys: impl IntoIterator<Item = u32>) -> u32 {
    keys.into_iter().fold(init, pair32)
}

fn fold_tree<T: Copy + Default>(keys: &[T], pair: fn(T, T) -> T) -> T {
    let mut work = keys.to_vec();
    reduce(&mut work, pair);
    work.first().copied().unwrap_or_default()
}

// Collapses `work` to a single key. Each arm pairs the same positions the
// next-smaller arity expects, down to the two-key base case:
//
//   3: P(P(k0,k1),k2)
//   4: P3(k0,k1,P(k2,k3))
//   5: P4(k0,k1,k2,P(k3,k4))
//   6: P5(k0,k1,P(k2,k3),k4,k5)
//   7: P6(k0,P(k1,k2),k3,k4,k5,k6)
//   8: P7(P(k0,k1),k2,k3,k4,k5,k6,k7)
//   n: P8(k0,..,k6,Pn-7(k7,..))
fn reduce<T: Copy>(work: &mut Vec<T>, pair: fn(T, T) -> T) {
    loop {
        let merge_at = match work.len() {
            0 | 1 => return,
            2 | 3 | 8 => 0,
            4 => 2,
            5 => 3,
            6 => 2,
            7 => 1,
            _ => {
                let mut tail = work.split_off(7);
                reduce(&mut tail, pair);
                work.extend(tail);
                continue;
            }
        };
        let merged = pair(work[merge_at], work[merge_at + 1]);
        work.splice(merge_at..merge_at + 2, std::iter::once(merged));
    }
}
