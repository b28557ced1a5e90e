//! Glint Core
//!
//! Deterministic numeric toolkit shared by the generator and the runtime:
//! - Integer pairing for folding several keys into one
//! - Seeded Mersenne Twister engine with derived distributions
//! - Stateless hash suite with the same derived distributions

pub mod bits;
pub mod hash;
pub mod pair;
pub mod random;

pub use bits::RangeError;
pub use hash::{Digest32, Digest64};
pub use random::Random;

/// Toolkit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
