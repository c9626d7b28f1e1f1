//! Hash families over 64-bit keys.
//!
//! The filters in this crate consume keys that are already 64-bit values;
//! the hash family's only job is to spread them uniformly over the full
//! `u64` range so the derived probe indices behave like independent uniform
//! samples. The contract is deliberately small:
//!
//! - **Uniformity**: output bits well mixed, both halves usable as seeds
//! - **Determinism**: the same instance maps a key to the same hash, so a
//!   `contains` after an `add` finds the key
//!
//! # Choosing a family
//!
//! | Family | Speed | Notes |
//! |--------|-------|-------|
//! | [`MultiplyShiftHasher`] | ~1 ns | Default. Two-independent multiply-shift |
//! | `Xxh3KeyHasher` | ~2 ns | XXH3 (feature `xxhash`), strong mixing |
//!
//! # Examples
//!
//! ```
//! use countbloom::hash::{KeyHasher, MultiplyShiftHasher};
//!
//! let hasher = MultiplyShiftHasher::with_seed(7);
//! let h1 = hasher.hash_key(42);
//! let h2 = hasher.hash_key(42);
//! assert_eq!(h1, h2);
//! ```

#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// A stateless mapping from 64-bit keys to 64-bit hashes.
///
/// Implementations must be deterministic per instance. Distinct instances
/// (different seeds) should produce unrelated mappings, which lets callers
/// run independent filters over the same key space.
pub trait KeyHasher: Send + Sync {
    /// Hash a key to a uniformly distributed 64-bit value.
    fn hash_key(&self, key: u64) -> u64;

    /// Human-readable family name for diagnostics.
    fn name(&self) -> &'static str;
}

/// SplitMix64 step, used to expand a seed into hash-family constants.
///
/// Small, well-dispersed, and stateless; the standard choice for seeding
/// other generators.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Two-independent multiply-shift hash family.
///
/// Computes `(add + mul × key) >> 64` in 128-bit arithmetic with per-
/// instance random constants. This is the classic Dietzfelbinger
/// construction: pairwise independent, one multiplication on the hot path,
/// and both output halves well distributed, which the probe generator
/// relies on.
///
/// # Examples
///
/// ```
/// use countbloom::hash::{KeyHasher, MultiplyShiftHasher};
///
/// let a = MultiplyShiftHasher::with_seed(1);
/// let b = MultiplyShiftHasher::with_seed(2);
/// assert_ne!(a.hash_key(99), b.hash_key(99));
/// ```
#[derive(Debug, Clone)]
pub struct MultiplyShiftHasher {
    multiply: u128,
    add: u128,
}

impl MultiplyShiftHasher {
    /// Create a hasher from the default seed.
    ///
    /// Every default-constructed instance uses the same constants, so
    /// filters built without an explicit seed agree on hashes. Use
    /// [`MultiplyShiftHasher::with_seed`] for independent instances.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(0x7c1f_0b5b_35c2_a14d)
    }

    /// Create a hasher whose constants are derived from `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut state = seed;
        let multiply = u128::from(splitmix64(&mut state)) << 64 | u128::from(splitmix64(&mut state));
        let add = u128::from(splitmix64(&mut state)) << 64 | u128::from(splitmix64(&mut state));
        Self { multiply, add }
    }
}

impl Default for MultiplyShiftHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyHasher for MultiplyShiftHasher {
    #[inline]
    fn hash_key(&self, key: u64) -> u64 {
        (self
            .add
            .wrapping_add(self.multiply.wrapping_mul(u128::from(key)))
            >> 64) as u64
    }

    fn name(&self) -> &'static str {
        "MultiplyShift"
    }
}

/// XXH3-based key hasher (feature `xxhash`).
///
/// Slower than multiply-shift on a single `u64` but with full avalanche
/// mixing; useful when key distributions are adversarial to linear
/// families.
#[cfg(feature = "xxhash")]
#[derive(Debug, Clone)]
pub struct Xxh3KeyHasher {
    seed: u64,
}

#[cfg(feature = "xxhash")]
impl Xxh3KeyHasher {
    /// Create a hasher with seed 0.
    #[must_use]
    pub fn new() -> Self {
        Self { seed: 0 }
    }

    /// Create a hasher with an explicit seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

#[cfg(feature = "xxhash")]
impl Default for Xxh3KeyHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "xxhash")]
impl KeyHasher for Xxh3KeyHasher {
    #[inline]
    fn hash_key(&self, key: u64) -> u64 {
        xxhash_rust::xxh3::xxh3_64_with_seed(&key.to_le_bytes(), self.seed)
    }

    fn name(&self) -> &'static str {
        "XXH3"
    }
}
