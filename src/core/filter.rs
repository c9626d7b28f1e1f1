//! The contract shared by every counting filter variant.
//!
//! All three filters in this crate are approximate-membership structures
//! over 64-bit keys that support deletion. The [`CountingFilter`] trait
//! pins down the guarantees:
//!
//! 1. **No false negatives.** After `add(x)` succeeds, `contains(x)` is
//!    `true` until a matching `remove(x)`.
//! 2. **Bounded false positives.** `contains` may report `true` for a key
//!    never added, at a rate governed by `bits_per_item` and the probe
//!    count.
//! 3. **Deletion needs discipline.** `remove(x)` is only defined for a key
//!    whose net multiplicity is positive. Removing a never-added key
//!    silently corrupts counters and can manufacture false negatives for
//!    other keys; no variant detects it.
//!
//! Filters are single-threaded: mutation takes `&mut self`, and Rust's
//! borrow rules make the exclusivity explicit. Concurrent readers are fine
//! as long as no writer is in flight.

#![allow(clippy::pedantic)]

use crate::error::Result;

/// An approximate set over `u64` keys with insertion, deletion, and
/// membership queries.
///
/// # Examples
///
/// ```
/// use countbloom::{CountingFilter, MultiplyShiftHasher, SuccinctCountingBloomFilter};
///
/// let mut filter = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(1000, 10)?;
/// filter.add(42)?;
/// assert!(filter.contains(42));
///
/// filter.remove(42);
/// assert!(!filter.contains(42));
/// # Ok::<(), countbloom::CountBloomError>(())
/// ```
pub trait CountingFilter {
    /// Insert a key.
    ///
    /// Keys are multisets: adding the same key twice requires removing it
    /// twice before `contains` can go back to `false`.
    ///
    /// # Errors
    ///
    /// Capacity errors ([`crate::CountBloomError::OverflowPoolExhausted`],
    /// [`crate::CountBloomError::CounterSaturated`]) when the counter layer
    /// cannot absorb another increment. On error, probes of this key that
    /// were already applied stay applied; the filter keeps its no-false-
    /// negative guarantee for previously inserted keys but this key must
    /// not be removed.
    fn add(&mut self, key: u64) -> Result<()>;

    /// Remove a previously added key.
    ///
    /// The key's net multiplicity must be positive. Violating that
    /// precondition is not detected and corrupts the filter (spurious
    /// false negatives become possible).
    fn remove(&mut self, key: u64);

    /// Query membership. Never errors: `true` means "probably present",
    /// `false` means "definitely absent".
    fn contains(&self, key: u64) -> bool;

    /// Insert a batch of keys.
    ///
    /// Variants with a staged bulk path reorder probe applications by
    /// destination block for cache locality; the resulting filter state is
    /// identical to adding the keys one by one. Callers wanting a
    /// sub-range pass a slice of it.
    ///
    /// # Errors
    ///
    /// Same as [`CountingFilter::add`]; keys after the failing probe are
    /// not applied.
    fn add_all(&mut self, keys: &[u64]) -> Result<()> {
        for &key in keys {
            self.add(key)?;
        }
        Ok(())
    }

    /// Total heap footprint of the filter arrays in bytes.
    fn size_in_bytes(&self) -> usize;

    /// The capacity the filter was provisioned for.
    fn capacity(&self) -> usize;

    /// Number of probes per key.
    fn probe_count(&self) -> usize;
}
