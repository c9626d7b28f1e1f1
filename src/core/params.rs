//! Construction parameters and derived sizing for counting filters.
//!
//! Every filter in this crate is sized from two inputs fixed at
//! construction:
//!
//! - `capacity`: the number of distinct keys the filter is provisioned for
//! - `bits_per_item`: bits of filter spent per inserted key (typically 8-16)
//!
//! The probe count defaults to the information-theoretic optimum
//! `round(bits_per_item × ln 2)`; callers can override it within
//! [`MIN_PROBES`]..=[`MAX_PROBES`].
//!
//! # Derived sizes
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | SCBF groups | `ceil(capacity × bits_per_item / 64)` |
//! | SCBBF buckets | `capacity × bits_per_item / 512` (min 1) |
//! | Plain CBF groups | `ceil(4 × capacity × bits_per_item / 64)` |
//! | Overflow pool words | `100 + groups / 100 × scale`, whole records |
//!
//! The plain counting filter spends four bits per position, hence the
//! factor of four in its group count. The overflow scale is 12 for the
//! monolithic succinct filter and 36 for the blocked one, whose buckets
//! tolerate much higher per-group occupancy.

#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use crate::error::{CountBloomError, Result};
use std::f64::consts::LN_2;

/// Minimum bits of filter per inserted key.
pub const MIN_BITS_PER_ITEM: usize = 1;

/// Maximum bits of filter per inserted key.
///
/// Beyond 64 bits per key the false positive rate is already far below
/// anything a Bloom-style structure is the right tool for.
pub const MAX_BITS_PER_ITEM: usize = 64;

/// Minimum number of probes per key.
pub const MIN_PROBES: usize = 1;

/// Maximum number of probes per key.
///
/// More than 32 probes costs more in hashing than it buys in accuracy.
pub const MAX_PROBES: usize = 32;

/// Minimum probes for the blocked variant, whose probe schedule derives the
/// first three positions from fixed slices of the hash.
pub const MIN_BLOCKED_PROBES: usize = 3;

/// Words in one overflow record: 64 positions at one byte each.
pub const OVERFLOW_RECORD_WORDS: usize = 8;

/// Overflow pool scale for the monolithic succinct filter.
pub const SCBF_OVERFLOW_SCALE: usize = 12;

/// Overflow pool scale for the blocked succinct filter.
pub const SCBBF_OVERFLOW_SCALE: usize = 36;

/// Bits in one cache-line bucket of the blocked variant.
pub const BUCKET_BITS: usize = 512;

/// Groups (64-bit words) in one bucket.
pub const GROUPS_PER_BUCKET: usize = 8;

/// Optimal probe count for a given bits-per-item budget.
///
/// Implements `k = round(b × ln 2)`, the value minimizing the false
/// positive rate of a Bloom filter spending `b` bits per key. Never
/// returns less than [`MIN_PROBES`].
///
/// # Examples
///
/// ```
/// use countbloom::core::params::optimal_probe_count;
///
/// assert_eq!(optimal_probe_count(8), 6);
/// assert_eq!(optimal_probe_count(10), 7);
/// assert_eq!(optimal_probe_count(16), 11);
/// ```
#[must_use]
pub fn optimal_probe_count(bits_per_item: usize) -> usize {
    let k = (bits_per_item as f64 * LN_2 + 0.5) as usize;
    k.max(MIN_PROBES)
}

/// Validated construction parameters shared by all filter variants.
///
/// # Examples
///
/// ```
/// use countbloom::core::params::FilterParams;
///
/// let params = FilterParams::new(100_000, 16)?;
/// assert_eq!(params.capacity(), 100_000);
/// assert_eq!(params.probes(), 11);
/// # Ok::<(), countbloom::CountBloomError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    capacity: usize,
    bits_per_item: usize,
    probes: usize,
}

impl FilterParams {
    /// Create parameters with the optimal probe count for `bits_per_item`.
    ///
    /// # Errors
    ///
    /// - [`CountBloomError::InvalidItemCount`] if `capacity == 0`
    /// - [`CountBloomError::InvalidBitsPerItem`] if `bits_per_item` is
    ///   outside `[MIN_BITS_PER_ITEM, MAX_BITS_PER_ITEM]`
    pub fn new(capacity: usize, bits_per_item: usize) -> Result<Self> {
        let probes = optimal_probe_count(bits_per_item);
        Self::with_probes(capacity, bits_per_item, probes)
    }

    /// Create parameters with an explicit probe count.
    ///
    /// # Errors
    ///
    /// In addition to the [`FilterParams::new`] errors, returns
    /// [`CountBloomError::InvalidProbeCount`] if `probes` is outside
    /// `[MIN_PROBES, MAX_PROBES]`.
    pub fn with_probes(capacity: usize, bits_per_item: usize, probes: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CountBloomError::invalid_item_count(capacity));
        }
        if bits_per_item < MIN_BITS_PER_ITEM || bits_per_item > MAX_BITS_PER_ITEM {
            return Err(CountBloomError::invalid_bits_per_item(
                bits_per_item,
                MIN_BITS_PER_ITEM,
                MAX_BITS_PER_ITEM,
            ));
        }
        if probes < MIN_PROBES || probes > MAX_PROBES {
            return Err(CountBloomError::invalid_probe_count(
                probes, MIN_PROBES, MAX_PROBES,
            ));
        }
        Ok(Self {
            capacity,
            bits_per_item,
            probes,
        })
    }

    /// Number of distinct keys the filter is provisioned for.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bits of filter per inserted key.
    #[must_use]
    pub const fn bits_per_item(&self) -> usize {
        self.bits_per_item
    }

    /// Number of probes per key.
    #[must_use]
    pub const fn probes(&self) -> usize {
        self.probes
    }

    /// Groups (64-bit words) in the monolithic succinct filter's bit layer.
    #[must_use]
    pub const fn succinct_group_count(&self) -> usize {
        (self.capacity * self.bits_per_item + 63) / 64
    }

    /// Groups in the plain counting filter, which spends a 4-bit nibble
    /// where the succinct filters spend a bit.
    #[must_use]
    pub const fn counting_group_count(&self) -> usize {
        (4 * self.capacity * self.bits_per_item + 63) / 64
    }

    /// Cache-line buckets in the blocked succinct filter. Never zero, so
    /// tiny filters still get one bucket rather than a degenerate layout.
    #[must_use]
    pub const fn bucket_count(&self) -> usize {
        let buckets = self.capacity * self.bits_per_item / BUCKET_BITS;
        if buckets == 0 {
            1
        } else {
            buckets
        }
    }

    /// Overflow pool size in words for a filter with `group_count` groups,
    /// rounded up to whole records.
    #[must_use]
    pub const fn overflow_pool_words(group_count: usize, scale: usize) -> usize {
        let words = 100 + group_count / 100 * scale;
        (words + OVERFLOW_RECORD_WORDS - 1) / OVERFLOW_RECORD_WORDS * OVERFLOW_RECORD_WORDS
    }
}
