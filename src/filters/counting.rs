//! Plain counting Bloom filter with 4-bit saturating counters.
//!
//! The classical Fan et al. construction: every position of a standard
//! Bloom filter becomes a 4-bit nibble, insert increments k nibbles,
//! remove decrements them, and a query checks that all k nibbles are
//! nonzero. Four times the memory of the bit-array filter, no counter
//! bookkeeping beyond the nibble arithmetic.
//!
//! This variant is the baseline the succinct filters are measured
//! against. It shares their hashing and probe generation but none of the
//! counter machinery, and it inherits the classical failure mode: a
//! nibble that takes more than 15 net increments wraps around silently,
//! after which deletions of the affected keys are undefined (they will
//! not panic, but counts are garbage). Properly sized filters make that
//! event vanishingly rare; filters expecting heavy duplicates should use
//! a succinct variant, whose overflow records hold exact counts to 255.
//!
//! # Examples
//!
//! ```
//! use countbloom::{CountingBloomFilter, CountingFilter, MultiplyShiftHasher};
//!
//! let mut filter = CountingBloomFilter::<MultiplyShiftHasher>::new(10_000, 10)?;
//! filter.add(3)?;
//! assert!(filter.contains(3));
//! filter.remove(3);
//! assert!(!filter.contains(3));
//! # Ok::<(), countbloom::CountBloomError>(())
//! ```

#![allow(clippy::pedantic)]

use crate::core::filter::CountingFilter;
use crate::core::params::FilterParams;
use crate::error::Result;
use crate::hash::probe::{reduce, ProbeSequence};
use crate::hash::{KeyHasher, MultiplyShiftHasher};

/// Log2 of the staging block length used by the bulk path.
const BLOCK_SHIFT: u32 = 14;

/// Groups per staging block.
const BLOCK_LEN: usize = 1 << BLOCK_SHIFT;

/// Counting Bloom filter storing sixteen 4-bit counters per word.
#[derive(Debug, Clone)]
pub struct CountingBloomFilter<H = MultiplyShiftHasher> {
    data: Vec<u64>,
    params: FilterParams,
    hasher: H,
}

impl<H: KeyHasher + Default> CountingBloomFilter<H> {
    /// Create a filter for `capacity` keys at `bits_per_item` bits each
    /// (of *bit-array* budget; the counters quadruple the allocation),
    /// with the optimal probe count.
    ///
    /// # Errors
    ///
    /// Parameter validation errors from [`FilterParams::new`].
    pub fn new(capacity: usize, bits_per_item: usize) -> Result<Self> {
        Ok(Self::with_hasher(
            FilterParams::new(capacity, bits_per_item)?,
            H::default(),
        ))
    }

    /// Create a filter with an explicit probe count.
    ///
    /// # Errors
    ///
    /// Parameter validation errors from [`FilterParams::with_probes`].
    pub fn with_probes(capacity: usize, bits_per_item: usize, probes: usize) -> Result<Self> {
        Ok(Self::with_hasher(
            FilterParams::with_probes(capacity, bits_per_item, probes)?,
            H::default(),
        ))
    }
}

impl<H: KeyHasher> CountingBloomFilter<H> {
    /// Create a filter from validated parameters and a hash family
    /// instance.
    pub fn with_hasher(params: FilterParams, hasher: H) -> Self {
        Self {
            data: vec![0; params.counting_group_count()],
            params,
            hasher,
        }
    }

    /// Whether every counter in the filter is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&w| w == 0)
    }

    /// Nibble values probed for `key`, in probe order.
    #[must_use]
    pub fn probe_counts(&self, key: u64) -> Vec<u32> {
        let mut probes = ProbeSequence::new(self.hasher.hash_key(key));
        (0..self.params.probes())
            .map(|_| {
                let a = probes.next_raw();
                let group = reduce(a, self.data.len() as u32) as usize;
                ((self.data[group] >> ((a << 2) & 0x3f)) & 0xf) as u32
            })
            .collect()
    }

    /// Apply staged `(group, nibble)` entries for one block in insertion
    /// order.
    fn flush_block(&mut self, entries: &[u32]) {
        for &entry in entries {
            self.data[(entry >> 4) as usize] =
                self.data[(entry >> 4) as usize].wrapping_add(1u64 << ((entry << 2) & 0x3f));
        }
    }
}

impl<H: KeyHasher> CountingFilter for CountingBloomFilter<H> {
    /// Insert a key. Infallible for this variant; nibble saturation is
    /// undetected by design.
    fn add(&mut self, key: u64) -> Result<()> {
        let mut probes = ProbeSequence::new(self.hasher.hash_key(key));
        for _ in 0..self.params.probes() {
            let a = probes.next_raw();
            let group = reduce(a, self.data.len() as u32) as usize;
            self.data[group] = self.data[group].wrapping_add(1u64 << ((a << 2) & 0x3f));
        }
        Ok(())
    }

    fn remove(&mut self, key: u64) {
        let mut probes = ProbeSequence::new(self.hasher.hash_key(key));
        for _ in 0..self.params.probes() {
            let a = probes.next_raw();
            let group = reduce(a, self.data.len() as u32) as usize;
            self.data[group] = self.data[group].wrapping_sub(1u64 << ((a << 2) & 0x3f));
        }
    }

    fn contains(&self, key: u64) -> bool {
        let mut probes = ProbeSequence::new(self.hasher.hash_key(key));
        for _ in 0..self.params.probes() {
            let a = probes.next_raw();
            let group = reduce(a, self.data.len() as u32) as usize;
            if (self.data[group] >> ((a << 2) & 0x3f)) & 0xf == 0 {
                return false;
            }
        }
        true
    }

    /// Bulk insertion with block staging, as in the succinct variant but
    /// with the 4-bit nibble packing: an entry stores the group in its
    /// high 28 bits and the nibble selector in its low 4.
    fn add_all(&mut self, keys: &[u64]) -> Result<()> {
        // The 32-bit staging entry caps the group index; larger filters
        // take the direct path.
        if self.data.len() >= (1 << 28) {
            for &key in keys {
                self.add(key)?;
            }
            return Ok(());
        }

        let blocks = 1 + self.data.len() / BLOCK_LEN;
        let mut staged = vec![0u32; blocks * BLOCK_LEN];
        let mut staged_len = vec![0usize; blocks];
        for &key in keys {
            let mut probes = ProbeSequence::new(self.hasher.hash_key(key));
            for _ in 0..self.params.probes() {
                let a = probes.next_raw();
                let group = reduce(a, self.data.len() as u32) as usize;
                let block = group >> BLOCK_SHIFT;
                let len = staged_len[block];
                staged[(block << BLOCK_SHIFT) + len] = ((group as u32) << 4) | (a & 0xf);
                staged_len[block] = len + 1;
                if len + 1 == BLOCK_LEN {
                    let start = block << BLOCK_SHIFT;
                    self.flush_block(&staged[start..start + BLOCK_LEN]);
                    staged_len[block] = 0;
                }
            }
        }
        for block in 0..blocks {
            let start = block << BLOCK_SHIFT;
            self.flush_block(&staged[start..start + staged_len[block]]);
        }
        Ok(())
    }

    fn size_in_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<u64>()
    }

    fn capacity(&self) -> usize {
        self.params.capacity()
    }

    fn probe_count(&self) -> usize {
        self.params.probes()
    }
}
