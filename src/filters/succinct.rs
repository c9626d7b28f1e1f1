//! Succinct counting Bloom filter over one monolithic bit array.
//!
//! The filter keeps a classical Bloom filter's bit array (`data`, one
//! 64-bit word per group) and pairs every group with a succinct counter
//! word managed by the counter layer. Queries touch only the bit array, so
//! they cost exactly what the plain Bloom filter costs; insertions and
//! deletions additionally maintain the per-bit counts, spending roughly
//! one extra bit per position on average instead of the 3-4 bits of a
//! naive counting filter.
//!
//! # Memory layout
//!
//! ```text
//! data:     [u64; groups]                bit layer, membership truth
//! counts:   [u64; groups]                succinct counter words
//! overflow: [u64; 100 + groups/100*12]   wide records for hot groups
//! ```
//!
//! # Examples
//!
//! ```
//! use countbloom::{CountingFilter, MultiplyShiftHasher, SuccinctCountingBloomFilter};
//!
//! let mut filter = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(10_000, 10)?;
//! filter.add(7)?;
//! filter.add(7)?;
//! assert!(filter.contains(7));
//!
//! filter.remove(7);
//! assert!(filter.contains(7)); // net multiplicity still 1
//! filter.remove(7);
//! assert!(!filter.contains(7));
//! # Ok::<(), countbloom::CountBloomError>(())
//! ```

#![allow(clippy::pedantic)]

use crate::core::filter::CountingFilter;
use crate::core::params::{FilterParams, SCBF_OVERFLOW_SCALE};
use crate::counter::CounterSlab;
use crate::error::Result;
use crate::hash::probe::{reduce, ProbeSequence};
use crate::hash::{KeyHasher, MultiplyShiftHasher};

/// Log2 of the staging block length used by the bulk path.
const BLOCK_SHIFT: u32 = 14;

/// Groups per staging block.
const BLOCK_LEN: usize = 1 << BLOCK_SHIFT;

/// Counting Bloom filter with succinct per-bit counters.
///
/// See the [module docs](self) for the layout; construction parameters are
/// validated through [`FilterParams`].
#[derive(Debug, Clone)]
pub struct SuccinctCountingBloomFilter<H = MultiplyShiftHasher> {
    data: Vec<u64>,
    counters: CounterSlab,
    params: FilterParams,
    hasher: H,
}

impl<H: KeyHasher + Default> SuccinctCountingBloomFilter<H> {
    /// Create a filter for `capacity` keys at `bits_per_item` bits each,
    /// with the optimal probe count.
    ///
    /// # Errors
    ///
    /// Parameter validation errors from [`FilterParams::new`].
    pub fn new(capacity: usize, bits_per_item: usize) -> Result<Self> {
        Self::with_hasher(FilterParams::new(capacity, bits_per_item)?, H::default())
    }

    /// Create a filter with an explicit probe count.
    ///
    /// # Errors
    ///
    /// Parameter validation errors from [`FilterParams::with_probes`].
    pub fn with_probes(capacity: usize, bits_per_item: usize, probes: usize) -> Result<Self> {
        Self::with_hasher(
            FilterParams::with_probes(capacity, bits_per_item, probes)?,
            H::default(),
        )
    }
}

impl<H: KeyHasher> SuccinctCountingBloomFilter<H> {
    /// Create a filter from validated parameters and a hash family
    /// instance.
    pub fn with_hasher(params: FilterParams, hasher: H) -> Result<Self> {
        let groups = params.succinct_group_count();
        let pool_words = FilterParams::overflow_pool_words(groups, SCBF_OVERFLOW_SCALE);
        Ok(Self {
            data: vec![0; groups],
            counters: CounterSlab::new(groups, pool_words),
            params,
            hasher,
        })
    }

    /// `(group, bit)` pairs this filter probes for `key`.
    #[must_use]
    pub fn probe_positions(&self, key: u64) -> Vec<(usize, u32)> {
        let mut probes = ProbeSequence::new(self.hasher.hash_key(key));
        (0..self.params.probes())
            .map(|_| {
                let a = probes.next_raw();
                (reduce(a, self.data.len() as u32) as usize, a & 63)
            })
            .collect()
    }

    /// Per-probe counter values for `key`, in probe order.
    ///
    /// Aliasing with other keys can only raise these values, so each entry
    /// is an upper bound on the key's net multiplicity and the minimum is
    /// the tightest one.
    #[must_use]
    pub fn probe_counts(&self, key: u64) -> Vec<u32> {
        self.probe_positions(key)
            .into_iter()
            .map(|(group, bit)| self.counters.read_count(self.data[group], group, bit))
            .collect()
    }

    /// Whether `key`'s probes all land on groups in overflow form.
    #[must_use]
    pub fn probes_overflowed(&self, key: u64) -> bool {
        self.probe_positions(key)
            .into_iter()
            .all(|(group, _)| self.counters.is_overflowed(group))
    }

    /// Number of groups currently in overflow form.
    #[must_use]
    pub fn overflowed_groups(&self) -> usize {
        self.counters.overflowed_groups()
    }

    /// Overflow records currently free.
    #[must_use]
    pub fn free_overflow_records(&self) -> usize {
        self.counters.free_overflow_records()
    }

    /// Total overflow records in the pool.
    #[must_use]
    pub fn overflow_records(&self) -> usize {
        self.counters.overflow_records()
    }

    /// Whether the filter holds no keys at all (every data and counter
    /// word zero).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&w| w == 0) && self.counters.is_zeroed()
    }

    /// Raw bit-layer words, for diagnostics.
    #[must_use]
    pub fn data_words(&self) -> &[u64] {
        &self.data
    }

    /// Apply staged `(group, bit)` entries for one block in insertion
    /// order.
    fn flush_block(&mut self, entries: &[u32]) -> Result<()> {
        for &entry in entries {
            let group = (entry >> 6) as usize;
            self.counters
                .increment(&mut self.data[group], group, entry & 63)?;
        }
        Ok(())
    }
}

impl<H: KeyHasher> CountingFilter for SuccinctCountingBloomFilter<H> {
    fn add(&mut self, key: u64) -> Result<()> {
        let mut probes = ProbeSequence::new(self.hasher.hash_key(key));
        for _ in 0..self.params.probes() {
            let a = probes.next_raw();
            let group = reduce(a, self.data.len() as u32) as usize;
            self.counters
                .increment(&mut self.data[group], group, a & 63)?;
        }
        Ok(())
    }

    fn remove(&mut self, key: u64) {
        let mut probes = ProbeSequence::new(self.hasher.hash_key(key));
        for _ in 0..self.params.probes() {
            let a = probes.next_raw();
            let group = reduce(a, self.data.len() as u32) as usize;
            self.counters
                .decrement(&mut self.data[group], group, a & 63);
        }
    }

    fn contains(&self, key: u64) -> bool {
        let mut probes = ProbeSequence::new(self.hasher.hash_key(key));
        for _ in 0..self.params.probes() {
            let a = probes.next_raw();
            let group = reduce(a, self.data.len() as u32) as usize;
            if (self.data[group] >> (a & 63)) & 1 == 0 {
                return false;
            }
        }
        true
    }

    /// Bulk insertion with block staging.
    ///
    /// Probes are first appended to per-block buffers covering 2^14 groups
    /// each, then applied block by block, so batches much larger than the
    /// last-level cache touch each region of the filter once instead of
    /// randomly. The resulting state is identical to adding the keys one
    /// by one.
    fn add_all(&mut self, keys: &[u64]) -> Result<()> {
        // Staged entries pack (group, bit) into 32 bits; fall back to the
        // direct path for filters too large for that encoding.
        if self.data.len() >= (1 << 26) {
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
                staged[(block << BLOCK_SHIFT) + len] = ((group as u32) << 6) | (a & 63);
                staged_len[block] = len + 1;
                if len + 1 == BLOCK_LEN {
                    let start = block << BLOCK_SHIFT;
                    self.flush_block(&staged[start..start + BLOCK_LEN])?;
                    staged_len[block] = 0;
                }
            }
        }
        for block in 0..blocks {
            let start = block << BLOCK_SHIFT;
            self.flush_block(&staged[start..start + staged_len[block]])?;
        }
        Ok(())
    }

    fn size_in_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<u64>() + self.counters.size_in_bytes()
    }

    fn capacity(&self) -> usize {
        self.params.capacity()
    }

    fn probe_count(&self) -> usize {
        self.params.probes()
    }
}
