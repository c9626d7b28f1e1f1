//! Succinct counting *blocked* Bloom filter.
//!
//! The filter is partitioned into 512-bit buckets of eight groups, each
//! bucket sized and aligned to one cache line. All k probes of a key land
//! in a single bucket, so a negative query costs at most one cache miss;
//! the price is a modest false-positive penalty from the reduced
//! dispersion, which the usual parameterizations (16 bits per key, k = 11)
//! absorb easily.
//!
//! # Probe schedule
//!
//! The bucket is chosen by reducing the hash rotated by 32 (so the bucket
//! and the in-bucket probes consume disjoint hash bits). The first three
//! probes take disjoint 3+6-bit slices of the low hash half for their
//! `(group, bit)` pairs; probes beyond three fall back to double hashing
//! with the high half. Fewer than three probes is rejected at
//! construction.
//!
//! # Counter layer
//!
//! Identical machinery to the monolithic variant: per-group succinct
//! counter words with promotion to 8-bit-per-position overflow records.
//! Because a whole bucket absorbs every probe of its keys, per-group
//! occupancy runs higher, and the overflow pool is provisioned three times
//! denser (scale 36 instead of 12).
//!
//! # Examples
//!
//! ```
//! use countbloom::{CountingFilter, MultiplyShiftHasher, SuccinctCountingBlockedBloomFilter};
//!
//! let mut filter = SuccinctCountingBlockedBloomFilter::<MultiplyShiftHasher>::new(10_000, 16)?;
//! filter.add(1234)?;
//! assert!(filter.contains(1234));
//! filter.remove(1234);
//! assert!(!filter.contains(1234));
//! # Ok::<(), countbloom::CountBloomError>(())
//! ```

#![allow(clippy::pedantic)]

use crate::core::filter::CountingFilter;
use crate::core::params::{
    FilterParams, GROUPS_PER_BUCKET, MAX_PROBES, MIN_BLOCKED_PROBES, SCBBF_OVERFLOW_SCALE,
};
use crate::counter::CounterSlab;
use crate::error::{CountBloomError, Result};
use crate::hash::probe::reduce;
use crate::hash::{KeyHasher, MultiplyShiftHasher};

/// One cache line of bit-layer words.
///
/// The alignment guarantees a bucket never straddles two cache lines, which
/// is the entire point of the blocked layout.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C, align(64))]
struct Bucket([u64; GROUPS_PER_BUCKET]);

/// Blocked counting Bloom filter with succinct per-bit counters.
#[derive(Debug, Clone)]
pub struct SuccinctCountingBlockedBloomFilter<H = MultiplyShiftHasher> {
    data: Vec<Bucket>,
    counters: CounterSlab,
    params: FilterParams,
    hasher: H,
}

impl<H: KeyHasher + Default> SuccinctCountingBlockedBloomFilter<H> {
    /// Create a filter for `capacity` keys at `bits_per_item` bits each,
    /// with the optimal probe count.
    ///
    /// # Errors
    ///
    /// Parameter validation errors from [`FilterParams::new`], plus
    /// [`CountBloomError::InvalidProbeCount`] when the derived probe count
    /// is below three (choose at least 5 bits per item).
    pub fn new(capacity: usize, bits_per_item: usize) -> Result<Self> {
        Self::with_hasher(FilterParams::new(capacity, bits_per_item)?, H::default())
    }

    /// Create a filter with an explicit probe count (at least three).
    ///
    /// # Errors
    ///
    /// Parameter validation errors from [`FilterParams::with_probes`] or
    /// [`CountBloomError::InvalidProbeCount`].
    pub fn with_probes(capacity: usize, bits_per_item: usize, probes: usize) -> Result<Self> {
        Self::with_hasher(
            FilterParams::with_probes(capacity, bits_per_item, probes)?,
            H::default(),
        )
    }
}

impl<H: KeyHasher> SuccinctCountingBlockedBloomFilter<H> {
    /// Create a filter from validated parameters and a hash family
    /// instance.
    ///
    /// # Errors
    ///
    /// [`CountBloomError::InvalidProbeCount`] when `params` carries fewer
    /// than three probes; the blocked probe schedule derives its first
    /// three positions from fixed hash slices.
    pub fn with_hasher(params: FilterParams, hasher: H) -> Result<Self> {
        if params.probes() < MIN_BLOCKED_PROBES {
            return Err(CountBloomError::invalid_probe_count(
                params.probes(),
                MIN_BLOCKED_PROBES,
                MAX_PROBES,
            ));
        }
        let buckets = params.bucket_count();
        let groups = buckets * GROUPS_PER_BUCKET;
        let pool_words = FilterParams::overflow_pool_words(groups, SCBBF_OVERFLOW_SCALE);
        Ok(Self {
            data: vec![Bucket::default(); buckets],
            counters: CounterSlab::new(groups, pool_words),
            params,
            hasher,
        })
    }

    /// Bucket index probed for `key`.
    #[must_use]
    pub fn bucket_index(&self, key: u64) -> usize {
        let hash = self.hasher.hash_key(key);
        reduce(hash.rotate_left(32) as u32, self.data.len() as u32) as usize
    }

    /// `(group, bit)` pairs probed for `key`, as global group indices.
    ///
    /// Every entry's group lies within the key's bucket, i.e. within
    /// `[8 * bucket, 8 * bucket + 8)`.
    #[must_use]
    pub fn probe_positions(&self, key: u64) -> Vec<(usize, u32)> {
        let hash = self.hasher.hash_key(key);
        let bucket = reduce(hash.rotate_left(32) as u32, self.data.len() as u32) as usize;
        let base = bucket * GROUPS_PER_BUCKET;
        let a = hash as u32;
        let mut positions = vec![
            (base + (a & 7) as usize, (a >> 3) & 0x3f),
            (base + ((a >> 9) & 7) as usize, (a >> 12) & 0x3f),
            (base + ((a >> 18) & 7) as usize, (a >> 21) & 0x3f),
        ];
        let b = (hash >> 32) as u32;
        let mut a = a;
        for _ in MIN_BLOCKED_PROBES..self.params.probes() {
            a = a.wrapping_add(b);
            positions.push((base + (a & 7) as usize, (a >> 3) & 0x3f));
        }
        positions
    }

    /// Per-probe counter values for `key`, in probe order.
    #[must_use]
    pub fn probe_counts(&self, key: u64) -> Vec<u32> {
        self.probe_positions(key)
            .into_iter()
            .map(|(group, bit)| {
                let word = self.data[group / GROUPS_PER_BUCKET].0[group % GROUPS_PER_BUCKET];
                self.counters.read_count(word, group, bit)
            })
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

    /// Whether the filter holds no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|bucket| bucket.0.iter().all(|&w| w == 0))
            && self.counters.is_zeroed()
    }

    #[inline]
    fn increment_at(&mut self, bucket: usize, offset: usize, bit: u32) -> Result<()> {
        let group = bucket * GROUPS_PER_BUCKET + offset;
        self.counters
            .increment(&mut self.data[bucket].0[offset], group, bit)
    }

    #[inline]
    fn decrement_at(&mut self, bucket: usize, offset: usize, bit: u32) {
        let group = bucket * GROUPS_PER_BUCKET + offset;
        self.counters
            .decrement(&mut self.data[bucket].0[offset], group, bit);
    }
}

impl<H: KeyHasher> CountingFilter for SuccinctCountingBlockedBloomFilter<H> {
    fn add(&mut self, key: u64) -> Result<()> {
        let hash = self.hasher.hash_key(key);
        let bucket = reduce(hash.rotate_left(32) as u32, self.data.len() as u32) as usize;
        let a = hash as u32;
        self.increment_at(bucket, (a & 7) as usize, (a >> 3) & 0x3f)?;
        self.increment_at(bucket, ((a >> 9) & 7) as usize, (a >> 12) & 0x3f)?;
        self.increment_at(bucket, ((a >> 18) & 7) as usize, (a >> 21) & 0x3f)?;
        let b = (hash >> 32) as u32;
        let mut a = a;
        for _ in MIN_BLOCKED_PROBES..self.params.probes() {
            a = a.wrapping_add(b);
            self.increment_at(bucket, (a & 7) as usize, (a >> 3) & 0x3f)?;
        }
        Ok(())
    }

    fn remove(&mut self, key: u64) {
        let hash = self.hasher.hash_key(key);
        let bucket = reduce(hash.rotate_left(32) as u32, self.data.len() as u32) as usize;
        let a = hash as u32;
        self.decrement_at(bucket, (a & 7) as usize, (a >> 3) & 0x3f);
        self.decrement_at(bucket, ((a >> 9) & 7) as usize, (a >> 12) & 0x3f);
        self.decrement_at(bucket, ((a >> 18) & 7) as usize, (a >> 21) & 0x3f);
        let b = (hash >> 32) as u32;
        let mut a = a;
        for _ in MIN_BLOCKED_PROBES..self.params.probes() {
            a = a.wrapping_add(b);
            self.decrement_at(bucket, (a & 7) as usize, (a >> 3) & 0x3f);
        }
    }

    fn contains(&self, key: u64) -> bool {
        let hash = self.hasher.hash_key(key);
        let bucket = reduce(hash.rotate_left(32) as u32, self.data.len() as u32) as usize;
        let words = &self.data[bucket].0;
        let a = hash as u32;
        // The three fixed probes share one cache line, so accumulate them
        // without branching before the first short-circuit.
        let mut ok = (words[(a & 7) as usize] >> ((a >> 3) & 0x3f)) & 1;
        ok &= (words[((a >> 9) & 7) as usize] >> ((a >> 12) & 0x3f)) & 1;
        ok &= (words[((a >> 18) & 7) as usize] >> ((a >> 21) & 0x3f)) & 1;
        if ok == 0 {
            return false;
        }
        let b = (hash >> 32) as u32;
        let mut a = a;
        for _ in MIN_BLOCKED_PROBES..self.params.probes() {
            a = a.wrapping_add(b);
            if (words[(a & 7) as usize] >> ((a >> 3) & 0x3f)) & 1 == 0 {
                return false;
            }
        }
        true
    }

    fn size_in_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<Bucket>() + self.counters.size_in_bytes()
    }

    fn capacity(&self) -> usize {
        self.params.capacity()
    }

    fn probe_count(&self) -> usize {
        self.params.probes()
    }
}
