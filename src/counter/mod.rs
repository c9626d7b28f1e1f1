//! The succinct counter layer shared by both succinct filter variants.
//!
//! Each group pairs a data word (the bit layer) with a counter word. The
//! counter word is in one of two forms, distinguished by its top bit:
//!
//! - **Inline** (bit 63 clear): the group's counts are packed into the
//!   word itself as unary-with-terminator codes; see [`inline`].
//! - **Overflow** (bit 63 set): the low 28 bits index a record in the
//!   [`overflow::OverflowPool`], the 28 bits above bit 32 track the
//!   group's total count, and the per-position counts live in the record.
//!
//! [`CounterSlab`] owns the counter words and the pool and moves groups
//! between the forms. A group promotes when an increment finds either of
//! the top two counter bits set (the encoding is within one splice of
//! ambiguity with the overflow tag) and demotes on the decrement that
//! takes its total below 64, at which point every count fits inline again.
//! The data word stays authoritative for membership throughout: a bit is
//! set exactly while its count is positive.

mod inline;
mod overflow;

use crate::error::{CountBloomError, Result};

pub(crate) use overflow::MAX_COUNT;

/// Overflow form tag.
const OVERFLOW_TAG: u64 = 1 << 63;

/// Record index field of an overflow-form counter word.
const INDEX_MASK: u64 = 0x0fff_ffff;

/// Position of the total-count field.
const TOTAL_SHIFT: u32 = 32;

/// Width mask of the total-count field.
const TOTAL_MASK: u64 = 0x0fff_ffff;

/// Total-count value written at promotion: the 63 inline counts plus the
/// increment that triggered the move.
const PROMOTED_TOTAL: u64 = 64;

/// Counter words plus overflow pool for an array of groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CounterSlab {
    counts: Vec<u64>,
    pool: overflow::OverflowPool,
}

impl CounterSlab {
    /// A slab for `group_count` groups with a pool of `pool_words` words.
    pub(crate) fn new(group_count: usize, pool_words: usize) -> Self {
        Self {
            counts: vec![0; group_count],
            pool: overflow::OverflowPool::new(pool_words),
        }
    }

    /// Apply one increment of `(group, bit)`, updating the caller's data
    /// word alongside the counter state.
    ///
    /// # Errors
    ///
    /// [`CountBloomError::OverflowPoolExhausted`] when a promotion finds no
    /// free record, and [`CountBloomError::CounterSaturated`] when the
    /// position already holds [`MAX_COUNT`]. Either way the group is left
    /// exactly as it was.
    pub(crate) fn increment(&mut self, word: &mut u64, group: usize, bit: u32) -> Result<()> {
        let m = *word;
        let c = self.counts[group];
        if c & inline::NEARLY_FULL != 0 {
            let index = if c & OVERFLOW_TAG == 0 {
                self.promote(m, c, group)?
            } else {
                let index = (c & INDEX_MASK) as usize;
                if self.pool.count(index, bit) == MAX_COUNT {
                    return Err(CountBloomError::counter_saturated(MAX_COUNT));
                }
                self.counts[group] = c + (1 << TOTAL_SHIFT);
                index
            };
            self.pool.add_one(index, bit);
            *word = m | (1 << bit);
        } else {
            let (m2, c2) = inline::increment(m, c, bit);
            *word = m2;
            self.counts[group] = c2;
        }
        Ok(())
    }

    /// Move a nearly full inline group into a fresh overflow record.
    ///
    /// Copies all 64 per-position counts out of the inline encoding and
    /// rewrites the counter word as a tagged record reference. The pending
    /// increment is *not* applied here; the caller adds it to the record,
    /// which is what the [`PROMOTED_TOTAL`] total already accounts for.
    fn promote(&mut self, m: u64, c: u64, group: usize) -> Result<usize> {
        let index = self.pool.allocate()?;
        for bit in 0..64 {
            let count = inline::read_count(m, c, bit);
            if count > 0 {
                self.pool.set_count(index, bit, u64::from(count));
            }
        }
        self.counts[group] = OVERFLOW_TAG | (PROMOTED_TOTAL << TOTAL_SHIFT) | index as u64;
        Ok(index)
    }

    /// Apply one decrement of `(group, bit)`.
    ///
    /// The position's count must be positive; removing below zero is the
    /// documented caller-side precondition violation and corrupts state
    /// without panicking in release builds.
    pub(crate) fn decrement(&mut self, word: &mut u64, group: usize, bit: u32) {
        let m = *word;
        let c = self.counts[group];
        if c & OVERFLOW_TAG != 0 {
            let index = (c & INDEX_MASK) as usize;
            let total = (c >> TOTAL_SHIFT) & TOTAL_MASK;
            self.counts[group] = c - (1 << TOTAL_SHIFT);
            if self.pool.sub_one(index, bit) == 0 {
                *word = m & !(1 << bit);
            }
            if total < PROMOTED_TOTAL {
                self.demote(group, index);
            }
        } else {
            let (m2, c2) = inline::decrement(m, c, bit);
            *word = m2;
            self.counts[group] = c2;
        }
    }

    /// Rebuild the inline encoding from an overflow record and free it.
    ///
    /// Walking positions from 63 down to 0 appends codes low-end first, so
    /// the result is the canonical inline word for the record's counts.
    fn demote(&mut self, group: usize, index: usize) {
        let mut c = 0u64;
        for bit in (0..64).rev() {
            let count = self.pool.count(index, bit);
            if count > 0 {
                c = ((c << 1) | 1) << (count - 1);
            }
        }
        self.counts[group] = c;
        self.pool.release(index);
    }

    /// Count stored for `(group, bit)` given the group's data word.
    pub(crate) fn read_count(&self, word: u64, group: usize, bit: u32) -> u32 {
        if (word >> bit) & 1 == 0 {
            return 0;
        }
        let c = self.counts[group];
        if c & OVERFLOW_TAG != 0 {
            let index = (c & INDEX_MASK) as usize;
            self.pool.count(index, bit) as u32
        } else {
            inline::read_count(word, c, bit)
        }
    }

    /// Whether `group` is currently in overflow form.
    pub(crate) fn is_overflowed(&self, group: usize) -> bool {
        self.counts[group] & OVERFLOW_TAG != 0
    }

    /// Number of groups currently in overflow form.
    pub(crate) fn overflowed_groups(&self) -> usize {
        self.counts.iter().filter(|&&c| c & OVERFLOW_TAG != 0).count()
    }

    /// Whether every counter word is zero (no key present anywhere).
    pub(crate) fn is_zeroed(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Records currently on the free list.
    pub(crate) fn free_overflow_records(&self) -> usize {
        self.pool.free_records()
    }

    /// Total records in the pool.
    pub(crate) fn overflow_records(&self) -> usize {
        self.pool.records()
    }

    /// Heap footprint of counter words plus pool, in bytes.
    pub(crate) fn size_in_bytes(&self) -> usize {
        self.counts.len() * std::mem::size_of::<u64>() + self.pool.size_in_bytes()
    }
}
