//! Builder for the plain counting Bloom filter.

#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use super::resolve_params;
use crate::error::Result;
use crate::filters::CountingBloomFilter;
use crate::hash::MultiplyShiftHasher;

/// Fluent builder for [`CountingBloomFilter`].
///
/// # Examples
///
/// ```
/// use countbloom::builder::CountingBloomFilterBuilder;
///
/// let filter = CountingBloomFilterBuilder::new()
///     .capacity(10_000)
///     .bits_per_item(8)
///     .build()?;
/// # let _ = filter;
/// # Ok::<(), countbloom::CountBloomError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountingBloomFilterBuilder {
    capacity: Option<usize>,
    bits_per_item: Option<usize>,
    probes: Option<usize>,
}

impl CountingBloomFilterBuilder {
    /// Start an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expected number of distinct keys. Required.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Bits of bit-array budget per key (the counters quadruple the
    /// actual allocation). Defaults to [`super::DEFAULT_BITS_PER_ITEM`].
    #[must_use]
    pub fn bits_per_item(mut self, bits: usize) -> Self {
        self.bits_per_item = Some(bits);
        self
    }

    /// Probe count override. Defaults to the optimum for `bits_per_item`.
    #[must_use]
    pub fn probes(mut self, probes: usize) -> Self {
        self.probes = Some(probes);
        self
    }

    /// Validate and construct the filter.
    ///
    /// # Errors
    ///
    /// Parameter validation errors; see [`crate::core::params`].
    pub fn build(self) -> Result<CountingBloomFilter> {
        let params = resolve_params(self.capacity, self.bits_per_item, self.probes)?;
        Ok(CountingBloomFilter::with_hasher(
            params,
            MultiplyShiftHasher::new(),
        ))
    }
}
