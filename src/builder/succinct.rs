//! Builders for the succinct counting filter variants.

#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use super::resolve_params;
use crate::error::Result;
use crate::filters::{SuccinctCountingBlockedBloomFilter, SuccinctCountingBloomFilter};
use crate::hash::MultiplyShiftHasher;

/// Fluent builder for [`SuccinctCountingBloomFilter`].
///
/// # Examples
///
/// ```
/// use countbloom::builder::SuccinctCountingBloomFilterBuilder;
///
/// let filter = SuccinctCountingBloomFilterBuilder::new()
///     .capacity(100_000)
///     .bits_per_item(10)
///     .build()?;
/// # let _ = filter;
/// # Ok::<(), countbloom::CountBloomError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SuccinctCountingBloomFilterBuilder {
    capacity: Option<usize>,
    bits_per_item: Option<usize>,
    probes: Option<usize>,
}

impl SuccinctCountingBloomFilterBuilder {
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

    /// Bits of filter per key. Defaults to
    /// [`super::DEFAULT_BITS_PER_ITEM`].
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
    pub fn build(self) -> Result<SuccinctCountingBloomFilter> {
        let params = resolve_params(self.capacity, self.bits_per_item, self.probes)?;
        SuccinctCountingBloomFilter::with_hasher(params, MultiplyShiftHasher::new())
    }
}

/// Fluent builder for [`SuccinctCountingBlockedBloomFilter`].
///
/// # Examples
///
/// ```
/// use countbloom::builder::SuccinctCountingBlockedBloomFilterBuilder;
///
/// let filter = SuccinctCountingBlockedBloomFilterBuilder::new()
///     .capacity(100_000)
///     .bits_per_item(16)
///     .build()?;
/// # let _ = filter;
/// # Ok::<(), countbloom::CountBloomError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SuccinctCountingBlockedBloomFilterBuilder {
    capacity: Option<usize>,
    bits_per_item: Option<usize>,
    probes: Option<usize>,
}

impl SuccinctCountingBlockedBloomFilterBuilder {
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

    /// Bits of filter per key. Defaults to
    /// [`super::DEFAULT_BITS_PER_ITEM`]. Values below 5 derive fewer than
    /// the three probes the blocked schedule needs and fail at build time.
    #[must_use]
    pub fn bits_per_item(mut self, bits: usize) -> Self {
        self.bits_per_item = Some(bits);
        self
    }

    /// Probe count override, at least three.
    #[must_use]
    pub fn probes(mut self, probes: usize) -> Self {
        self.probes = Some(probes);
        self
    }

    /// Validate and construct the filter.
    ///
    /// # Errors
    ///
    /// Parameter validation errors; see [`crate::core::params`] and the
    /// probe floor on
    /// [`SuccinctCountingBlockedBloomFilter::with_hasher`].
    pub fn build(self) -> Result<SuccinctCountingBlockedBloomFilter> {
        let params = resolve_params(self.capacity, self.bits_per_item, self.probes)?;
        SuccinctCountingBlockedBloomFilter::with_hasher(params, MultiplyShiftHasher::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::CountingFilter;

    #[test]
    fn test_succinct_build_with_defaults() {
        let mut filter = SuccinctCountingBloomFilterBuilder::new()
            .capacity(1000)
            .build()
            .unwrap();
        filter.add(42).unwrap();
        assert!(filter.contains(42));
    }

    #[test]
    fn test_succinct_build_requires_capacity() {
        assert!(SuccinctCountingBloomFilterBuilder::new().build().is_err());
    }

    #[test]
    fn test_blocked_build_with_defaults() {
        let mut filter = SuccinctCountingBlockedBloomFilterBuilder::new()
            .capacity(1000)
            .bits_per_item(16)
            .build()
            .unwrap();
        filter.add(42).unwrap();
        assert!(filter.contains(42));
        assert_eq!(filter.probe_count(), 11);
    }

    #[test]
    fn test_blocked_build_rejects_probe_floor() {
        assert!(SuccinctCountingBlockedBloomFilterBuilder::new()
            .capacity(1000)
            .bits_per_item(16)
            .probes(2)
            .build()
            .is_err());

        // 2 bits per item derives a single probe.
        assert!(SuccinctCountingBlockedBloomFilterBuilder::new()
            .capacity(1000)
            .bits_per_item(2)
            .build()
            .is_err());
    }
}
