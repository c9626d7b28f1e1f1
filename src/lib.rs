//! countbloom: counting Bloom filters with succinct per-bit counters.
//!
//! A Bloom filter answers "is this key in the set?" with a tunable false
//! positive rate and no false negatives, but cannot forget: deleting a key
//! would clear bits other keys depend on. The classical fix is a *counting*
//! filter spending 4 bits per position. This crate implements the succinct
//! alternative: keep the plain bit array for queries and maintain, per
//! 64-bit group, one extra word that encodes the multiset of counts as
//! unary codes, spilling hot groups into a small pool of wide records. The
//! result supports deletion for roughly *one* extra bit per position on
//! average, and queries never touch the counters at all.
//!
//! # Quick Start
//!
//! ```
//! use countbloom::{CountingFilter, MultiplyShiftHasher, SuccinctCountingBloomFilter};
//!
//! // 100k keys at 10 bits each: ~1% false positive rate.
//! let mut filter = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(100_000, 10)?;
//!
//! filter.add(101)?;
//! filter.add(202)?;
//! assert!(filter.contains(101));
//!
//! filter.remove(101);
//! assert!(!filter.contains(101));
//! assert!(filter.contains(202));
//! # Ok::<(), countbloom::CountBloomError>(())
//! ```
//!
//! # Variants
//!
//! | Variant | Layout | Best for |
//! |---------|--------|----------|
//! | [`SuccinctCountingBloomFilter`] | one monolithic array | lowest false positive rate per bit |
//! | [`SuccinctCountingBlockedBloomFilter`] | 512-bit cache-line buckets | query throughput; one cache miss per lookup |
//! | [`CountingBloomFilter`] | 4-bit nibbles | baseline; simplest possible counters |
//!
//! All variants operate on `u64` keys through the [`CountingFilter`]
//! trait and are generic over a [`hash::KeyHasher`] family, defaulting to
//! a two-independent multiply-shift hasher.
//!
//! # Deletion contract
//!
//! `remove` is only defined for keys whose net multiplicity is positive.
//! The structures do not detect violations: removing a key that was never
//! added corrupts counters and can produce false negatives for unrelated
//! keys. Callers that cannot guarantee the precondition should keep an
//! authoritative set alongside the filter.
//!
//! # Capacity errors
//!
//! The succinct counter layer has two hard limits, both surfaced as
//! errors rather than silent corruption: the overflow pool can run out of
//! records ([`CountBloomError::OverflowPoolExhausted`]) and a single
//! position saturates at 255 ([`CountBloomError::CounterSaturated`]).
//! Both mean the filter is being used beyond its provisioned size.
//!
//! # Threading
//!
//! Filters are single-threaded values: mutation takes `&mut self`. Wrap
//! one in a `Mutex` to share it, or keep one filter per thread.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Builders for all filter variants
pub mod builder;

/// Core trait and parameter types
pub mod core;

/// Error types and result alias
pub mod error;

/// Filter implementations (variants)
pub mod filters;

/// Hash families and probe generation
pub mod hash;

/// Low-level bit utilities
pub mod util;

// The succinct counter engine; internal, exercised through the filters.
mod counter;

// Re-export commonly used types at the crate root.
pub use builder::{
    CountingBloomFilterBuilder, SuccinctCountingBlockedBloomFilterBuilder,
    SuccinctCountingBloomFilterBuilder,
};
pub use core::filter::CountingFilter;
pub use core::params::FilterParams;
pub use error::{CountBloomError, Result};
pub use filters::{
    CountingBloomFilter, SuccinctCountingBlockedBloomFilter, SuccinctCountingBloomFilter,
};
pub use hash::{KeyHasher, MultiplyShiftHasher};

#[cfg(feature = "xxhash")]
pub use hash::Xxh3KeyHasher;

/// Prelude module for convenient imports.
///
/// ```
/// use countbloom::prelude::*;
///
/// let mut filter = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(1000, 10)?;
/// filter.add(1)?;
/// assert!(filter.contains(1));
/// # Ok::<(), countbloom::CountBloomError>(())
/// ```
pub mod prelude {
    pub use crate::builder::{
        CountingBloomFilterBuilder, SuccinctCountingBlockedBloomFilterBuilder,
        SuccinctCountingBloomFilterBuilder,
    };
    pub use crate::core::filter::CountingFilter;
    pub use crate::core::params::FilterParams;
    pub use crate::error::{CountBloomError, Result};
    pub use crate::filters::{
        CountingBloomFilter, SuccinctCountingBlockedBloomFilter, SuccinctCountingBloomFilter,
    };
    pub use crate::hash::{KeyHasher, MultiplyShiftHasher};

    #[cfg(feature = "xxhash")]
    pub use crate::hash::Xxh3KeyHasher;
}
