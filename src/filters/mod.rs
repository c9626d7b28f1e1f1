//! Filter implementations.
//!
//! # Available Filters
//!
//! - [`SuccinctCountingBloomFilter`] - monolithic array, succinct counters
//! - [`SuccinctCountingBlockedBloomFilter`] - cache-line buckets, succinct
//!   counters, one cache miss per negative query
//! - [`CountingBloomFilter`] - classical 4-bit counting filter, the
//!   baseline the succinct variants replace
//!
//! # Choosing a Filter
//!
//! | Filter | Memory vs plain Bloom | Deletion | Query cost |
//! |--------|----------------------|----------|------------|
//! | [`SuccinctCountingBloomFilter`] | ~2x + overflow pool | exact counters to 255 | k probes, scattered |
//! | [`SuccinctCountingBlockedBloomFilter`] | ~2x + overflow pool | exact counters to 255 | k probes, one cache line |
//! | [`CountingBloomFilter`] | 4x | nibbles, wrap at 15 | k probes, scattered |
//!
//! All three share hashing and probe generation; only the counting
//! machinery differs. The succinct variants answer queries from a bit
//! layer identical to a plain Bloom filter's, so their false positive
//! rates match it; the blocked variant trades a little accuracy for
//! bounded memory traffic.

pub mod counting;
pub mod succinct;
pub mod succinct_blocked;

pub use counting::CountingBloomFilter;
pub use succinct::SuccinctCountingBloomFilter;
pub use succinct_blocked::SuccinctCountingBlockedBloomFilter;
