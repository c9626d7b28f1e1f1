//! Fluent builders for filter construction.
//!
//! Builders collect construction parameters with method chaining and
//! validate everything in `build()`. They construct filters with the
//! default hash family; code that needs a custom [`crate::hash::KeyHasher`]
//! uses the filters' `with_hasher` constructors directly.
//!
//! # Examples
//!
//! ```
//! use countbloom::builder::SuccinctCountingBloomFilterBuilder;
//!
//! let filter = SuccinctCountingBloomFilterBuilder::new()
//!     .capacity(100_000)
//!     .bits_per_item(12)
//!     .build()?;
//! # let _ = filter;
//! # Ok::<(), countbloom::CountBloomError>(())
//! ```
//!
//! # Builder Comparison
//!
//! | Builder | Required | Optional |
//! |---------|----------|----------|
//! | `CountingBloomFilterBuilder` | capacity | bits_per_item, probes |
//! | `SuccinctCountingBloomFilterBuilder` | capacity | bits_per_item, probes |
//! | `SuccinctCountingBlockedBloomFilterBuilder` | capacity | bits_per_item, probes |

#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod counting;
pub mod succinct;

pub use counting::CountingBloomFilterBuilder;
pub use succinct::{
    SuccinctCountingBlockedBloomFilterBuilder, SuccinctCountingBloomFilterBuilder,
};

use crate::core::params::FilterParams;
use crate::error::{CountBloomError, Result};

/// Default bits-per-item when a builder is not told otherwise.
///
/// Ten bits per key puts the false positive rate around 1%, the
/// conventional starting point.
pub const DEFAULT_BITS_PER_ITEM: usize = 10;

/// Resolve the shared builder fields into validated parameters.
fn resolve_params(
    capacity: Option<usize>,
    bits_per_item: Option<usize>,
    probes: Option<usize>,
) -> Result<FilterParams> {
    let capacity = capacity
        .ok_or_else(|| CountBloomError::invalid_parameters("capacity is required"))?;
    let bits_per_item = bits_per_item.unwrap_or(DEFAULT_BITS_PER_ITEM);
    match probes {
        Some(probes) => FilterParams::with_probes(capacity, bits_per_item, probes),
        None => FilterParams::new(capacity, bits_per_item),
    }
}
