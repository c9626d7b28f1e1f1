//! Error types for countbloom operations.
//!
//! All fallible operations in this crate return [`Result<T>`] with
//! [`CountBloomError`] as the error type. Construction errors report invalid
//! parameters; runtime errors report capacity failures in the counter layer.
//!
//! # Capacity errors
//!
//! The succinct filters have two hard capacity limits: the overflow pool can
//! run out of records, and a single per-position counter can saturate at its
//! 8-bit maximum. Neither is recoverable without rebuilding the filter, so
//! both propagate to the caller unchanged. Use
//! [`CountBloomError::is_capacity`] to distinguish them from construction
//! errors.
//!
//! # Error Propagation
//!
//! ```
//! use countbloom::{CountBloomError, Result};
//! use countbloom::core::params::FilterParams;
//!
//! fn sized_params(capacity: usize) -> Result<FilterParams> {
//!     let params = FilterParams::new(capacity, 10)?;
//!     Ok(params)
//! }
//! # assert!(sized_params(1000).is_ok());
//! # assert!(sized_params(0).is_err());
//! ```

#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for countbloom operations.
pub type Result<T> = std::result::Result<T, CountBloomError>;

/// Errors that can occur during filter construction or mutation.
///
/// Each variant carries the context needed to diagnose the failure.
/// `Clone` + `PartialEq` keep the type convenient in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountBloomError {
    /// Filter parameters do not describe a usable filter.
    InvalidParameters {
        /// Human-readable description of what's invalid.
        message: String,
    },

    /// Expected item count is invalid (zero).
    InvalidItemCount {
        /// The invalid count that was provided.
        count: usize,
    },

    /// Bits-per-item setting is outside the practical range.
    InvalidBitsPerItem {
        /// The invalid value that was provided.
        bits: usize,
        /// Minimum allowed value.
        min: usize,
        /// Maximum allowed value.
        max: usize,
    },

    /// Probe (hash function) count is outside the allowed range.
    InvalidProbeCount {
        /// The invalid count that was provided.
        count: usize,
        /// Minimum allowed value.
        min: usize,
        /// Maximum allowed value.
        max: usize,
    },

    /// The overflow pool has no free records left.
    ///
    /// Raised when an increment needs to promote a group to overflow form
    /// and every record is already in use. The filter is over capacity for
    /// its configured size; the failed increment is not applied.
    OverflowPoolExhausted {
        /// Total number of records in the pool.
        records: usize,
    },

    /// A per-position counter reached its maximum value.
    ///
    /// Overflow records store one byte per bit position, so a single
    /// position supports at most 255 net insertions.
    CounterSaturated {
        /// Maximum value a per-position counter can hold.
        max_value: u64,
    },

    /// Operation is not supported by this filter variant.
    UnsupportedOperation {
        /// Name of the operation attempted.
        operation: String,
        /// Name of the filter variant.
        variant: String,
    },
}

impl fmt::Display for CountBloomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { message } => {
                write!(f, "Invalid filter parameters: {}.", message)
            }
            Self::InvalidItemCount { count } => {
                write!(
                    f,
                    "Invalid item count: {}. Expected items must be greater than 0.",
                    count
                )
            }
            Self::InvalidBitsPerItem { bits, min, max } => {
                write!(
                    f,
                    "Invalid bits per item: {}. Must be in range [{}, {}].",
                    bits, min, max
                )
            }
            Self::InvalidProbeCount { count, min, max } => {
                write!(
                    f,
                    "Invalid probe count: {}. Must be in range [{}, {}].",
                    count, min, max
                )
            }
            Self::OverflowPoolExhausted { records } => {
                write!(
                    f,
                    "Overflow pool exhausted: all {} records are in use. \
                     The filter is over capacity; rebuild with a larger size.",
                    records
                )
            }
            Self::CounterSaturated { max_value } => {
                write!(
                    f,
                    "Counter saturated: a position already holds the maximum count {}.",
                    max_value
                )
            }
            Self::UnsupportedOperation { operation, variant } => {
                write!(
                    f,
                    "Operation '{}' is not supported by the {} filter variant.",
                    operation, variant
                )
            }
        }
    }
}

impl std::error::Error for CountBloomError {}

impl CountBloomError {
    /// Create an `InvalidParameters` error with a formatted message.
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create an `InvalidItemCount` error.
    #[must_use]
    pub fn invalid_item_count(count: usize) -> Self {
        Self::InvalidItemCount { count }
    }

    /// Create an `InvalidBitsPerItem` error.
    #[must_use]
    pub fn invalid_bits_per_item(bits: usize, min: usize, max: usize) -> Self {
        Self::InvalidBitsPerItem { bits, min, max }
    }

    /// Create an `InvalidProbeCount` error.
    #[must_use]
    pub fn invalid_probe_count(count: usize, min: usize, max: usize) -> Self {
        Self::InvalidProbeCount { count, min, max }
    }

    /// Create an `OverflowPoolExhausted` error.
    #[must_use]
    pub fn overflow_pool_exhausted(records: usize) -> Self {
        Self::OverflowPoolExhausted { records }
    }

    /// Create a `CounterSaturated` error.
    #[must_use]
    pub fn counter_saturated(max_value: u64) -> Self {
        Self::CounterSaturated { max_value }
    }

    /// Create an `UnsupportedOperation` error.
    #[must_use]
    pub fn unsupported_operation(operation: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
            variant: variant.into(),
        }
    }

    /// Whether this error reports a capacity failure rather than a
    /// construction-time parameter problem.
    #[must_use]
    pub const fn is_capacity(&self) -> bool {
        matches!(
            self,
            Self::OverflowPoolExhausted { .. } | Self::CounterSaturated { .. }
        )
    }
}
