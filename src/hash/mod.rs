//! Hash families and probe generation for counting filters.
//!
//! # Module Structure
//!
//! ```text
//! hash/
//! ├── hasher.rs  - KeyHasher trait, MultiplyShiftHasher, Xxh3KeyHasher
//! ├── probe.rs   - Lemire reduce + double-hashing ProbeSequence
//! └── mod.rs     - This file (public API)
//! ```
//!
//! Filters are generic over [`KeyHasher`] with [`MultiplyShiftHasher`] as
//! the default. The split mirrors the rest of the crate: hash families map
//! keys to 64-bit hashes, [`probe`] turns hashes into probe streams, and
//! the filters map probe values onto their own geometry.
//!
//! # Quick Start
//!
//! ```
//! use countbloom::hash::{KeyHasher, MultiplyShiftHasher};
//! use countbloom::hash::probe::ProbeSequence;
//!
//! let hasher = MultiplyShiftHasher::new();
//! let mut probes = ProbeSequence::new(hasher.hash_key(42));
//! let raw = probes.next_raw();
//! # let _ = raw;
//! ```

pub mod hasher;
pub mod probe;

pub use hasher::{KeyHasher, MultiplyShiftHasher};

#[cfg(feature = "xxhash")]
pub use hasher::Xxh3KeyHasher;

pub use probe::{reduce, ProbeSequence};
