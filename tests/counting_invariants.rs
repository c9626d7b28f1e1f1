//! Counter-layer invariants exercised through the public API: overflow
//! promotion and demotion, pool conservation and exhaustion, add/remove
//! symmetry, and probe locality.

use countbloom::core::params::FilterParams;
use countbloom::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Hash family stub returning one fixed hash: `(a, b) = (0, 1 << 29)`.
///
/// Against a 161-group filter the probe walk lands on seven distinct
/// groups (0, 20, 40, ...), all at bit 0, so per-probe counts are exact
/// rather than inflated by self-aliasing.
#[derive(Debug, Clone, Default)]
struct FixedHasher;

impl KeyHasher for FixedHasher {
    fn hash_key(&self, _key: u64) -> u64 {
        0x2000_0000
    }

    fn name(&self) -> &'static str {
        "Fixed"
    }
}

/// Hash family stub herding keys into buckets of a 32-bucket blocked
/// filter: keys `300b..300(b+1)` collide on bucket `b`, with the low hash
/// half mixed so in-bucket probes still spread.
#[derive(Debug, Clone, Default)]
struct BucketFloodHasher;

impl KeyHasher for BucketFloodHasher {
    fn hash_key(&self, key: u64) -> u64 {
        let bucket = key / 300;
        let low = (key.wrapping_mul(0x9e37_79b9_7f4a_7c15) >> 32) as u32;
        ((bucket << 27) << 32) | u64::from(low)
    }

    fn name(&self) -> &'static str {
        "BucketFlood"
    }
}

#[test]
fn seventy_duplicates_promote_and_read_back_exactly() {
    let params = FilterParams::new(1024, 10).unwrap();
    let mut filter = SuccinctCountingBloomFilter::with_hasher(params, FixedHasher).unwrap();

    for _ in 0..70 {
        filter.add(1).unwrap();
    }
    assert_eq!(filter.probe_counts(1), vec![70; 7]);
    assert!(filter.probes_overflowed(1));
    assert_eq!(filter.overflowed_groups(), 7);
}

#[test]
fn seventy_removals_demote_and_zero_everything() {
    let params = FilterParams::new(1024, 10).unwrap();
    let mut filter = SuccinctCountingBloomFilter::with_hasher(params, FixedHasher).unwrap();

    for _ in 0..70 {
        filter.add(1).unwrap();
    }
    let total_records = filter.overflow_records();
    for _ in 0..70 {
        filter.remove(1);
    }

    assert!(!filter.contains(1));
    assert!(filter.is_empty());
    assert_eq!(filter.overflowed_groups(), 0);
    // Every record is back on the free list (the LIFO head moves, the set
    // is conserved).
    assert_eq!(filter.free_overflow_records(), total_records);
}

#[test]
fn duplicates_overflow_under_a_real_hash_family_too() {
    let mut filter = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(1024, 10).unwrap();
    for _ in 0..70 {
        filter.add(99).unwrap();
    }
    // Self-aliasing can only inflate counts, never shrink them.
    for count in filter.probe_counts(99) {
        assert!(count >= 70);
    }
    assert!(filter.probes_overflowed(99));

    for _ in 0..70 {
        filter.remove(99);
    }
    assert!(filter.is_empty());
    assert_eq!(filter.free_overflow_records(), filter.overflow_records());
}

#[test]
fn flooded_buckets_exhaust_the_pool_loudly() {
    // 32 buckets, 256 groups, 22 overflow records. Flooding a bucket with
    // 300 colliding keys promotes all 8 of its groups, so the third
    // flooded bucket runs the pool dry.
    let params = FilterParams::new(1024, 16).unwrap();
    let mut filter =
        SuccinctCountingBlockedBloomFilter::with_hasher(params, BucketFloodHasher).unwrap();
    assert_eq!(filter.overflow_records(), 22);

    // Buckets 0 and 1 fit: 16 records.
    for key in 0..600u64 {
        filter.add(key).unwrap();
    }
    assert_eq!(filter.overflowed_groups(), 16);
    assert_eq!(filter.free_overflow_records(), 6);

    // Bucket 2 needs 8 more records with 6 available.
    let mut successes = 0usize;
    let mut failures = 0usize;
    for key in 600..900u64 {
        match filter.add(key) {
            Ok(()) => successes += 1,
            Err(err) => {
                assert_eq!(err, CountBloomError::overflow_pool_exhausted(22));
                failures += 1;
            }
        }
    }
    assert!(successes > 0, "some adds must land before the pool dries up");
    assert!(failures > 0, "exhaustion must surface as an error");
    assert_eq!(filter.free_overflow_records(), 0);

    // Conservation: every record is either free or owned by a group.
    assert_eq!(
        filter.overflowed_groups() + filter.free_overflow_records(),
        filter.overflow_records()
    );
}

#[test]
fn add_remove_of_an_absent_key_is_a_no_op() {
    let mut filter = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(4096, 10).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        filter.add(rng.gen()).unwrap();
    }

    let data_before = filter.data_words().to_vec();
    let free_before = filter.free_overflow_records();
    let overflowed_before = filter.overflowed_groups();

    filter.add(0xdead_beef).unwrap();
    filter.remove(0xdead_beef);

    assert_eq!(filter.data_words(), data_before.as_slice());
    assert_eq!(filter.free_overflow_records(), free_before);
    assert_eq!(filter.overflowed_groups(), overflowed_before);
}

#[test]
fn blocked_probes_never_leave_their_bucket() {
    let filter = SuccinctCountingBlockedBloomFilter::<MultiplyShiftHasher>::new(100_000, 16).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..2000 {
        let key = rng.gen();
        let bucket = filter.bucket_index(key);
        for (group, _bit) in filter.probe_positions(key) {
            assert!(group / 8 == bucket, "probe escaped bucket {bucket}");
        }
    }
}

#[test]
fn random_interleaving_matches_a_reference_multiset() {
    let mut filter = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(2048, 12).unwrap();
    let mut rng = StdRng::seed_from_u64(0xfeed);
    let mut reference: HashMap<u64, u32> = HashMap::new();

    for _ in 0..20_000 {
        let key = u64::from(rng.gen_range(0..400u32));
        if rng.gen_bool(0.55) {
            filter.add(key).unwrap();
            *reference.entry(key).or_insert(0) += 1;
        } else if reference.get(&key).copied().unwrap_or(0) > 0 {
            filter.remove(key);
            *reference.get_mut(&key).unwrap() -= 1;
        }
    }

    for (&key, &count) in &reference {
        if count > 0 {
            assert!(filter.contains(key), "false negative for live key {key}");
        }
    }

    // Drain and verify the filter forgets everything.
    for (&key, &count) in &reference {
        for _ in 0..count {
            filter.remove(key);
        }
    }
    assert!(filter.is_empty());
    assert_eq!(filter.free_overflow_records(), filter.overflow_records());
}
