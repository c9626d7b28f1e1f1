//! End-to-end contract tests: no false negatives, false positive bounds,
//! and the documented baseline limitations.

use countbloom::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn succinct_filter_has_no_false_negatives() {
    let mut filter = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(1024, 10).unwrap();
    for key in 0..1000u64 {
        filter.add(key).unwrap();
    }
    for key in 0..1000u64 {
        assert!(filter.contains(key), "false negative for {key}");
    }
}

#[test]
fn succinct_filter_false_positive_rate_within_bound() {
    let mut filter = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(1024, 10).unwrap();
    filter.add_all(&(0..1000u64).collect::<Vec<_>>()).unwrap();

    // 10 bits per key and 7 probes put the theoretical rate near 1%;
    // assert the 2% contract with enough samples to make noise irrelevant.
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut false_positives = 0usize;
    let samples = 10_000;
    for _ in 0..samples {
        let key = rng.gen_range(1_000_000u64..u64::MAX);
        if filter.contains(key) {
            false_positives += 1;
        }
    }
    let rate = false_positives as f64 / samples as f64;
    assert!(rate <= 0.02, "false positive rate {rate} exceeds 2%");
}

#[test]
fn blocked_filter_holds_one_hundred_thousand_keys() {
    let mut filter = SuccinctCountingBlockedBloomFilter::<MultiplyShiftHasher>::new(100_000, 16).unwrap();
    assert_eq!(filter.probe_count(), 11);

    let mut rng = StdRng::seed_from_u64(42);
    let keys: Vec<u64> = (0..100_000).map(|_| rng.gen()).collect();
    let inserted: std::collections::HashSet<u64> = keys.iter().copied().collect();
    filter.add_all(&keys).unwrap();

    for &key in &keys {
        assert!(filter.contains(key), "false negative for {key}");
    }

    // Blocking concentrates probes into one cache line and costs some
    // dispersion; 16 bits per key still keeps the rate well under 0.2%.
    let mut false_positives = 0usize;
    let samples = 200_000;
    for _ in 0..samples {
        let key = rng.gen();
        if !inserted.contains(&key) && filter.contains(key) {
            false_positives += 1;
        }
    }
    let rate = false_positives as f64 / samples as f64;
    assert!(rate <= 0.002, "false positive rate {rate} exceeds 0.2%");
}

#[test]
fn all_variants_round_trip_through_the_trait() {
    fn exercise(filter: &mut dyn CountingFilter) {
        let keys: Vec<u64> = (100..200).collect();
        filter.add_all(&keys).unwrap();
        for &key in &keys {
            assert!(filter.contains(key));
        }
        for &key in &keys {
            filter.remove(key);
        }
        for &key in &keys {
            assert!(!filter.contains(key), "stale key {key} after removal");
        }
    }

    let mut scbf = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(10_000, 10).unwrap();
    let mut scbbf = SuccinctCountingBlockedBloomFilter::<MultiplyShiftHasher>::new(10_000, 16).unwrap();
    let mut cbf = CountingBloomFilter::<MultiplyShiftHasher>::new(10_000, 10).unwrap();
    exercise(&mut scbf);
    exercise(&mut scbbf);
    exercise(&mut cbf);

    assert!(scbf.is_empty());
    assert!(scbbf.is_empty());
    assert!(cbf.is_empty());
}

#[test]
fn multiplicities_survive_partial_removal() {
    let mut filter = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(4096, 10).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    let mut multiplicity = std::collections::HashMap::new();
    for key in 0..500u64 {
        let n = rng.gen_range(1..6u32);
        for _ in 0..n {
            filter.add(key).unwrap();
        }
        multiplicity.insert(key, n);
    }

    // Remove one instance of every key; everything stays present.
    for key in 0..500u64 {
        filter.remove(key);
        *multiplicity.get_mut(&key).unwrap() -= 1;
    }
    for (&key, &n) in &multiplicity {
        if n > 0 {
            assert!(filter.contains(key), "false negative for {key} at {n}");
        }
    }

    // Drain the rest; the filter must return to its empty state.
    for (&key, &n) in &multiplicity {
        for _ in 0..n {
            filter.remove(key);
        }
    }
    assert!(filter.is_empty());
}

#[test]
fn counting_baseline_saturates_quietly() {
    // The 4-bit baseline keeps working through 15 duplicate inserts and
    // wraps afterwards; it must never panic either way.
    let mut filter = CountingBloomFilter::<MultiplyShiftHasher>::new(1000, 10).unwrap();
    for _ in 0..15 {
        filter.add(3).unwrap();
    }
    assert!(filter.contains(3));
    filter.add(3).unwrap();
    filter.remove(3);
    filter.remove(3);
}

#[test]
fn size_in_bytes_reflects_variant_layouts() {
    let scbf = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(100_000, 10).unwrap();
    let scbbf = SuccinctCountingBlockedBloomFilter::<MultiplyShiftHasher>::new(100_000, 16).unwrap();
    let cbf = CountingBloomFilter::<MultiplyShiftHasher>::new(100_000, 10).unwrap();

    // data + counts + overflow pool
    let scbf_groups = (100_000 * 10 + 63) / 64;
    assert!(scbf.size_in_bytes() >= scbf_groups * 16);

    // 64 bytes of data per bucket plus the counter layer
    let buckets = 100_000 * 16 / 512;
    assert!(scbbf.size_in_bytes() >= buckets * 128);

    // four bits per position, data only
    assert_eq!(cbf.size_in_bytes(), (4 * 100_000 * 10 + 63) / 64 * 8);
}

#[test]
fn builders_and_constructors_agree() {
    let built = SuccinctCountingBloomFilterBuilder::new()
        .capacity(5000)
        .bits_per_item(12)
        .build()
        .unwrap();
    let constructed = SuccinctCountingBloomFilter::<MultiplyShiftHasher>::new(5000, 12).unwrap();
    assert_eq!(built.capacity(), constructed.capacity());
    assert_eq!(built.probe_count(), constructed.probe_count());
    assert_eq!(built.size_in_bytes(), constructed.size_in_bytes());
}
