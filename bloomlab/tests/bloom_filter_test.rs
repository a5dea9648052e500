// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use bloomlab::bloom::BloomFilterBuilder;
use bloomlab::error::ErrorKind;
use bloomlab::hash::AffineCoefficients;
use bloomlab::hash::AffineHash;
use bloomlab::hash::HashFamily;
use bloomlab::hash::HashStrategy;
use bloomlab::hash::MERSENNE_PRIME_61;
use bloomlab::hash::SeedPool;
use bloomlab::hash::SeededHash;

#[test]
fn test_known_single_hash_filter() {
    let family = AffineHash::from_coefficients(vec![AffineCoefficients::new(3, 5)]).unwrap();
    let mut filter = BloomFilterBuilder::with_size(10, 1)
        .build_with(family)
        .unwrap();

    filter.insert(7);
    assert_eq!(filter.hash_family().compute_indices(7, 10), vec![6]);
    assert_eq!(filter.bits_used(), 1);
    assert!(filter.contains(7));
    assert!(!filter.contains(8));
}

#[test]
fn test_no_false_negatives_for_both_strategies() {
    let mut pool = SeedPool::with_rng_seed(9001);
    for strategy in HashStrategy::ALL {
        let mut filter = BloomFilterBuilder::with_size(10_000, 7)
            .rng_seed(9001)
            .build(strategy, &mut pool)
            .unwrap();

        for key in (0..1_000u64).map(|i| i.wrapping_mul(0x9E37_79B9_7F4A_7C15)) {
            filter.insert(key);
        }
        for key in (0..1_000u64).map(|i| i.wrapping_mul(0x9E37_79B9_7F4A_7C15)) {
            assert!(filter.contains(key), "{strategy}: missing {key}");
        }
    }
}

#[test]
fn test_repeated_inserts_leave_filter_unchanged() {
    let mut pool = SeedPool::with_rng_seed(1);
    let mut filter = BloomFilterBuilder::with_size(4_096, 4)
        .build_seeded(&mut pool)
        .unwrap();
    for key in 0..100 {
        filter.insert(key);
    }
    let before = filter.clone();
    for key in (0..100).rev() {
        filter.insert(key);
    }
    assert_eq!(filter, before);
}

#[test]
fn test_affine_indices_in_range() {
    let extremes = [
        AffineCoefficients::new(1, 0),
        AffineCoefficients::new(MERSENNE_PRIME_61 - 1, MERSENNE_PRIME_61 - 1),
        AffineCoefficients::new(1 << 40, 12_345),
    ];
    let family = AffineHash::from_coefficients(extremes.to_vec()).unwrap();
    for num_bits in [1, 3, 64, 65, 100_000] {
        for key in [0, 1, u64::from(u32::MAX), MERSENNE_PRIME_61 + 1, u64::MAX] {
            for index in family.compute_indices(key, num_bits) {
                assert!(index < num_bits);
            }
        }
    }
}

#[test]
fn test_seeded_family_matches_pool_prefix() {
    let mut pool = SeedPool::with_rng_seed(17);
    let first = BloomFilterBuilder::with_size(1_000, 7)
        .build_seeded(&mut pool)
        .unwrap();
    let seeds = pool.seeds().to_vec();

    let second = BloomFilterBuilder::with_size(1_000, 3)
        .build_seeded(&mut pool)
        .unwrap();
    assert_eq!(pool.seeds(), &seeds[..]);
    assert_eq!(second.hash_family().seeds(), &seeds[..3]);

    let standalone = SeededHash::from_seeds(seeds[..3].to_vec());
    for key in 0..100 {
        assert_eq!(
            standalone.compute_indices(key, 1_000),
            first.hash_family().compute_indices(key, 1_000)[..3].to_vec()
        );
    }
}

#[test]
fn test_invalid_construction() {
    let mut pool = SeedPool::with_rng_seed(1);
    for strategy in HashStrategy::ALL {
        let err = BloomFilterBuilder::with_size(0, 3)
            .build(strategy, &mut pool)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = BloomFilterBuilder::with_size(100, 0)
            .build(strategy, &mut pool)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
    assert!(pool.is_empty());
}
