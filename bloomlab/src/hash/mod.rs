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

//! Hash families that map an integer key to the k bit positions of a Bloom filter.
//!
//! Two strategies are provided:
//!
//! - [`AffineHash`]: universal hashing `((a * x + b) mod p) mod m` with random coefficients drawn
//!   once per filter.
//! - [`SeededHash`]: each hash function is a pseudorandom generator seeded with `seed + x`, drawing
//!   one uniform index. Seeds come from a shared, append-only [`SeedPool`].
//!
//! Both implement [`HashFamily`], so [`BloomFilter`](crate::bloom::BloomFilter) and the evaluation
//! harness are written once and parameterized by strategy.

mod affine;
mod seeded;

use std::fmt;

pub use self::affine::AffineCoefficients;
pub use self::affine::AffineHash;
pub use self::affine::MERSENNE_PRIME_61;
pub use self::affine::generate_coefficients;
pub use self::seeded::MAX_SEED;
pub use self::seeded::SeedPool;
pub use self::seeded::SeededHash;

/// A family of k hash functions mapping integer keys into `[0, num_bits)`.
pub trait HashFamily: fmt::Debug {
    /// Returns the number of hash functions (k) in this family.
    fn num_hashes(&self) -> usize;

    /// Computes the index of the `i`-th hash function for `key`.
    ///
    /// The result lies in `[0, num_bits)`. `i` must be less than [`num_hashes()`] and `num_bits`
    /// must be positive.
    ///
    /// [`num_hashes()`]: HashFamily::num_hashes
    fn index(&self, i: usize, key: u64, num_bits: u64) -> u64;

    /// Computes all k indices for `key`, in hash function order.
    ///
    /// Indices are not deduplicated: two functions may map a key to the same position.
    fn compute_indices(&self, key: u64, num_bits: u64) -> Vec<u64> {
        (0..self.num_hashes())
            .map(|i| self.index(i, key, num_bits))
            .collect()
    }
}

impl<H: HashFamily + ?Sized> HashFamily for Box<H> {
    fn num_hashes(&self) -> usize {
        (**self).num_hashes()
    }

    fn index(&self, i: usize, key: u64, num_bits: u64) -> u64 {
        (**self).index(i, key, num_bits)
    }
}

/// Selects which [`HashFamily`] implementation a filter is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashStrategy {
    /// Universal hashing via random affine maps modulo [`MERSENNE_PRIME_61`].
    AffineModular,
    /// One seeded pseudorandom generator per hash function.
    SeededPrng,
}

impl HashStrategy {
    /// Both strategies, in a stable order.
    pub const ALL: [HashStrategy; 2] = [HashStrategy::AffineModular, HashStrategy::SeededPrng];

    /// Returns a short, human-readable name of the strategy.
    pub const fn name(self) -> &'static str {
        match self {
            HashStrategy::AffineModular => "affine-modular",
            HashStrategy::SeededPrng => "seeded-prng",
        }
    }
}

impl fmt::Display for HashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
