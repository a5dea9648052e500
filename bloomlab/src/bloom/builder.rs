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

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::BloomFilter;
use super::DynBloomFilter;
use crate::error::Error;
use crate::hash::AffineHash;
use crate::hash::HashFamily;
use crate::hash::HashStrategy;
use crate::hash::SeedPool;
use crate::hash::SeededHash;

/// Smallest supported filter size in bits.
pub const MIN_NUM_BITS: u64 = 1;
/// Largest supported filter size in bits.
pub const MAX_NUM_BITS: u64 = i32::MAX as u64 * 64;
/// Smallest supported number of hash functions.
pub const MIN_NUM_HASHES: u16 = 1;
/// Largest supported number of hash functions.
pub const MAX_NUM_HASHES: u16 = i16::MAX as u16;

/// Builder for creating [`BloomFilter`] instances.
///
/// Provides two sizing modes:
/// - [`with_size()`](Self::with_size): Specify the bit count and hash functions directly
/// - [`with_accuracy()`](Self::with_accuracy): Specify target items and false positive rate
///
/// and one terminal method per hash strategy. Sizes are validated when the filter is built.
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    num_bits: u64,
    num_hashes: u16,
    rng_seed: Option<u64>,
}

impl BloomFilterBuilder {
    /// Creates a builder with manual size specification.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomlab::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_size(100_000, 7)
    ///     .build_affine()
    ///     .unwrap();
    /// assert_eq!(filter.capacity(), 100_000);
    /// ```
    pub fn with_size(num_bits: u64, num_hashes: u16) -> Self {
        BloomFilterBuilder {
            num_bits,
            num_hashes,
            rng_seed: None,
        }
    }

    /// Creates a builder with optimal parameters for a target accuracy.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if
    /// `max_items` is 0 or `fpp` is not in (0.0, 1.0].
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomlab::bloom::BloomFilterBuilder;
    /// let builder = BloomFilterBuilder::with_accuracy(10_000, 0.01).unwrap();
    /// let filter = builder.build_affine().unwrap();
    /// assert_eq!(filter.num_hashes(), 7);
    /// ```
    pub fn with_accuracy(max_items: u64, fpp: f64) -> Result<Self, Error> {
        if max_items == 0 {
            return Err(Error::invalid_argument("max_items must be greater than 0"));
        }
        if !(fpp > 0.0 && fpp <= 1.0) {
            return Err(Error::invalid_argument(format!(
                "fpp must be between 0.0 and 1.0 (inclusive of 1.0), got {fpp}"
            )));
        }

        let num_bits = Self::suggest_num_bits(max_items, fpp);
        let num_hashes = Self::suggest_num_hashes_from_accuracy(max_items, num_bits);
        Ok(Self::with_size(num_bits, num_hashes))
    }

    /// Fixes the generator used to draw affine coefficients, making the filter reproducible.
    ///
    /// Without a seed, coefficients come from the thread-local generator. Seeded-PRNG filters
    /// take their randomness from the [`SeedPool`] and ignore this setting.
    pub fn rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = Some(rng_seed);
        self
    }

    /// Builds a filter bound to a freshly generated affine hash family.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if the
    /// bit count or hash count is out of range.
    pub fn build_affine(self) -> Result<BloomFilter<AffineHash>, Error> {
        self.validate()?;
        let num_hashes = usize::from(self.num_hashes);
        let family = match self.rng_seed {
            Some(seed) => AffineHash::random(num_hashes, &mut StdRng::seed_from_u64(seed)),
            None => AffineHash::random(num_hashes, &mut rand::rng()),
        };
        Ok(self.make(family))
    }

    /// Builds a filter bound to the first `num_hashes` seeds of `pool`, growing it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if the
    /// bit count or hash count is out of range. The pool is left untouched in that case.
    pub fn build_seeded(self, pool: &mut SeedPool) -> Result<BloomFilter<SeededHash>, Error> {
        self.validate()?;
        let family = SeededHash::from_pool(pool, usize::from(self.num_hashes));
        Ok(self.make(family))
    }

    /// Builds a filter bound to a caller-supplied hash family.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if the
    /// bit count or hash count is out of range, or if the family does not have exactly
    /// `num_hashes` functions.
    pub fn build_with<H: HashFamily>(self, family: H) -> Result<BloomFilter<H>, Error> {
        self.validate()?;
        if family.num_hashes() != usize::from(self.num_hashes) {
            return Err(Error::invalid_argument(format!(
                "hash family has {} functions, expected {}",
                family.num_hashes(),
                self.num_hashes
            )));
        }
        Ok(self.make(family))
    }

    /// Builds a filter for a strategy chosen at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if the
    /// bit count or hash count is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomlab::bloom::BloomFilterBuilder;
    /// # use bloomlab::hash::{HashStrategy, SeedPool};
    /// let mut pool = SeedPool::new();
    /// let mut filter = BloomFilterBuilder::with_size(1000, 3)
    ///     .build(HashStrategy::SeededPrng, &mut pool)
    ///     .unwrap();
    /// filter.insert(10);
    /// assert!(filter.contains(10));
    /// ```
    pub fn build(self, strategy: HashStrategy, pool: &mut SeedPool) -> Result<DynBloomFilter, Error> {
        match strategy {
            HashStrategy::AffineModular => {
                let filter = self.build_affine()?;
                Ok(filter.into_dyn())
            }
            HashStrategy::SeededPrng => {
                let filter = self.build_seeded(pool)?;
                Ok(filter.into_dyn())
            }
        }
    }

    /// Suggests optimal number of bits given max items and target FPP.
    ///
    /// Formula: `m = -n * ln(p) / (ln(2)^2)`
    /// where n = max_items, p = fpp
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomlab::bloom::BloomFilterBuilder;
    /// let bits = BloomFilterBuilder::suggest_num_bits(1000, 0.01);
    /// assert!(bits > 9000 && bits < 10000); // ~9585 bits
    /// ```
    pub fn suggest_num_bits(max_items: u64, fpp: f64) -> u64 {
        let n = max_items as f64;
        let p = fpp;
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;

        let bits = (-n * p.ln() / ln2_squared).ceil() as u64;

        bits.clamp(MIN_NUM_BITS, MAX_NUM_BITS)
    }

    /// Suggests optimal number of hash functions given max items and bit count.
    ///
    /// Formula: `k = (m/n) * ln(2)`
    /// where m = num_bits, n = max_items
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomlab::bloom::BloomFilterBuilder;
    /// let hashes = BloomFilterBuilder::suggest_num_hashes_from_accuracy(1000, 10000);
    /// assert_eq!(hashes, 7); // Optimal k ≈ 6.93
    /// ```
    pub fn suggest_num_hashes_from_accuracy(max_items: u64, num_bits: u64) -> u16 {
        let m = num_bits as f64;
        let n = max_items as f64;

        // Ceil to avoid selecting too few hashes.
        let k = (m / n * std::f64::consts::LN_2).ceil();
        k.clamp(f64::from(MIN_NUM_HASHES), f64::from(MAX_NUM_HASHES)) as u16
    }

    fn validate(&self) -> Result<(), Error> {
        if !(MIN_NUM_BITS..=MAX_NUM_BITS).contains(&self.num_bits) {
            return Err(Error::invalid_size(
                "num_bits",
                self.num_bits,
                MIN_NUM_BITS,
                MAX_NUM_BITS,
            ));
        }
        if !(MIN_NUM_HASHES..=MAX_NUM_HASHES).contains(&self.num_hashes) {
            return Err(Error::invalid_size(
                "num_hashes",
                u64::from(self.num_hashes),
                u64::from(MIN_NUM_HASHES),
                u64::from(MAX_NUM_HASHES),
            ));
        }
        Ok(())
    }

    fn make<H>(&self, hash_family: H) -> BloomFilter<H> {
        let num_words = self.num_bits.div_ceil(64) as usize;
        BloomFilter {
            hash_family,
            capacity_bits: self.num_bits,
            num_bits_set: 0,
            bit_array: vec![0u64; num_words],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_builder_with_accuracy() {
        let filter = BloomFilterBuilder::with_accuracy(1000, 0.01)
            .unwrap()
            .rng_seed(1)
            .build_affine()
            .unwrap();
        assert!(filter.capacity() >= 9000);
        assert_eq!(filter.num_hashes(), 7);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_builder_with_size_is_exact() {
        let filter = BloomFilterBuilder::with_size(1000, 5).build_affine().unwrap();
        assert_eq!(filter.capacity(), 1000);
        assert_eq!(filter.num_hashes(), 5);
        assert_eq!(filter.bit_array.len(), 16);
    }

    #[test]
    fn test_rng_seed_is_reproducible() {
        let f1 = BloomFilterBuilder::with_size(64, 4).rng_seed(77).build_affine().unwrap();
        let f2 = BloomFilterBuilder::with_size(64, 4).rng_seed(77).build_affine().unwrap();
        assert_eq!(f1.hash_family(), f2.hash_family());
    }

    #[test]
    fn test_affine_filters_draw_fresh_coefficients() {
        let f1 = BloomFilterBuilder::with_size(64, 4).build_affine().unwrap();
        let f2 = BloomFilterBuilder::with_size(64, 4).build_affine().unwrap();
        assert_ne!(f1.hash_family(), f2.hash_family());
    }

    #[test]
    fn test_seeded_filters_share_pool() {
        let mut pool = SeedPool::with_rng_seed(3);
        let small = BloomFilterBuilder::with_size(64, 2).build_seeded(&mut pool).unwrap();
        let large = BloomFilterBuilder::with_size(64, 6).build_seeded(&mut pool).unwrap();
        assert_eq!(pool.len(), 6);
        assert_eq!(small.hash_family().seeds(), &large.hash_family().seeds()[..2]);
    }

    #[test]
    fn test_invalid_sizes() {
        let err = BloomFilterBuilder::with_size(0, 3).build_affine().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let mut pool = SeedPool::with_rng_seed(1);
        let err = BloomFilterBuilder::with_size(10, 0).build_seeded(&mut pool).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(pool.is_empty());

        let err = BloomFilterBuilder::with_size(MAX_NUM_BITS + 1, 1)
            .build(HashStrategy::AffineModular, &mut pool)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_family_size_mismatch() {
        let family = SeededHash::from_seeds(vec![1, 2]);
        let err = BloomFilterBuilder::with_size(10, 3).build_with(family).unwrap_err();
        assert_eq!(err.message(), "hash family has 2 functions, expected 3");
    }

    #[test]
    fn test_invalid_accuracy() {
        let err = BloomFilterBuilder::with_accuracy(0, 0.01).unwrap_err();
        assert_eq!(err.message(), "max_items must be greater than 0");
        let err = BloomFilterBuilder::with_accuracy(100, 1.5).unwrap_err();
        assert!(err.message().starts_with("fpp must be between"));
    }
}
