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

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::HashFamily;

/// Largest seed value drawn by a [`SeedPool`].
pub const MAX_SEED: u64 = i32::MAX as u64;

/// An append-only pool of seeds shared by seeded-PRNG hash families.
///
/// The seed at position `i` identifies the `i`-th seeded hash function. Growing the pool with
/// [`ensure_seeds()`](Self::ensure_seeds) never changes seeds that were already issued, so every
/// filter built from the same pool uses the same function identities regardless of how many
/// functions later filters request.
///
/// # Examples
///
/// ```
/// # use bloomlab::hash::SeedPool;
/// let mut pool = SeedPool::with_rng_seed(42);
/// pool.ensure_seeds(3);
/// let first = pool.seeds().to_vec();
///
/// pool.ensure_seeds(5);
/// assert_eq!(pool.len(), 5);
/// assert_eq!(&pool.seeds()[..3], &first[..]);
/// ```
#[derive(Debug, Clone)]
pub struct SeedPool {
    seeds: Vec<u64>,
    rng: StdRng,
}

impl SeedPool {
    /// Creates an empty pool whose seeds are drawn from operating system entropy.
    pub fn new() -> Self {
        SeedPool {
            seeds: vec![],
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an empty pool whose seeds are drawn from a deterministic generator.
    pub fn with_rng_seed(rng_seed: u64) -> Self {
        SeedPool {
            seeds: vec![],
            rng: StdRng::seed_from_u64(rng_seed),
        }
    }

    /// Grows the pool to at least `num_hashes` seeds.
    ///
    /// New seeds are drawn uniformly from `[0, MAX_SEED]` and appended. Existing seeds are never
    /// modified, and the call is a no-op once the pool is long enough.
    pub fn ensure_seeds(&mut self, num_hashes: usize) {
        while self.seeds.len() < num_hashes {
            let seed = self.rng.random_range(0..=MAX_SEED);
            self.seeds.push(seed);
        }
    }

    /// Returns the seeds issued so far.
    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }

    /// Returns the number of seeds issued so far.
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// Returns true if no seeds have been issued.
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}

impl Default for SeedPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash family where function `i` seeds a fresh generator with `seed_i + key` and draws one
/// uniform index.
///
/// The generator is re-created for every evaluation, so an index is a pure function of
/// `(seed_i, key, num_bits)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededHash {
    seeds: Vec<u64>,
}

impl SeededHash {
    /// Creates a family of `num_hashes` functions backed by the first seeds of `pool`.
    ///
    /// The pool is grown first if it holds fewer than `num_hashes` seeds. Since the pool is
    /// append-only, copying its prefix is equivalent to reading the pool on every lookup.
    pub fn from_pool(pool: &mut SeedPool, num_hashes: usize) -> Self {
        pool.ensure_seeds(num_hashes);
        SeededHash {
            seeds: pool.seeds()[..num_hashes].to_vec(),
        }
    }

    /// Creates a family from explicit seeds, one per hash function.
    pub fn from_seeds(seeds: Vec<u64>) -> Self {
        SeededHash { seeds }
    }

    /// Returns the seeds, one per hash function.
    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }
}

impl HashFamily for SeededHash {
    fn num_hashes(&self) -> usize {
        self.seeds.len()
    }

    fn index(&self, i: usize, key: u64, num_bits: u64) -> u64 {
        let mut rng = StdRng::seed_from_u64(self.seeds[i].wrapping_add(key));
        rng.random_range(0..num_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_seeds_grows_to_exact_length() {
        let mut pool = SeedPool::with_rng_seed(1);
        assert!(pool.is_empty());

        pool.ensure_seeds(4);
        assert_eq!(pool.len(), 4);
        assert!(pool.seeds().iter().all(|&s| s <= MAX_SEED));

        pool.ensure_seeds(0);
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn test_ensure_seeds_is_append_only() {
        let mut pool = SeedPool::with_rng_seed(2);
        pool.ensure_seeds(6);
        let snapshot = pool.seeds().to_vec();

        pool.ensure_seeds(3);
        assert_eq!(pool.seeds(), &snapshot[..]);

        pool.ensure_seeds(10);
        assert_eq!(pool.len(), 10);
        assert_eq!(&pool.seeds()[..6], &snapshot[..]);
    }

    #[test]
    fn test_pools_are_isolated() {
        let mut a = SeedPool::with_rng_seed(5);
        let mut b = SeedPool::with_rng_seed(5);
        a.ensure_seeds(3);
        assert!(b.is_empty());
        b.ensure_seeds(3);
        assert_eq!(a.seeds(), b.seeds());
    }

    #[test]
    fn test_from_pool_shares_prefix() {
        let mut pool = SeedPool::with_rng_seed(3);
        let small = SeededHash::from_pool(&mut pool, 2);
        let large = SeededHash::from_pool(&mut pool, 5);
        assert_eq!(pool.len(), 5);
        assert_eq!(small.seeds(), &large.seeds()[..2]);

        for key in 0..50 {
            assert_eq!(small.index(0, key, 1000), large.index(0, key, 1000));
            assert_eq!(small.index(1, key, 1000), large.index(1, key, 1000));
        }
    }

    #[test]
    fn test_indices_deterministic_and_in_range() {
        let family = SeededHash::from_seeds(vec![0, 17, MAX_SEED, u64::MAX]);
        for num_bits in [1, 10, 4096, 100_000] {
            for key in [0, 1, 99, u64::MAX] {
                let indices = family.compute_indices(key, num_bits);
                assert_eq!(indices.len(), 4);
                assert!(indices.iter().all(|&i| i < num_bits));
                assert_eq!(indices, family.compute_indices(key, num_bits));
            }
        }
    }

    #[test]
    fn test_index_depends_on_seed_plus_key() {
        let left = SeededHash::from_seeds(vec![10]);
        let right = SeededHash::from_seeds(vec![12]);
        // seed 10 with key 7 and seed 12 with key 5 share the generator seed 17
        assert_eq!(left.index(0, 7, 1 << 20), right.index(0, 5, 1 << 20));
    }
}
