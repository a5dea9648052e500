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

use crate::hash::HashFamily;

/// A Bloom filter over `u64` keys, parameterized by its [`HashFamily`].
///
/// Provides membership queries with:
/// - No false negatives (inserted keys always return `true`)
/// - Possible false positives, measured by [`Evaluator`](crate::eval::Evaluator)
/// - Fixed size: bits are only ever set, never cleared
///
/// Use [`super::BloomFilterBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter<H> {
    /// The k hash functions
    pub(super) hash_family: H,
    /// Total number of bits in the filter (m)
    pub(super) capacity_bits: u64,
    /// Count of bits set to 1 (for statistics)
    pub(super) num_bits_set: u64,
    /// Bit array packed into u64 words
    /// Length = ceil(capacity_bits / 64)
    pub(super) bit_array: Vec<u64>,
}

/// A filter whose hash strategy is chosen at runtime.
pub type DynBloomFilter = BloomFilter<Box<dyn HashFamily>>;

impl<H: HashFamily> BloomFilter<H> {
    /// Tests whether a key is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Key was **possibly** inserted (or false positive)
    /// - `false`: Key was **definitely not** inserted
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomlab::bloom::BloomFilterBuilder;
    /// let mut filter = BloomFilterBuilder::with_size(1024, 3)
    ///     .rng_seed(1)
    ///     .build_affine()
    ///     .unwrap();
    /// filter.insert(42);
    ///
    /// assert!(filter.contains(42));
    /// ```
    pub fn contains(&self, key: u64) -> bool {
        if self.is_empty() {
            return false;
        }

        (0..self.hash_family.num_hashes())
            .all(|i| self.get_bit(self.hash_family.index(i, key, self.capacity_bits)))
    }

    /// Tests and inserts a key in a single operation.
    ///
    /// Returns whether the key was possibly already in the set before insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomlab::bloom::BloomFilterBuilder;
    /// # use bloomlab::hash::SeedPool;
    /// let mut pool = SeedPool::with_rng_seed(7);
    /// let mut filter = BloomFilterBuilder::with_size(1024, 3)
    ///     .build_seeded(&mut pool)
    ///     .unwrap();
    ///
    /// assert!(!filter.contains_and_insert(5)); // First insertion
    /// assert!(filter.contains_and_insert(5)); // Now it's in the set
    /// ```
    pub fn contains_and_insert(&mut self, key: u64) -> bool {
        let mut was_present = true;
        for i in 0..self.hash_family.num_hashes() {
            let bit_index = self.hash_family.index(i, key, self.capacity_bits);
            was_present &= !self.set_bit(bit_index);
        }
        was_present
    }

    /// Inserts a key into the filter.
    ///
    /// After insertion, `contains(key)` will always return `true`. Inserting the same key
    /// again leaves the filter unchanged.
    pub fn insert(&mut self, key: u64) {
        for i in 0..self.hash_family.num_hashes() {
            let bit_index = self.hash_family.index(i, key, self.capacity_bits);
            self.set_bit(bit_index);
        }
    }

    /// Returns the number of hash functions used.
    pub fn num_hashes(&self) -> usize {
        self.hash_family.num_hashes()
    }

    /// Returns the hash family bound to this filter.
    pub fn hash_family(&self) -> &H {
        &self.hash_family
    }

    /// Estimates the current false positive probability.
    ///
    /// Uses the approximation `load_factor^k`, which assumes a uniform bit distribution.
    pub fn estimated_fpp(&self) -> f64 {
        let k = self.num_hashes() as f64;
        self.load_factor().powf(k)
    }

    /// Gets the value of a single bit.
    fn get_bit(&self, bit_index: u64) -> bool {
        let word_index = (bit_index >> 6) as usize; // Equivalent to bit_index / 64
        let bit_offset = bit_index & 63; // Equivalent to bit_index % 64
        let mask = 1u64 << bit_offset;
        (self.bit_array[word_index] & mask) != 0
    }

    /// Sets a single bit, returning true if it was previously unset.
    fn set_bit(&mut self, bit_index: u64) -> bool {
        let word_index = (bit_index >> 6) as usize;
        let bit_offset = bit_index & 63;
        let mask = 1u64 << bit_offset;

        if (self.bit_array[word_index] & mask) == 0 {
            self.bit_array[word_index] |= mask;
            self.num_bits_set += 1;
            true
        } else {
            false
        }
    }
}

impl<H> BloomFilter<H> {
    /// Returns whether the filter is empty (no keys inserted).
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of bits set to 1.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the total number of bits in the filter (m).
    pub fn capacity(&self) -> u64 {
        self.capacity_bits
    }

    /// Returns the current load factor (fraction of bits set).
    ///
    /// Values near 0.5 indicate the filter is at its optimal fill for the chosen k.
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.capacity_bits as f64
    }
}

impl<H: HashFamily + 'static> BloomFilter<H> {
    /// Erases the concrete hash family type.
    pub fn into_dyn(self) -> DynBloomFilter {
        let hash_family: Box<dyn HashFamily> = Box::new(self.hash_family);
        BloomFilter {
            hash_family,
            capacity_bits: self.capacity_bits,
            num_bits_set: self.num_bits_set,
            bit_array: self.bit_array,
        }
    }
}
