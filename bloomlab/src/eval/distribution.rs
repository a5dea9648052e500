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

use crate::error::Error;
use crate::hash::HashFamily;

/// Per-index hit counts of a single hash function over a range of keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDistribution {
    counts: Vec<u64>,
}

impl IndexDistribution {
    /// Returns the number of keys that landed on each index.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Returns the total number of keys hashed.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Returns the smallest per-index count.
    pub fn min_load(&self) -> u64 {
        self.counts.iter().copied().min().unwrap_or(0)
    }

    /// Returns the largest per-index count.
    pub fn max_load(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Returns the number of indices no key landed on.
    pub fn empty_slots(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 0).count()
    }
}

/// Hashes the keys `0..num_keys` with the first function of `family` into `num_bits` slots and
/// counts the hits per slot.
///
/// A uniform hash function keeps [`min_load()`](IndexDistribution::min_load) and
/// [`max_load()`](IndexDistribution::max_load) close to `num_keys / num_bits`.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if the family
/// has no hash functions or `num_bits` is zero or does not fit in memory.
///
/// # Examples
///
/// ```
/// # use bloomlab::eval::index_distribution;
/// # use bloomlab::hash::SeededHash;
/// let family = SeededHash::from_seeds(vec![12345]);
/// let distribution = index_distribution(&family, 10_000, 100).unwrap();
/// assert_eq!(distribution.total(), 10_000);
/// assert_eq!(distribution.counts().len(), 100);
/// ```
pub fn index_distribution<H: HashFamily + ?Sized>(
    family: &H,
    num_keys: u64,
    num_bits: u64,
) -> Result<IndexDistribution, Error> {
    if family.num_hashes() == 0 {
        return Err(Error::invalid_argument("hash family has no functions"));
    }
    let slots = usize::try_from(num_bits)
        .ok()
        .filter(|&slots| slots > 0)
        .ok_or_else(|| {
            Error::invalid_argument("num_bits must be positive and addressable")
                .with_context("num_bits", num_bits)
        })?;

    let mut counts = vec![0u64; slots];
    for key in 0..num_keys {
        counts[family.index(0, key, num_bits) as usize] += 1;
    }
    Ok(IndexDistribution { counts })
}
