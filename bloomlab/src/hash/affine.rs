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

use super::HashFamily;
use crate::error::Error;

/// The Mersenne prime `2^61 - 1` used as the modulus of the affine hash family.
///
/// It exceeds every coefficient, and products are reduced in 128-bit arithmetic, so
/// `a * x + b` never wraps for any `u64` key.
pub const MERSENNE_PRIME_61: u64 = (1 << 61) - 1;

/// One affine map `x -> (a * x + b) mod p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AffineCoefficients {
    /// Multiplier, in `[1, p - 1]`.
    pub a: u64,
    /// Offset, in `[0, p - 1]`.
    pub b: u64,
}

impl AffineCoefficients {
    /// Creates a coefficient pair. No range checks are performed here.
    pub const fn new(a: u64, b: u64) -> Self {
        AffineCoefficients { a, b }
    }

    /// Evaluates `(a * key + b) mod prime`.
    #[inline]
    pub fn apply(&self, key: u64, prime: u64) -> u64 {
        let product = u128::from(self.a) * u128::from(key) + u128::from(self.b);
        (product % u128::from(prime)) as u64
    }
}

/// Draws `num_hashes` coefficient pairs for an affine hash family modulo `prime`.
///
/// Each `a` is uniform in `[1, prime - 1]` and each `b` is uniform in `[0, prime - 1]`.
/// `num_hashes == 0` yields an empty vector.
///
/// # Panics
///
/// Panics if `prime < 2`.
///
/// # Examples
///
/// ```
/// # use bloomlab::hash::{generate_coefficients, MERSENNE_PRIME_61};
/// # use rand::SeedableRng;
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let coefficients = generate_coefficients(3, MERSENNE_PRIME_61, &mut rng);
/// assert_eq!(coefficients.len(), 3);
/// assert!(coefficients.iter().all(|c| c.a != 0));
/// ```
pub fn generate_coefficients<R: Rng>(
    num_hashes: usize,
    prime: u64,
    rng: &mut R,
) -> Vec<AffineCoefficients> {
    assert!(prime >= 2, "prime must be at least 2");

    (0..num_hashes)
        .map(|_| {
            let a = rng.random_range(1..prime);
            let b = rng.random_range(0..prime);
            AffineCoefficients { a, b }
        })
        .collect()
}

/// Universal hash family `h_i(x) = ((a_i * x + b_i) mod p) mod m` with `p = 2^61 - 1`.
///
/// Coefficients are fixed when the family is created; every filter built with the
/// affine strategy gets its own freshly drawn family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffineHash {
    coefficients: Vec<AffineCoefficients>,
}

impl AffineHash {
    /// Creates a family of `num_hashes` functions with coefficients drawn from `rng`.
    pub fn random<R: Rng>(num_hashes: usize, rng: &mut R) -> Self {
        AffineHash {
            coefficients: generate_coefficients(num_hashes, MERSENNE_PRIME_61, rng),
        }
    }

    /// Creates a family from explicit coefficient pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if any
    /// `a` is outside `[1, p - 1]` or any `b` is outside `[0, p - 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomlab::hash::{AffineCoefficients, AffineHash, HashFamily};
    /// let family = AffineHash::from_coefficients(vec![AffineCoefficients::new(3, 5)]).unwrap();
    /// assert_eq!(family.compute_indices(7, 10), vec![6]);
    /// ```
    pub fn from_coefficients(coefficients: Vec<AffineCoefficients>) -> Result<Self, Error> {
        for (i, c) in coefficients.iter().enumerate() {
            if c.a == 0 || c.a >= MERSENNE_PRIME_61 {
                return Err(Error::invalid_argument(format!(
                    "coefficient a must be in [1, {}], got {}",
                    MERSENNE_PRIME_61 - 1,
                    c.a
                ))
                .with_context("hash_index", i));
            }
            if c.b >= MERSENNE_PRIME_61 {
                return Err(Error::invalid_argument(format!(
                    "coefficient b must be in [0, {}], got {}",
                    MERSENNE_PRIME_61 - 1,
                    c.b
                ))
                .with_context("hash_index", i));
            }
        }
        Ok(AffineHash { coefficients })
    }

    /// Returns the coefficient pairs, one per hash function.
    pub fn coefficients(&self) -> &[AffineCoefficients] {
        &self.coefficients
    }
}

impl HashFamily for AffineHash {
    fn num_hashes(&self) -> usize {
        self.coefficients.len()
    }

    #[inline]
    fn index(&self, i: usize, key: u64, num_bits: u64) -> u64 {
        self.coefficients[i].apply(key, MERSENNE_PRIME_61) % num_bits
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_known_indices() {
        let family = AffineHash::from_coefficients(vec![AffineCoefficients::new(3, 5)]).unwrap();
        assert_eq!(family.compute_indices(7, 10), vec![6]);
        assert_eq!(family.compute_indices(8, 10), vec![9]);
    }

    #[test]
    fn test_product_does_not_wrap() {
        let c = AffineCoefficients::new(MERSENNE_PRIME_61 - 1, MERSENNE_PRIME_61 - 1);
        // (p - 1) * (p - 1) + (p - 1) = p * (p - 1) ≡ 0 (mod p)
        assert_eq!(c.apply(MERSENNE_PRIME_61 - 1, MERSENNE_PRIME_61), 0);
        // (p - 1) * p + (p - 1) ≡ p - 1 (mod p)
        assert_eq!(
            c.apply(MERSENNE_PRIME_61, MERSENNE_PRIME_61),
            MERSENNE_PRIME_61 - 1
        );
        assert!(c.apply(u64::MAX, MERSENNE_PRIME_61) < MERSENNE_PRIME_61);
    }

    #[test]
    fn test_generate_coefficients_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let coefficients = generate_coefficients(1000, 7, &mut rng);
        assert_eq!(coefficients.len(), 1000);
        for c in coefficients {
            assert!((1..7).contains(&c.a));
            assert!(c.b < 7);
        }
        assert!(generate_coefficients(0, MERSENNE_PRIME_61, &mut rng).is_empty());
    }

    #[test]
    fn test_generate_coefficients_reproducible() {
        let first = generate_coefficients(8, MERSENNE_PRIME_61, &mut StdRng::seed_from_u64(1));
        let second = generate_coefficients(8, MERSENNE_PRIME_61, &mut StdRng::seed_from_u64(1));
        assert_eq!(first, second);
    }

    #[test]
    fn test_indices_in_range() {
        let mut rng = StdRng::seed_from_u64(9001);
        for num_bits in [1, 2, 10, 64, 1000, 100_003, u64::MAX] {
            let family = AffineHash::random(7, &mut rng);
            for key in [0, 1, 7, 12_345, MERSENNE_PRIME_61, u64::MAX - 1, u64::MAX] {
                let indices = family.compute_indices(key, num_bits);
                assert_eq!(indices.len(), 7);
                assert!(indices.iter().all(|&i| i < num_bits));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let family = AffineHash::random(5, &mut StdRng::seed_from_u64(3));
        for key in 0..100 {
            assert_eq!(
                family.compute_indices(key, 997),
                family.compute_indices(key, 997)
            );
        }
    }

    #[test]
    fn test_invalid_coefficients() {
        let err = AffineHash::from_coefficients(vec![AffineCoefficients::new(0, 1)]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidArgument);

        let err = AffineHash::from_coefficients(vec![
            AffineCoefficients::new(1, 1),
            AffineCoefficients::new(2, MERSENNE_PRIME_61),
        ])
        .unwrap_err();
        assert!(err.message().starts_with("coefficient b must be in"));
    }
}
