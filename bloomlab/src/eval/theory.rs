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

use std::f64::consts::LN_2;

/// Returns the classical false positive probability `(1 - e^(-k*n/m))^k` of a Bloom filter
/// with `num_bits` bits and `num_hashes` hash functions after `num_items` distinct insertions.
///
/// # Examples
///
/// ```
/// # use bloomlab::eval::theoretical_fpp;
/// let p = theoretical_fpp(7, 10_000, 100_000);
/// assert!((p - 0.0082).abs() < 0.0001);
/// ```
pub fn theoretical_fpp(num_hashes: u16, num_items: u64, num_bits: u64) -> f64 {
    let k = f64::from(num_hashes);
    let load = k * num_items as f64 / num_bits as f64;
    (1.0 - (-load).exp()).powf(k)
}

/// Returns the hash count `round(c * ln 2)` that minimizes the false positive rate for
/// `bits_per_item = m / n`, never less than 1.
///
/// # Examples
///
/// ```
/// # use bloomlab::eval::optimal_num_hashes;
/// assert_eq!(optimal_num_hashes(10.0), 7);
/// assert_eq!(optimal_num_hashes(0.5), 1);
/// ```
pub fn optimal_num_hashes(bits_per_item: f64) -> u16 {
    (bits_per_item * LN_2)
        .round()
        .clamp(1.0, f64::from(u16::MAX)) as u16
}

/// Returns the median of `values`, averaging the two middle values for even lengths.
///
/// Returns `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theoretical_fpp() {
        assert_eq!(theoretical_fpp(3, 0, 100), 0.0);
        let p = theoretical_fpp(7, 10_000, 100_000);
        assert!(p > 0.0081 && p < 0.0083, "got {p}");
        // one hash function: 1 - e^(-n/m)
        let p = theoretical_fpp(1, 1_000, 1_000);
        assert!((p - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_optimal_num_hashes() {
        assert_eq!(optimal_num_hashes(10.0), 7);
        assert_eq!(optimal_num_hashes(16.0), 11);
        assert_eq!(optimal_num_hashes(1.0), 1);
        assert_eq!(optimal_num_hashes(0.0), 1);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[0.3]), Some(0.3));
        assert_eq!(median(&[0.5, 0.1, 0.3]), Some(0.3));
        assert_eq!(median(&[0.4, 0.1, 0.2, 0.3]), Some(0.25));
    }
}
