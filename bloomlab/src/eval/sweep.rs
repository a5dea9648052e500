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

use super::Evaluator;
use super::median;
use super::optimal_num_hashes;
use super::theoretical_fpp;
use crate::error::Error;
use crate::hash::HashStrategy;

/// How far the sweep reaches on each side of the optimal hash count.
const SWEEP_RADIUS: u16 = 5;

/// One data point of a hash count sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    /// Number of hash functions (k)
    pub num_hashes: u16,
    /// Median measured rate of the affine-modular strategy
    pub affine_modular: f64,
    /// Median measured rate of the seeded-PRNG strategy
    pub seeded_prng: f64,
    /// Closed-form rate `(1 - e^(-k*n/m))^k`
    pub theoretical: f64,
}

impl SweepPoint {
    /// Returns the median measured rate of `strategy`.
    pub fn measured(&self, strategy: HashStrategy) -> f64 {
        match strategy {
            HashStrategy::AffineModular => self.affine_modular,
            HashStrategy::SeededPrng => self.seeded_prng,
        }
    }
}

impl Evaluator {
    /// Compares both strategies against theory over a range of hash counts.
    ///
    /// With `num_bits = num_items * bits_per_item` and `k_opt = round(bits_per_item * ln 2)`,
    /// every `k` in `[k_opt - 5, k_opt + 5)` that is positive gets one [`SweepPoint`]: the
    /// median of the configured number of trials per strategy, next to the theoretical rate.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if the
    /// configuration has zero trials, if `num_items * bits_per_item` is zero or overflows, or if
    /// any measurement fails.
    pub fn sweep(&mut self, num_items: u64, bits_per_item: u64) -> Result<Vec<SweepPoint>, Error> {
        let trials = self.config.trials;
        if trials == 0 {
            return Err(Error::invalid_argument("number of trials must be positive"));
        }
        let num_bits = num_items.checked_mul(bits_per_item).ok_or_else(|| {
            Error::invalid_argument("table size overflows")
                .with_context("num_items", num_items)
                .with_context("bits_per_item", bits_per_item)
        })?;

        let optimal = optimal_num_hashes(bits_per_item as f64);
        let first = optimal.saturating_sub(SWEEP_RADIUS).max(1);
        let last = optimal.saturating_add(SWEEP_RADIUS);
        tracing::debug!(num_items, num_bits, optimal, first, last, trials, "starting sweep");

        let mut points = Vec::with_capacity(usize::from(last - first));
        for num_hashes in first..last {
            let mut medians = [0.0; 2];
            for (slot, strategy) in medians.iter_mut().zip(HashStrategy::ALL) {
                let samples = (0..trials)
                    .map(|_| {
                        self.measure_false_positive_rate(num_hashes, num_items, num_bits, strategy)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                // trials > 0, so the median exists
                *slot = median(&samples).unwrap_or_default();
            }

            let point = SweepPoint {
                num_hashes,
                affine_modular: medians[0],
                seeded_prng: medians[1],
                theoretical: theoretical_fpp(num_hashes, num_items, num_bits),
            };
            tracing::info!(
                num_hashes,
                affine_modular = point.affine_modular,
                seeded_prng = point.seeded_prng,
                theoretical = point.theoretical,
                "sweep point"
            );
            points.push(point);
        }
        Ok(points)
    }
}
