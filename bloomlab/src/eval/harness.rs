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

use crate::bloom::BloomFilterBuilder;
use crate::error::Error;
use crate::hash::HashStrategy;
use crate::hash::SeedPool;

/// Default upper bound (inclusive) of the probe key range.
pub const DEFAULT_UNIVERSE: u64 = 99_999_999_999_999_999;

const DEFAULT_PROBES_PER_ITEM: u64 = 9;
const DEFAULT_TRIALS: usize = 10;

/// Configuration of an [`Evaluator`].
///
/// # Examples
///
/// ```
/// # use bloomlab::eval::EvalConfig;
/// let config = EvalConfig::default()
///     .num_probes(50_000)
///     .trials(5)
///     .rng_seed(42);
/// assert_eq!(config.probes_for(10_000), 50_000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EvalConfig {
    pub(super) num_probes: Option<u64>,
    pub(super) probes_per_item: u64,
    pub(super) universe: u64,
    pub(super) trials: usize,
    pub(super) rng_seed: Option<u64>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            num_probes: None,
            probes_per_item: DEFAULT_PROBES_PER_ITEM,
            universe: DEFAULT_UNIVERSE,
            trials: DEFAULT_TRIALS,
            rng_seed: None,
        }
    }
}

impl EvalConfig {
    /// Uses a fixed number of probes per measurement, regardless of the inserted count.
    pub fn num_probes(mut self, num_probes: u64) -> Self {
        self.num_probes = Some(num_probes);
        self
    }

    /// Scales the number of probes with the inserted count (default: 9 probes per item).
    ///
    /// Ignored when [`num_probes()`](Self::num_probes) is set.
    pub fn probes_per_item(mut self, probes_per_item: u64) -> Self {
        self.probes_per_item = probes_per_item;
        self.num_probes = None;
        self
    }

    /// Sets the inclusive upper bound of the probe key range (default: [`DEFAULT_UNIVERSE`]).
    pub fn universe(mut self, universe: u64) -> Self {
        self.universe = universe;
        self
    }

    /// Sets how many measurements a sweep aggregates per data point (default: 10).
    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Makes every measurement reproducible: probe keys, affine coefficients and pool seeds are
    /// all derived from this seed.
    pub fn rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = Some(rng_seed);
        self
    }

    /// Returns the number of probes drawn when `num_items` keys were inserted.
    pub fn probes_for(&self, num_items: u64) -> u64 {
        self.num_probes
            .unwrap_or_else(|| num_items.saturating_mul(self.probes_per_item))
    }
}

/// Measures the false positive rate of Bloom filters built with either hash strategy.
///
/// The evaluator owns the [`SeedPool`] shared by all seeded-PRNG filters it builds, so repeated
/// measurements use the same seeded function identities. Affine filters draw fresh coefficients
/// every time.
#[derive(Debug)]
pub struct Evaluator {
    pub(super) config: EvalConfig,
    pub(super) rng: StdRng,
    pub(super) seed_pool: SeedPool,
}

impl Evaluator {
    /// Creates an evaluator with the given configuration.
    pub fn new(config: EvalConfig) -> Self {
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let seed_pool = SeedPool::with_rng_seed(rng.random());
        Evaluator {
            config,
            rng,
            seed_pool,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Returns the seed pool shared by seeded-PRNG filters.
    pub fn seed_pool(&self) -> &SeedPool {
        &self.seed_pool
    }

    /// Takes one sample of the empirical false positive rate.
    ///
    /// Builds a filter with `num_bits` bits and `num_hashes` functions of the given strategy,
    /// inserts the keys `0..num_items`, then draws probe keys uniformly from
    /// `[num_items, universe]` and returns the fraction reported present. The result is always
    /// within `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if:
    /// - `num_bits` or `num_hashes` is zero or above the supported maximum
    /// - `num_items` exceeds the configured universe, leaving no key to probe
    /// - the configuration yields zero probes
    pub fn measure_false_positive_rate(
        &mut self,
        num_hashes: u16,
        num_items: u64,
        num_bits: u64,
        strategy: HashStrategy,
    ) -> Result<f64, Error> {
        let universe = self.config.universe;
        if num_items > universe {
            return Err(Error::invalid_argument("probe range is empty")
                .with_context("num_items", num_items)
                .with_context("universe", universe));
        }
        let num_probes = self.config.probes_for(num_items);
        if num_probes == 0 {
            return Err(Error::invalid_argument("number of probes must be positive")
                .with_context("num_items", num_items));
        }

        let mut filter = BloomFilterBuilder::with_size(num_bits, num_hashes)
            .rng_seed(self.rng.random())
            .build(strategy, &mut self.seed_pool)?;

        for key in 0..num_items {
            filter.insert(key);
        }

        let mut false_positives = 0u64;
        for _ in 0..num_probes {
            let key = self.rng.random_range(num_items..=universe);
            if filter.contains(key) {
                false_positives += 1;
            }
        }

        let rate = false_positives as f64 / num_probes as f64;
        tracing::debug!(
            %strategy,
            num_hashes,
            num_items,
            num_bits,
            num_probes,
            false_positives,
            load_factor = filter.load_factor(),
            rate,
            "measured false positive rate"
        );
        Ok(rate)
    }
}
