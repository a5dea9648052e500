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

//! Empirical evaluation of Bloom filter hash strategies.
//!
//! The [`Evaluator`] builds a filter, inserts the keys `0..n`, then probes keys drawn from a
//! range disjoint from the inserted ones and reports the fraction wrongly reported present.
//! Each call yields one Monte-Carlo sample of the false positive rate, which can be compared
//! against [`theoretical_fpp()`]. [`Evaluator::sweep()`] repeats this over a range of hash
//! counts and aggregates trials with [`median()`].
//!
//! # Usage
//!
//! ```rust
//! use bloomlab::eval::{EvalConfig, Evaluator, theoretical_fpp};
//! use bloomlab::hash::HashStrategy;
//!
//! let mut evaluator = Evaluator::new(EvalConfig::default().rng_seed(9001));
//! let rate = evaluator
//!     .measure_false_positive_rate(7, 1_000, 10_000, HashStrategy::AffineModular)
//!     .unwrap();
//! assert!((0.0..=1.0).contains(&rate));
//! println!("measured {rate:.4}, theory {:.4}", theoretical_fpp(7, 1_000, 10_000));
//! ```

mod distribution;
mod harness;
mod sweep;
mod theory;

pub use self::distribution::IndexDistribution;
pub use self::distribution::index_distribution;
pub use self::harness::DEFAULT_UNIVERSE;
pub use self::harness::EvalConfig;
pub use self::harness::Evaluator;
pub use self::sweep::SweepPoint;
pub use self::theory::median;
pub use self::theory::optimal_num_hashes;
pub use self::theory::theoretical_fpp;
