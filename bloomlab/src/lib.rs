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

//! # Bloom filter hash family laboratory
//!
//! Bloom filters over integer keys with two interchangeable ways of deriving the k bit
//! positions of a key, together with the tooling to measure how each one performs against
//! the closed-form false positive rate.
//!
//! This library is divided into modules that constitute distinct groups of functionality:
//!
//! - [`hash`]: the [`HashFamily`](hash::HashFamily) capability with the affine-modular and
//!   seeded-PRNG strategies, plus the randomness they are parameterized by
//! - [`bloom`]: the fixed-size, insert-only Bloom filter
//! - [`eval`]: empirical false positive measurement, theory helpers and hash count sweeps

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bloom;
pub mod error;
pub mod eval;
pub mod hash;
