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

//! Bloom filter over integer keys with a pluggable hash family.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! an element is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If a key was inserted, `contains()` will always return `true`
//! - **Possible false positives**: `contains()` may return `true` for keys never inserted
//! - **Fixed size**: the bit count and hash count never change after construction
//! - **Insert only**: bits are set, never cleared
//!
//! # Usage
//!
//! ```rust
//! use bloomlab::bloom::BloomFilterBuilder;
//! use bloomlab::hash::SeedPool;
//!
//! // Universal hashing, coefficients drawn per filter
//! let mut affine = BloomFilterBuilder::with_size(100_000, 7).build_affine().unwrap();
//!
//! // Seeded generators, seeds shared through a pool
//! let mut pool = SeedPool::new();
//! let mut seeded = BloomFilterBuilder::with_size(100_000, 7)
//!     .build_seeded(&mut pool)
//!     .unwrap();
//!
//! for key in 0..1000 {
//!     affine.insert(key);
//!     seeded.insert(key);
//! }
//!
//! assert!(affine.contains(999));
//! assert!(seeded.contains(999));
//! println!("Bits used: {}", affine.bits_used());
//! println!("Est. FPP: {:.4}%", affine.estimated_fpp() * 100.0);
//! ```
//!
//! # Implementation Details
//!
//! - Bits packed in `u64` words; the logical size is exactly the requested bit count
//! - Hash positions come from a [`HashFamily`](crate::hash::HashFamily), one index per function
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"
//! - Carter and Wegman (1979). "Universal classes of hash functions"

mod builder;
mod filter;

pub use self::builder::BloomFilterBuilder;
pub use self::builder::MAX_NUM_BITS;
pub use self::builder::MAX_NUM_HASHES;
pub use self::filter::BloomFilter;
pub use self::filter::DynBloomFilter;
