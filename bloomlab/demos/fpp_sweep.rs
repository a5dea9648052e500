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

use bloomlab::bloom::BloomFilterBuilder;
use bloomlab::eval::EvalConfig;
use bloomlab::eval::Evaluator;
use bloomlab::eval::index_distribution;
use bloomlab::eval::optimal_num_hashes;
use bloomlab::hash::AffineHash;
use bloomlab::hash::SeedPool;
use bloomlab::hash::SeededHash;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), bloomlab::error::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let num_items = 10_000;
    let bits_per_item = 10;
    let num_bits = num_items * bits_per_item;
    let optimal = optimal_num_hashes(bits_per_item as f64);

    // Single hash function uniformity: hash `num_bits` keys into `num_items` slots
    let affine = AffineHash::random(1, &mut rand::rng());
    let seeded = SeededHash::from_pool(&mut SeedPool::new(), 1);
    let affine = index_distribution(&affine, num_bits, num_items)?;
    let seeded = index_distribution(&seeded, num_bits, num_items)?;
    println!("Hashing {num_bits} keys into {num_items} slots (expected load {bits_per_item})");
    println!("  affine-modular: min {} max {}", affine.min_load(), affine.max_load());
    println!("  seeded-prng:    min {} max {}", seeded.min_load(), seeded.max_load());

    // A single filter at the optimal hash count
    let mut filter = BloomFilterBuilder::with_size(num_bits, optimal).build_affine()?;
    for key in 0..num_items {
        filter.insert(key);
    }
    println!(
        "\nAffine filter with k={optimal}: {} of {} bits set, est. FPP {:.4}%",
        filter.bits_used(),
        filter.capacity(),
        filter.estimated_fpp() * 100.0
    );

    // Median false positive rate per hash count
    println!("\nFalse positive rate, c={bits_per_item}, optimal k={optimal}");
    println!("{:>4} {:>12} {:>12} {:>12}", "k", "affine", "seeded", "theoretical");
    let mut evaluator = Evaluator::new(EvalConfig::default());
    for point in evaluator.sweep(num_items, bits_per_item)? {
        println!(
            "{:>4} {:>12.6} {:>12.6} {:>12.6}",
            point.num_hashes, point.affine_modular, point.seeded_prng, point.theoretical
        );
    }

    Ok(())
}
