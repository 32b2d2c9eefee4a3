//! Performance profiling example for find_nearest
//!
//! Designed to be used with low-level profilers like `samply`:
//!
//! ```bash
//! samply record cargo run --release --example perf_nearest
//! ```

use strtree::prelude::*;
use std::time::Instant;

fn main() {
    println!("Building large spatial index...");
    let mut points = FlatPoints::with_capacity(1_000_000);

    let mut rng = 12345u64; // Simple LCG random number generator
    for _ in 0..1_000_000 {
        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let x = ((rng >> 32) as f64 / u32::MAX as f64) * 1000.0;

        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let y = ((rng >> 32) as f64 / u32::MAX as f64) * 1000.0;

        points.push(x, y);
    }

    let build_start = Instant::now();
    let mut tree = StaticRTree::new();
    tree.load(points).unwrap();
    let build_duration = build_start.elapsed();

    let mut pools = tree.search_pools();
    let query_start = Instant::now();
    let mut total = 0.0;

    for _ in 0..1_000_000 {
        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let x = ((rng >> 32) as f64 / u32::MAX as f64) * 1000.0;

        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let y = ((rng >> 32) as f64 / u32::MAX as f64) * 1000.0;

        if let Some(nearest) = tree.find_nearest_with(x, y, &mut pools) {
            total += nearest.distance_sq.sqrt();
        }
    }

    let query_duration = query_start.elapsed();

    println!("Profile Summary:");
    println!("  Building:  {:.2}ms", build_duration.as_secs_f64() * 1000.0);
    println!(
        "  Querying:  {:.2}ms ({:.3}µs per query)",
        query_duration.as_secs_f64() * 1000.0,
        query_duration.as_secs_f64() * 1_000_000.0 / 1_000_000.0
    );
    println!("  Mean distance: {:.4}", total / 1_000_000.0);
}
