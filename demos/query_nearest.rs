//! Find the nearest point to a query.
use strtree::prelude::*;

fn main() {
    let points: Vec<(f64, f64)> = (0..=10).map(|i| (i as f64, i as f64)).collect();

    let mut tree = StaticRTree::new();
    tree.load(points).unwrap();

    if let Some(nearest) = tree.find_nearest(1.0, 3.0) {
        println!("Nearest point: ({}, {}) at squared distance {}", nearest.x, nearest.y, nearest.distance_sq);
    }
}
