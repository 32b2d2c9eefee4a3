//! Skip the root X pass for input already ordered by X.
use strtree::prelude::*;

fn main() {
    let mut points = FlatPoints::with_capacity(10_000);
    for i in 0..10_000 {
        let x = (i / 100) as f64;
        let y = ((i * 37) % 100) as f64;
        points.push(x, y);
    }

    let mut tree = StaticRTree::new();
    tree.load_sorted(points).unwrap();

    println!("height {}, {} nodes, bounds {:?}", tree.height(), tree.node_count(), tree.bounds());
    let (x, y, found) = tree.find_nearest_point(42.3, 17.8);
    println!("nearest to (42.3, 17.8): ({x}, {y}), found = {found}");
}
