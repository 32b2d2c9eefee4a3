//! Dump node boxes as GeoJSON, e.g. to inspect the packing in geojson.io.
use strtree::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let points: Vec<(f64, f64)> = (0..200)
        .map(|i| {
            let t = i as f64 * 0.1;
            (t.cos() * t, t.sin() * t)
        })
        .collect();

    let mut tree = StaticRTree::with_options(Options::new(6)?)?;
    tree.load(points)?;

    println!("{}", serde_json::to_string_pretty(&tree.to_geojson())?);
    Ok(())
}
