//! GeoJSON view of a built tree, for eyeballing the packing in a map viewer.

use crate::node::NodeRef;
use crate::static_rtree::StaticRTree;
use serde_json::{json, Value};

impl<P> StaticRTree<P> {
    /// Returns a `FeatureCollection` with one polygon per node box, in
    /// pre-order from the root. Each feature carries the node's `height` and
    /// its point range as `start` / `end`. Single-point entries are included
    /// as degenerate polygons.
    ///
    /// An unbuilt tree yields an empty collection.
    ///
    /// # Example
    /// ```
    /// use strtree::StaticRTree;
    ///
    /// let mut tree = StaticRTree::new();
    /// tree.load(vec![(0.0, 0.0), (2.0, 1.0)]).unwrap();
    /// let geojson = tree.to_geojson();
    /// assert_eq!(geojson["features"].as_array().unwrap().len(), 3);
    /// ```
    pub fn to_geojson(&self) -> Value {
        let mut features = Vec::with_capacity(self.node_count());
        if let Some(root) = self.root() {
            collect_features(root, &mut features);
        }
        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}

fn collect_features(node: NodeRef<'_>, features: &mut Vec<Value>) {
    let b = node.bbox();
    let range = node.range();
    features.push(json!({
        "type": "Feature",
        "properties": {
            "height": node.height(),
            "start": range.start,
            "end": range.end,
        },
        "geometry": {
            "type": "Polygon",
            "coordinates": [[
                [b.min_x, b.min_y],
                [b.max_x, b.min_y],
                [b.max_x, b.max_y],
                [b.min_x, b.max_y],
                [b.min_x, b.min_y],
            ]],
        },
    }));
    for child in node.children() {
        collect_features(child, features);
    }
}

#[cfg(test)]
mod tests {
    use crate::StaticRTree;

    #[test]
    fn test_unbuilt_tree_exports_empty_collection() {
        let tree: StaticRTree<Vec<(f64, f64)>> = StaticRTree::new();
        let geojson = tree.to_geojson();
        assert_eq!(geojson["type"], "FeatureCollection");
        assert!(geojson["features"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_one_feature_per_node() {
        let points: Vec<(f64, f64)> = (0..40).map(|i| ((i % 8) as f64, (i / 8) as f64)).collect();
        let mut tree = StaticRTree::new();
        tree.load(points).unwrap();

        let geojson = tree.to_geojson();
        let features = geojson["features"].as_array().unwrap();
        assert_eq!(features.len(), tree.node_count());

        let root = &features[0];
        assert_eq!(root["properties"]["height"], 2);
        assert_eq!(root["properties"]["start"], 0);
        assert_eq!(root["properties"]["end"], 40);
        let ring = root["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5, "polygon ring must be closed");
        assert_eq!(ring[0], ring[4]);
        assert_eq!(ring[2][0], 7.0);
        assert_eq!(ring[2][1], 4.0);
    }
}
