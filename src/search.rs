//! Branch-and-bound nearest-neighbor search.
//!
//! Candidates are popped from a min-heap keyed by their lower-bound squared
//! distance. The first single-point entry popped is a global minimum: every
//! later candidate has a lower bound at least as large as that point's exact
//! distance. Children whose lower bound exceeds the smallest upper bound seen
//! so far can never hold the answer and are not queued.

use crate::node::{Node, NodeId, ROOT};
use crate::point_source::PointSource;
use crate::pool::{SearchItem, SearchPools, SearchQueue};
use crate::static_rtree::StaticRTree;
use std::cmp::Reverse;
use std::sync::PoisonError;

/// Closest indexed point to a query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest {
    /// Position of the point in the (permuted) point source
    pub index: usize,
    /// X coordinate of the point
    pub x: f64,
    /// Y coordinate of the point
    pub y: f64,
    /// Squared Euclidean distance to the query point
    pub distance_sq: f64,
}

impl<P: PointSource> StaticRTree<P> {
    /// Finds the indexed point closest to `(x, y)`.
    ///
    /// Returns `None` only when the tree is unbuilt or empty. Among points at
    /// the same distance the result is fixed for a given tree, so repeating a
    /// query always returns the same point.
    ///
    /// Uses the tree's own pools under a mutex; see
    /// [`find_nearest_with`](Self::find_nearest_with) for lock-free queries.
    ///
    /// # Example
    /// ```
    /// use strtree::StaticRTree;
    ///
    /// let points: Vec<(f64, f64)> = (0..=10).map(|i| (i as f64, i as f64)).collect();
    /// let mut tree = StaticRTree::new();
    /// tree.load(points).unwrap();
    ///
    /// let nearest = tree.find_nearest(1.0, 3.0).unwrap();
    /// assert_eq!((nearest.x, nearest.y), (2.0, 2.0));
    /// assert_eq!(nearest.distance_sq, 2.0);
    /// ```
    pub fn find_nearest(&self, x: f64, y: f64) -> Option<Nearest> {
        if !self.is_built() {
            return None;
        }
        let mut pools = self.pools.lock().unwrap_or_else(PoisonError::into_inner);
        self.find_nearest_with(x, y, &mut pools)
    }

    /// Same as [`find_nearest`](Self::find_nearest) with caller-provided pools.
    ///
    /// Pools from [`search_pools`](Self::search_pools) are sized for this tree;
    /// any other pool set works too and grows as needed.
    pub fn find_nearest_with(&self, x: f64, y: f64, pools: &mut SearchPools) -> Option<Nearest> {
        if !self.is_built() {
            return None;
        }
        let (id, distance_sq) = nearest_entry(&self.nodes, pools, x, y)?;
        let node = &self.nodes[id as usize];
        Some(Nearest {
            index: node.start,
            x: node.bbox.min_x,
            y: node.bbox.min_y,
            distance_sq,
        })
    }

    /// Coordinates of the nearest point and a found flag; `(0.0, 0.0, false)`
    /// on an unbuilt or empty tree.
    pub fn find_nearest_point(&self, x: f64, y: f64) -> (f64, f64, bool) {
        self.find_nearest(x, y)
            .map_or((0.0, 0.0, false), |nearest| (nearest.x, nearest.y, true))
    }
}

/// Runs the search over a non-empty arena. Returns the winning single-point
/// entry and its squared distance.
fn nearest_entry(nodes: &[Node], pools: &mut SearchPools, x: f64, y: f64) -> Option<(NodeId, f64)> {
    let root = nodes.first()?;
    let mut queue = pools.take_queue();

    let (lower, upper) = root.bbox.distance_bounds(x, y);
    let mut upper_bound = upper;
    push(&mut queue, pools, ROOT, lower);

    let mut best: Option<SearchItem> = None;
    while let Some(Reverse((_, _, slot))) = queue.pop() {
        let item = pools.item(slot);
        pools.give_back_item(slot);

        if best.is_some_and(|found| item.distance > found.distance) {
            break;
        }

        let node = &nodes[item.node as usize];
        if node.is_point() {
            // exact distance: lower and upper bounds coincide for a point
            if best.is_none() {
                best = Some(item);
            }
            continue;
        }

        for child in node.children() {
            let (lower, upper) = nodes[child as usize].bbox.distance_bounds(x, y);
            if lower <= upper_bound {
                push(&mut queue, pools, child, lower);
            }
            upper_bound = upper_bound.min(upper);
        }
    }

    while let Some(Reverse((_, _, slot))) = queue.pop() {
        pools.give_back_item(slot);
    }
    pools.give_back_queue(queue);

    best.map(|item| (item.node, item.distance))
}

#[inline]
fn push(queue: &mut SearchQueue, pools: &mut SearchPools, node: NodeId, distance: f64) {
    let slot = pools.take_item();
    let item = pools.item_mut(slot);
    item.node = node;
    item.distance = distance;
    queue.push(Reverse((distance.to_bits(), node, slot)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal(len: usize) -> StaticRTree<Vec<(f64, f64)>> {
        let points: Vec<(f64, f64)> = (0..len).map(|i| (i as f64, i as f64)).collect();
        let mut tree = StaticRTree::new();
        tree.load(points).unwrap();
        tree
    }

    #[test]
    fn test_collinear_scenario() {
        let tree = diagonal(11);
        let nearest = tree.find_nearest(1.0, 3.0).unwrap();
        assert_eq!((nearest.x, nearest.y), (2.0, 2.0));
        assert_eq!(nearest.distance_sq, 2.0);
        assert_eq!(tree.points().unwrap()[nearest.index], (2.0, 2.0));
    }

    #[test]
    fn test_single_point() {
        let mut tree = StaticRTree::new();
        tree.load(vec![(5.0, 5.0)]).unwrap();
        assert_eq!(tree.find_nearest_point(0.0, 0.0), (5.0, 5.0, true));
        assert_eq!(tree.find_nearest(0.0, 0.0).unwrap().distance_sq, 50.0);
    }

    #[test]
    fn test_empty_tree_not_found() {
        let mut tree = StaticRTree::new();
        assert_eq!(tree.find_nearest(1.0, 1.0), None);
        tree.load(Vec::<(f64, f64)>::new()).unwrap();
        assert_eq!(tree.find_nearest(1.0, 1.0), None);
        assert_eq!(tree.find_nearest_point(-3.0, 8.0), (0.0, 0.0, false));
    }

    #[test]
    fn test_exact_hit_has_zero_distance() {
        let tree = diagonal(200);
        let nearest = tree.find_nearest(137.0, 137.0).unwrap();
        assert_eq!((nearest.x, nearest.y, nearest.distance_sq), (137.0, 137.0, 0.0));
    }

    #[test]
    fn test_pools_balanced_after_queries() {
        let tree = diagonal(1000);
        let mut pools = tree.search_pools();
        for i in 0..500 {
            let q = i as f64 * 2.3 - 100.0;
            let _ = tree.find_nearest_with(q, -q, &mut pools);
            assert_eq!(pools.outstanding(), 0, "query {i} leaked pool entries");
        }
        let slots = pools.item_slots();
        for i in 0..500 {
            let q = i as f64 * 2.3 - 100.0;
            let _ = tree.find_nearest_with(q, -q, &mut pools);
        }
        assert_eq!(pools.item_slots(), slots, "warm pools must not keep growing");
        assert_eq!(pools.idle_queues(), 2);
    }

    #[test]
    fn test_internal_pools_balanced() {
        let tree = diagonal(300);
        for i in 0..100 {
            let _ = tree.find_nearest(i as f64 * 0.7, 10.0);
        }
        assert_eq!(tree.pools.lock().unwrap().outstanding(), 0);
    }
}
