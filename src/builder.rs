//! Sort-Tile-Recursive bulk loading.
//!
//! A node over `N` points at height `h` is cut into `M' = ceil(N / M^(h-1))`
//! tiles: first X-slices of `N1 = ceil(sqrt(M')) * N2` points, then each slice
//! into Y-buckets of `N2 = ceil(N / M')` points. Every bucket becomes a child
//! at height `h - 1` and is tiled again until it holds at most `M` points, at
//! which point it gets one single-point entry per point. Boxes are aggregated
//! in a single bottom-up pass once the whole arena exists.
//!
//! Sibling subtrees cover disjoint index ranges and only swap inside their own
//! range, so the order in which siblings are built does not matter.

use crate::bbox::BBox;
use crate::error::RTreeError;
use crate::node::{Node, NodeId, ROOT};
use crate::partition::{partition_buckets, Axis};
use crate::point_source::PointSource;
use tracing::debug;

/// Builds the node arena for `points`, permuting them in place.
///
/// `x_ordered` tells the loader the whole range is already bucketed along X,
/// which skips the root's X pass. It is trusted, not verified.
///
/// Fails with [`RTreeError::TooManyPoints`] when the arena outgrows 32-bit
/// node ids; the source is left partially permuted.
pub(crate) fn bulk_load<P: PointSource + ?Sized>(
    points: &mut P,
    max_entries: usize,
    x_ordered: bool,
) -> Result<Vec<Node>, RTreeError> {
    let len = points.len();
    debug_assert!(len > 0, "bulk load needs at least one point");
    debug_assert!(max_entries >= 2, "branching factor below 2");

    let mut loader = Loader {
        points,
        len,
        max_entries,
        // a full STR tree has roughly len * M / (M - 1) nodes
        nodes: Vec::with_capacity(len + len / (max_entries - 1) + 1),
        stack: Vec::new(),
    };
    loader.nodes.push(Node::pending(0, len, root_height(len, max_entries)));
    loader.build_downwards(ROOT, x_ordered)?;

    let mut nodes = loader.nodes;
    compute_bboxes_upwards(&mut nodes);

    debug!(
        points = len,
        height = nodes[ROOT as usize].height,
        nodes = nodes.len(),
        x_pass_skipped = x_ordered,
        "bulk load complete"
    );
    Ok(nodes)
}

struct Loader<'a, P: PointSource + ?Sized> {
    points: &'a mut P,
    len: usize,
    max_entries: usize,
    nodes: Vec<Node>,
    /// partition scratch, reused by every pass
    stack: Vec<(usize, usize)>,
}

impl<P: PointSource + ?Sized> Loader<'_, P> {
    fn build_downwards(&mut self, id: NodeId, x_ordered: bool) -> Result<(), RTreeError> {
        let Node { start, end, height, .. } = self.nodes[id as usize];
        let count = end - start;
        if count <= self.max_entries {
            return self.set_leaf_bucket(id);
        }

        let tiles = count.div_ceil(self.max_entries.saturating_pow(exponent(height - 1)));
        let bucket = count.div_ceil(tiles);
        let slice = bucket * ceil_sqrt(tiles);

        if !x_ordered {
            partition_buckets(&mut *self.points, Axis::X, start, end, slice, &mut self.stack);
        }

        let first_child = self.nodes.len();
        for i in (0..count).step_by(slice) {
            let slice_end = (i + slice).min(count);
            partition_buckets(&mut *self.points, Axis::Y, start + i, start + slice_end, bucket, &mut self.stack);
            for j in (i..slice_end).step_by(bucket) {
                let bucket_end = (j + bucket).min(slice_end);
                self.nodes.push(Node::pending(start + j, start + bucket_end, height - 1));
            }
        }
        let last_child = self.nodes.len();
        let (first, last) = self.link_children(id, first_child, last_child)?;

        for child in first..last {
            self.build_downwards(child, false)?;
        }
        Ok(())
    }

    /// Finalizes `id` as a leaf bucket holding one entry per point.
    fn set_leaf_bucket(&mut self, id: NodeId) -> Result<(), RTreeError> {
        let (start, end) = {
            let node = &mut self.nodes[id as usize];
            node.height = 1;
            (node.start, node.end)
        };
        let first_child = self.nodes.len();
        for index in start..end {
            let (x, y) = self.points.point_at(index);
            debug_assert!(x.is_finite() && y.is_finite(), "non-finite point {index}: ({x}, {y})");
            self.nodes.push(Node::point(index, x, y));
        }
        let last_child = self.nodes.len();
        self.link_children(id, first_child, last_child)?;
        Ok(())
    }

    /// Records the child id range of `id` and returns it as node ids.
    fn link_children(
        &mut self,
        id: NodeId,
        first_child: usize,
        last_child: usize,
    ) -> Result<(NodeId, NodeId), RTreeError> {
        // the range end must fit too, it bounds `Node::children`
        let first = node_id(first_child, self.len)?;
        let last = node_id(last_child, self.len)?;
        let node = &mut self.nodes[id as usize];
        node.first_child = first;
        node.child_count = last - first;
        Ok((first, last))
    }
}

#[inline]
fn node_id(index: usize, len: usize) -> Result<NodeId, RTreeError> {
    NodeId::try_from(index).map_err(|_| RTreeError::TooManyPoints(len))
}

/// Sets every non-point node's box to the union of its children's boxes.
///
/// Children always have larger ids than their parent, so one reverse sweep
/// visits every child before its parent.
fn compute_bboxes_upwards(nodes: &mut [Node]) {
    for id in (0..nodes.len()).rev() {
        if nodes[id].is_point() {
            continue;
        }
        let mut children = nodes[id].children().map(|child| nodes[child as usize].bbox);
        if let Some(first) = children.next() {
            let bbox = children.fold(first, BBox::extend);
            nodes[id].bbox = bbox;
        }
    }
}

/// Smallest `h >= 1` with `max_entries^h >= len`
fn root_height(len: usize, max_entries: usize) -> usize {
    let mut height = 1;
    let mut capacity = max_entries;
    while capacity < len {
        capacity = capacity.saturating_mul(max_entries);
        height += 1;
    }
    height
}

/// `ceil(sqrt(value))` without trusting float rounding at perfect squares
fn ceil_sqrt(value: usize) -> usize {
    let mut root = (value as f64).sqrt() as usize;
    while root * root < value {
        root += 1;
    }
    while root > 0 && (root - 1) * (root - 1) >= value {
        root -= 1;
    }
    root
}

#[inline]
fn exponent(height: usize) -> u32 {
    u32::try_from(height).unwrap_or(u32::MAX)
}
