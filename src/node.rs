//! Node arena of a built tree.
//!
//! Nodes live in one flat vector. The root is node 0 and the children of a
//! node occupy a contiguous id range allocated after their parent, so every
//! child id is greater than its parent's id.

use crate::bbox::BBox;
use std::ops::Range;

/// Index of a node in the arena
pub(crate) type NodeId = u32;

pub(crate) const ROOT: NodeId = 0;

#[derive(Clone, Debug)]
pub(crate) struct Node {
    /// Aggregate box, fixed once the bottom-up pass has run
    pub(crate) bbox: BBox,
    /// Points subtended by this node: `start..end` in the point source
    pub(crate) start: usize,
    pub(crate) end: usize,
    /// 0 for a single-point entry, 1 for a leaf bucket, increasing toward the root
    pub(crate) height: usize,
    pub(crate) first_child: NodeId,
    pub(crate) child_count: u32,
}

impl Node {
    /// Node over `start..end` whose box and children are filled in later
    pub(crate) fn pending(start: usize, end: usize, height: usize) -> Self {
        Self {
            bbox: BBox::from_point(0.0, 0.0),
            start,
            end,
            height,
            first_child: 0,
            child_count: 0,
        }
    }

    /// Single-point entry at `index`
    pub(crate) fn point(index: usize, x: f64, y: f64) -> Self {
        Self {
            bbox: BBox::from_point(x, y),
            start: index,
            end: index + 1,
            height: 0,
            first_child: 0,
            child_count: 0,
        }
    }

    #[inline]
    pub(crate) fn is_point(&self) -> bool {
        self.height == 0
    }

    #[inline]
    pub(crate) fn children(&self) -> Range<NodeId> {
        self.first_child..self.first_child + self.child_count
    }
}

/// Read-only view of one node of a built tree.
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    nodes: &'a [Node],
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(nodes: &'a [Node], id: NodeId) -> Self {
        Self { nodes, id }
    }

    #[inline]
    fn node(&self) -> &'a Node {
        &self.nodes[self.id as usize]
    }

    /// Bounding box of every point below this node
    pub fn bbox(&self) -> BBox {
        self.node().bbox
    }

    /// 0 for a single-point entry, 1 for a leaf bucket, increasing toward the root
    pub fn height(&self) -> usize {
        self.node().height
    }

    /// Range of point source indices this node covers
    pub fn range(&self) -> Range<usize> {
        let node = self.node();
        node.start..node.end
    }

    /// Whether this node is a single-point entry
    pub fn is_point(&self) -> bool {
        self.node().is_point()
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.node().child_count as usize
    }

    /// Direct children in order
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a>> + use<'a> {
        let nodes = self.nodes;
        self.node().children().map(move |id| NodeRef { nodes, id })
    }
}
