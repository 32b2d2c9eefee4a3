//! Static R-tree over a caller-owned point source.

use crate::bbox::BBox;
use crate::builder::bulk_load;
use crate::error::RTreeError;
use crate::node::{Node, NodeId, NodeRef, ROOT};
use crate::point_source::PointSource;
use crate::pool::SearchPools;
use std::sync::Mutex;

/// Branching factor used by [`Options::default`]
pub const DEFAULT_MAX_ENTRIES: usize = 9;

/// The root plus one entry per point must fit the 32-bit node ids. Larger
/// arenas are caught while building.
const MAX_POINTS: usize = NodeId::MAX as usize - 1;

/// Construction-time configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Maximum children per node and points per leaf bucket (at least 2)
    pub max_entries: usize,
}

impl Options {
    /// Options with the given branching factor.
    ///
    /// # Errors
    /// Returns [`RTreeError::InvalidBranchingFactor`] when `max_entries < 2`.
    pub fn new(max_entries: usize) -> Result<Self, RTreeError> {
        let options = Self { max_entries };
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<(), RTreeError> {
        if self.max_entries < 2 {
            return Err(RTreeError::InvalidBranchingFactor(self.max_entries));
        }
        Ok(())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self { max_entries: DEFAULT_MAX_ENTRIES }
    }
}

/// Immutable STR-packed R-tree answering nearest-point queries.
///
/// The tree takes the point source by value (pass `&mut container` to keep
/// ownership) and permutes it in place once, during [`load`](Self::load).
/// After that nothing is mutated: queries take `&self` and can run from
/// several threads at once.
///
/// # Example
/// ```
/// use strtree::StaticRTree;
///
/// let mut points = vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (5.0, 5.0)];
/// let mut tree = StaticRTree::new();
/// tree.load(&mut points).unwrap();
///
/// let nearest = tree.find_nearest(1.8, 2.4).unwrap();
/// assert_eq!((nearest.x, nearest.y), (2.0, 2.0));
/// ```
#[derive(Debug)]
pub struct StaticRTree<P> {
    options: Options,
    /// Arena with the root at index 0, empty until built
    pub(crate) nodes: Vec<Node>,
    points: Option<P>,
    built: bool,
    pub(crate) pools: Mutex<SearchPools>,
}

impl<P: PointSource> StaticRTree<P> {
    /// Creates an empty tree with the default branching factor
    pub fn new() -> Self {
        Self::from_valid_options(Options::default())
    }

    /// Creates an empty tree with the given options.
    ///
    /// # Errors
    /// Returns [`RTreeError::InvalidBranchingFactor`] when `max_entries < 2`.
    ///
    /// # Example
    /// ```
    /// use strtree::{Options, StaticRTree};
    ///
    /// let tree = StaticRTree::<Vec<(f64, f64)>>::with_options(Options { max_entries: 16 }).unwrap();
    /// assert_eq!(tree.options().max_entries, 16);
    /// assert!(StaticRTree::<Vec<(f64, f64)>>::with_options(Options { max_entries: 1 }).is_err());
    /// ```
    pub fn with_options(options: Options) -> Result<Self, RTreeError> {
        options.validate()?;
        Ok(Self::from_valid_options(options))
    }

    fn from_valid_options(options: Options) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            points: None,
            built: false,
            pools: Mutex::new(SearchPools::default()),
        }
    }

    /// Bulk-loads unsorted points.
    ///
    /// An empty source is accepted and leaves the tree unbuilt.
    ///
    /// # Errors
    /// - [`RTreeError::AlreadyBuilt`] if the tree was loaded before; the
    ///   existing tree is untouched and stays queryable.
    /// - [`RTreeError::TooManyPoints`] if the source or its node arena
    ///   outgrows 32-bit node ids. The source is dropped.
    pub fn load(&mut self, points: P) -> Result<&mut Self, RTreeError> {
        self.load_with(points, false)
    }

    /// Bulk-loads points the caller has already ordered by X, so the root's X
    /// pass can be skipped. The ordering is not verified; an unordered source
    /// still yields a correct but poorly packed tree.
    ///
    /// # Errors
    /// Same as [`load`](Self::load).
    pub fn load_sorted(&mut self, points: P) -> Result<&mut Self, RTreeError> {
        self.load_with(points, true)
    }

    fn load_with(&mut self, mut points: P, x_ordered: bool) -> Result<&mut Self, RTreeError> {
        if self.built {
            return Err(RTreeError::AlreadyBuilt { len: self.len() });
        }
        let len = points.len();
        if len > MAX_POINTS {
            return Err(RTreeError::TooManyPoints(len));
        }
        if len == 0 {
            self.points = Some(points);
            return Ok(self);
        }

        self.nodes = bulk_load(&mut points, self.options.max_entries, x_ordered)?;
        self.pools = Mutex::new(SearchPools::with_capacity(self.pool_capacity()));
        self.points = Some(points);
        self.built = true;
        Ok(self)
    }

    /// A fresh pool set sized for this tree, for use with
    /// [`find_nearest_with`](Self::find_nearest_with).
    pub fn search_pools(&self) -> SearchPools {
        SearchPools::with_capacity(self.pool_capacity())
    }

    /// `height * M` queued items, never more than the arena holds nodes
    fn pool_capacity(&self) -> usize {
        self.height()
            .saturating_mul(self.options.max_entries)
            .min(self.nodes.len())
    }

    /// Number of indexed points
    pub fn len(&self) -> usize {
        self.nodes.first().map_or(0, |root| root.end - root.start)
    }

    /// Whether the tree indexes no points
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether [`load`](Self::load) has built the tree
    pub fn is_built(&self) -> bool {
        self.built
    }
}

impl<P> StaticRTree<P> {
    /// Configuration the tree was created with
    pub fn options(&self) -> Options {
        self.options
    }

    /// Height of the root, 0 when unbuilt
    pub fn height(&self) -> usize {
        self.nodes.first().map_or(0, |root| root.height)
    }

    /// Number of nodes including single-point entries
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bounding box of all points
    pub fn bounds(&self) -> Option<BBox> {
        self.nodes.first().map(|root| root.bbox)
    }

    /// Read-only view of the root node
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.node_ref(ROOT)
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_>> {
        ((id as usize) < self.nodes.len()).then(|| NodeRef::new(&self.nodes, id))
    }

    /// The point source in its current (permuted) order
    pub fn points(&self) -> Option<&P> {
        self.points.as_ref()
    }

    /// Drops the index and returns the point source
    pub fn into_points(self) -> Option<P> {
        self.points
    }
}

impl<P: PointSource> Default for StaticRTree<P> {
    fn default() -> Self {
        Self::new()
    }
}
