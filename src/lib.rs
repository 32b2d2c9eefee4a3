//! # strtree - static STR-packed R-tree for nearest-point queries
//!
//! A spatial index over a caller-owned array of 2D points. The tree is
//! bulk-loaded once with the Sort-Tile-Recursive algorithm and then answers
//! "which point is closest to (x, y)" with a branch-and-bound search.
//!
//! ## Features
//!
//! - **In-place**: the index never copies points; loading permutes the caller's
//!   container through [`PointSource::swap`], so payloads travel with points
//! - **Balanced packing**: STR tiling gives full, low-overlap nodes
//! - **Allocation-free queries**: search state is pooled and reused
//! - **Build once**: a second load is reported as [`RTreeError::AlreadyBuilt`]
//!
//! ## Quick Start
//!
//! ```rust
//! use strtree::prelude::*;
//!
//! let mut points = vec![(0.0, 0.0), (4.0, 1.0), (2.0, 7.0), (9.0, 9.0)];
//!
//! let mut tree = StaticRTree::new();
//! tree.load(&mut points).unwrap();
//!
//! let nearest = tree.find_nearest(3.0, 2.0).unwrap();
//! println!("nearest point ({}, {}) at squared distance {}", nearest.x, nearest.y, nearest.distance_sq);
//! assert_eq!((nearest.x, nearest.y), (4.0, 1.0));
//! ```
//!
//! ## How It Works
//!
//! Loading splits the points into vertical slices by X, each slice into
//! buckets by Y, and recurses into every bucket until it holds at most
//! `max_entries` points. Splitting uses selection at bucket boundaries, not a
//! full sort. Node boxes are then computed bottom-up.
//!
//! A query pops candidates from a min-heap ordered by the smallest possible
//! squared distance to each node's box. The first point popped is the answer;
//! nodes that cannot beat the best farthest-corner distance seen are never
//! queued.

pub mod bbox;
mod builder;
pub mod error;
#[cfg(feature = "geojson")]
mod geojson;
pub mod node;
mod partition;
pub mod point_source;
pub mod pool;
pub mod prelude;
mod search;
pub mod static_rtree;


pub use bbox::BBox;
pub use error::RTreeError;
pub use node::NodeRef;
pub use point_source::{FlatPoints, PointSource};
pub use pool::SearchPools;
pub use search::Nearest;
pub use static_rtree::{Options, StaticRTree, DEFAULT_MAX_ENTRIES};
