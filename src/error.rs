//! Error types for building and configuring a [`StaticRTree`](crate::StaticRTree).

use thiserror::Error;

/// Errors reported by tree construction and configuration.
///
/// Querying never fails: an unbuilt or empty tree answers "not found".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RTreeError {
    /// The tree was already bulk-loaded. Loading permutes the point source in
    /// place, so a built tree cannot be loaded again.
    #[error("tree is static and already holds {len} points, cannot load twice")]
    AlreadyBuilt {
        /// Number of points in the existing tree
        len: usize,
    },

    /// `max_entries` must be at least 2.
    #[error("invalid branching factor {0}, must be at least 2")]
    InvalidBranchingFactor(usize),

    /// The point count does not fit the node arena's 32-bit ids.
    #[error("too many points for one tree: {0}")]
    TooManyPoints(usize),

    /// An interleaved coordinate buffer had an odd number of values.
    #[error("interleaved coordinate buffer has odd length {0}")]
    OddCoordinateCount(usize),
}
