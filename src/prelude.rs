//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use strtree::prelude::*;
//! ```

pub use crate::{BBox, FlatPoints, Nearest, Options, PointSource, RTreeError, SearchPools, StaticRTree};
