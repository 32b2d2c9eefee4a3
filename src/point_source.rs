//! Caller-owned point containers.
//!
//! The tree never copies coordinates out of the container. Bulk loading only
//! reads coordinates by index and permutes the container with [`PointSource::swap`],
//! so any payload the caller keeps alongside each point must move with it.

use crate::error::RTreeError;

/// Indexable, swappable, fixed-length collection of 2D points.
///
/// Coordinates must be finite and `point_at` must accept every index below
/// `len`. These preconditions are only checked in debug builds.
pub trait PointSource {
    /// Number of points
    fn len(&self) -> usize;

    /// Coordinates of the point at `index` (0-based).
    fn point_at(&self, index: usize) -> (f64, f64);

    /// Exchanges the points at `i` and `j`, together with any payload the
    /// implementation carries. `point_at` must reflect the swap immediately.
    fn swap(&mut self, i: usize, j: usize);

    /// Whether the source holds no points
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: PointSource + ?Sized> PointSource for &mut T {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn point_at(&self, index: usize) -> (f64, f64) {
        (**self).point_at(index)
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        (**self).swap(i, j);
    }
}

impl PointSource for [(f64, f64)] {
    #[inline]
    fn len(&self) -> usize {
        <[_]>::len(self)
    }

    #[inline]
    fn point_at(&self, index: usize) -> (f64, f64) {
        self[index]
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        <[_]>::swap(self, i, j);
    }
}

impl PointSource for [[f64; 2]] {
    #[inline]
    fn len(&self) -> usize {
        <[_]>::len(self)
    }

    #[inline]
    fn point_at(&self, index: usize) -> (f64, f64) {
        let [x, y] = self[index];
        (x, y)
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        <[_]>::swap(self, i, j);
    }
}

impl PointSource for Vec<(f64, f64)> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn point_at(&self, index: usize) -> (f64, f64) {
        self[index]
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.as_mut_slice().swap(i, j);
    }
}

impl PointSource for Vec<[f64; 2]> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn point_at(&self, index: usize) -> (f64, f64) {
        let [x, y] = self[index];
        (x, y)
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.as_mut_slice().swap(i, j);
    }
}

/// Points stored as one interleaved buffer: `x0, y0, x1, y1, ...`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatPoints {
    coords: Vec<f64>,
}

impl FlatPoints {
    /// Creates an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        Self { coords: Vec::with_capacity(capacity * 2) }
    }

    /// Wraps an interleaved coordinate buffer.
    ///
    /// # Errors
    /// Returns [`RTreeError::OddCoordinateCount`] when `coords` has odd length.
    pub fn from_interleaved(coords: Vec<f64>) -> Result<Self, RTreeError> {
        if coords.len() % 2 != 0 {
            return Err(RTreeError::OddCoordinateCount(coords.len()));
        }
        Ok(Self { coords })
    }

    /// Appends a point
    pub fn push(&mut self, x: f64, y: f64) {
        self.coords.push(x);
        self.coords.push(y);
    }

    /// The interleaved coordinates in their current order
    pub fn as_slice(&self) -> &[f64] {
        &self.coords
    }

    /// Returns the interleaved buffer
    pub fn into_inner(self) -> Vec<f64> {
        self.coords
    }
}

impl PointSource for FlatPoints {
    #[inline]
    fn len(&self) -> usize {
        self.coords.len() / 2
    }

    #[inline]
    fn point_at(&self, index: usize) -> (f64, f64) {
        (self.coords[2 * index], self.coords[2 * index + 1])
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.coords.swap(2 * i, 2 * j);
        self.coords.swap(2 * i + 1, 2 * j + 1);
    }
}
