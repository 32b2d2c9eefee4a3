//! Axis-aligned bounding boxes and point distance bounds.

/// Axis-aligned rectangle: `min_x`, `min_y`, `max_x`, `max_y`.
///
/// A point is stored as a degenerate box with equal corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    /// Left edge
    pub min_x: f64,
    /// Bottom edge
    pub min_y: f64,
    /// Right edge
    pub max_x: f64,
    /// Top edge
    pub max_y: f64,
}

impl BBox {
    /// Creates a box from its corners.
    ///
    /// Corners must be finite with `min_x <= max_x` and `min_y <= max_y`.
    #[inline]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        debug_assert!(
            min_x <= max_x && min_y <= max_y,
            "inverted box ({min_x}, {min_y}, {max_x}, {max_y})"
        );
        Self { min_x, min_y, max_x, max_y }
    }

    /// Degenerate box covering a single point.
    #[inline]
    pub fn from_point(x: f64, y: f64) -> Self {
        Self { min_x: x, min_y: y, max_x: x, max_y: y }
    }

    /// Smallest box containing both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn extend(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Squared-distance bounds from `(x, y)` to any point inside the box.
    ///
    /// Returns `(lower, upper)`. `lower` is the squared distance to the closest
    /// point of the box (0 inside or on the boundary), `upper` the squared
    /// distance to the farthest corner. Both are equal for a degenerate box.
    #[inline]
    pub fn distance_bounds(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = axis_distance(x, self.min_x, self.max_x);
        let dy = axis_distance(y, self.min_y, self.max_y);
        let fx = (x - self.min_x).abs().max((x - self.max_x).abs());
        let fy = (y - self.min_y).abs().max((y - self.max_y).abs());
        (dx * dx + dy * dy, fx * fx + fy * fy)
    }

    /// Whether `(x, y)` lies inside or on the boundary.
    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Whether both corners coincide.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.min_x == self.max_x && self.min_y == self.max_y
    }

    /// Extent along X
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along Y
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Distance from `coordinate` to the interval `[min, max]`
#[inline]
fn axis_distance(coordinate: f64, min: f64, max: f64) -> f64 {
    if coordinate < min {
        min - coordinate
    } else if coordinate > max {
        coordinate - max
    } else {
        0.0
    }
}
