//! In-place bucket partitioning of point index ranges.
//!
//! Buckets are produced by repeated selection at bucket boundaries rather than
//! a full sort: inside a bucket the order is unspecified, across buckets every
//! coordinate of an earlier bucket is `<=` every coordinate of a later one.

use crate::point_source::PointSource;
use std::cmp::Ordering;

/// Coordinate a partition pass orders by
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn coordinate<P: PointSource + ?Sized>(self, points: &P, index: usize) -> f64 {
        let (x, y) = points.point_at(index);
        match self {
            Self::X => x,
            Self::Y => y,
        }
    }
}

/// Rearranges `[start, end)` into consecutive buckets of `bucket_size` points
/// (the last one possibly shorter) ordered along `axis`.
///
/// `stack` is scratch space; it is cleared on entry and reused across calls.
pub(crate) fn partition_buckets<P: PointSource + ?Sized>(
    points: &mut P,
    axis: Axis,
    start: usize,
    end: usize,
    bucket_size: usize,
    stack: &mut Vec<(usize, usize)>,
) {
    debug_assert!(bucket_size > 0, "bucket size must be positive");
    debug_assert!(start <= end && end <= points.len(), "range {start}..{end} out of bounds");

    stack.clear();
    stack.push((start, end));

    while let Some((lo, hi)) = stack.pop() {
        if hi - lo <= bucket_size {
            continue;
        }
        // bucket boundary closest to the middle of [lo, hi), always in (lo, hi)
        let mid = lo + (hi - lo).div_ceil(2 * bucket_size) * bucket_size;
        select(points, axis, lo, hi - 1, mid);
        stack.push((lo, mid));
        stack.push((mid, hi));
    }
}

/// Quickselect over the inclusive range `[left, right]`: afterwards the point at
/// `k` holds the k-th smallest coordinate, everything before it is `<=` and
/// everything after it is `>=`.
fn select<P: PointSource + ?Sized>(
    points: &mut P,
    axis: Axis,
    mut left: usize,
    mut right: usize,
    k: usize,
) {
    while right > left {
        let pivot = axis.coordinate(points, k);
        let mut i = left;
        let mut j = right;

        points.swap(left, k);
        if axis.coordinate(points, right) > pivot {
            points.swap(left, right);
        }

        while i < j {
            points.swap(i, j);
            i += 1;
            j -= 1;
            while axis.coordinate(points, i) < pivot {
                i += 1;
            }
            while axis.coordinate(points, j) > pivot {
                j -= 1;
            }
        }

        if axis.coordinate(points, left) == pivot {
            points.swap(left, j);
        } else {
            j += 1;
            points.swap(j, right);
        }

        match j.cmp(&k) {
            Ordering::Less => left = j + 1,
            Ordering::Greater => right = j - 1,
            Ordering::Equal => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn coords(points: &[(f64, f64)], axis: Axis) -> Vec<f64> {
        points
            .iter()
            .map(|&(x, y)| if axis == Axis::X { x } else { y })
            .collect()
    }

    /// Every bucket's maximum is <= the minimum of every later bucket.
    fn assert_bucketed(points: &[(f64, f64)], axis: Axis, start: usize, end: usize, bucket_size: usize) {
        let values = coords(points, axis);
        let buckets: Vec<&[f64]> = values[start..end].chunks(bucket_size).collect();
        for (b, bucket) in buckets.iter().enumerate() {
            let max = bucket.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            for later in &buckets[b + 1..] {
                let min = later.iter().copied().fold(f64::INFINITY, f64::min);
                assert!(max <= min, "bucket {b} max {max} exceeds later bucket min {min}");
            }
        }
    }

    fn sorted_multiset(mut values: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        values
    }

    #[test]
    fn test_select_places_kth() {
        let mut points: Vec<(f64, f64)> = [5.0, 1.0, 4.0, 2.0, 3.0, 0.0, 6.0]
            .iter()
            .map(|&x| (x, 0.0))
            .collect();
        let len = points.len();
        select(&mut points, Axis::X, 0, len - 1, 3);
        assert_eq!(points[3].0, 3.0);
        assert!(points[..3].iter().all(|p| p.0 <= 3.0));
        assert!(points[4..].iter().all(|p| p.0 >= 3.0));
    }

    #[test]
    fn test_select_edges() {
        let mut points: Vec<(f64, f64)> = (0..10).rev().map(|i| (0.0, i as f64)).collect();
        select(&mut points, Axis::Y, 0, 9, 0);
        assert_eq!(points[0].1, 0.0);
        select(&mut points, Axis::Y, 0, 9, 9);
        assert_eq!(points[9].1, 9.0);
    }

    #[test]
    fn test_partition_random() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut stack = Vec::new();
        for &len in &[1usize, 2, 9, 10, 17, 100, 257, 1000] {
            for &bucket_size in &[1usize, 2, 3, 9, 10, 64] {
                let mut points: Vec<(f64, f64)> = (0..len)
                    .map(|_| (rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0)))
                    .collect();
                let before = sorted_multiset(points.clone());
                partition_buckets(&mut points, Axis::X, 0, len, bucket_size, &mut stack);
                assert_bucketed(&points, Axis::X, 0, len, bucket_size);
                assert_eq!(sorted_multiset(points.clone()), before, "partition must only permute");
            }
        }
    }

    #[test]
    fn test_partition_sub_range_leaves_outside_untouched() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let mut points: Vec<(f64, f64)> = (0..200)
            .map(|_| (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
            .collect();
        let original = points.clone();
        let mut stack = Vec::new();

        partition_buckets(&mut points, Axis::Y, 40, 150, 7, &mut stack);

        assert_eq!(points[..40], original[..40]);
        assert_eq!(points[150..], original[150..]);
        assert_bucketed(&points, Axis::Y, 40, 150, 7);
    }

    #[test]
    fn test_partition_with_duplicates() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let mut points: Vec<(f64, f64)> = (0..500)
            .map(|_| (rng.random_range(0..5) as f64, 0.0))
            .collect();
        let mut stack = Vec::new();
        partition_buckets(&mut points, Axis::X, 0, 500, 33, &mut stack);
        assert_bucketed(&points, Axis::X, 0, 500, 33);
    }

    #[test]
    fn test_partition_all_identical() {
        let mut points = vec![(2.0, 2.0); 64];
        let mut stack = Vec::new();
        partition_buckets(&mut points, Axis::Y, 0, 64, 5, &mut stack);
        assert!(points.iter().all(|&p| p == (2.0, 2.0)));
    }

    #[test]
    fn test_partition_sorted_and_reversed() {
        let mut stack = Vec::new();
        let mut ascending: Vec<(f64, f64)> = (0..300).map(|i| (i as f64, 0.0)).collect();
        partition_buckets(&mut ascending, Axis::X, 0, 300, 16, &mut stack);
        assert_bucketed(&ascending, Axis::X, 0, 300, 16);

        let mut descending: Vec<(f64, f64)> = (0..300).rev().map(|i| (i as f64, 0.0)).collect();
        partition_buckets(&mut descending, Axis::X, 0, 300, 16, &mut stack);
        assert_bucketed(&descending, Axis::X, 0, 300, 16);
    }

    #[test]
    fn test_partition_is_deterministic() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        let input: Vec<(f64, f64)> = (0..400)
            .map(|_| (rng.random_range(0.0..10.0), rng.random_range(0.0..10.0)))
            .collect();
        let mut stack = Vec::new();

        let mut first = input.clone();
        partition_buckets(&mut first, Axis::X, 0, 400, 21, &mut stack);
        let mut second = input;
        partition_buckets(&mut second, Axis::X, 0, 400, 21, &mut stack);

        assert_eq!(first, second);
    }
}
