//! Distance metrics for nearest neighbor queries.
//!
//! A metric supplies two distances: one between two full points, and one between two scalars on
//! a single axis. The scalar form measures how far a query lies from a splitting hyperplane, so
//! for exact search it must never exceed the point distance between two points whose coordinates
//! on that axis differ by the same amount.

use crate::r#type::IndexableNum;
use crate::util::to_f64;

/// A trait for calculating distances between points and along a single axis.
pub trait DistanceMetric<N: IndexableNum> {
    /// Distance between two points of equal dimension.
    fn distance(&self, a: &[N], b: &[N]) -> f64;

    /// Distance between two coordinates on one axis.
    fn axis_distance(&self, a: f64, b: f64) -> f64;
}

impl<N: IndexableNum, M: DistanceMetric<N> + ?Sized> DistanceMetric<N> for &M {
    #[inline]
    fn distance(&self, a: &[N], b: &[N]) -> f64 {
        (**self).distance(a, b)
    }

    #[inline]
    fn axis_distance(&self, a: f64, b: f64) -> f64 {
        (**self).axis_distance(a, b)
    }
}

/// L-2 or Euclidean distance.
///
/// See [\[Wikipedia\]](https://en.wikipedia.org/wiki/Euclidean_distance)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EuclideanDistance;

impl<N: IndexableNum> DistanceMetric<N> for EuclideanDistance {
    #[inline]
    fn distance(&self, a: &[N], b: &[N]) -> f64 {
        SquaredEuclideanDistance.distance(a, b).sqrt()
    }

    #[inline]
    fn axis_distance(&self, a: f64, b: f64) -> f64 {
        (a - b).abs()
    }
}

/// Squared Euclidean distance.
///
/// Orders points exactly like [`EuclideanDistance`] while skipping the square root. Distances
/// returned alongside neighbors are squared as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SquaredEuclideanDistance;

impl<N: IndexableNum> DistanceMetric<N> for SquaredEuclideanDistance {
    #[inline]
    fn distance(&self, a: &[N], b: &[N]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(&x, &y)| {
                let d = to_f64(x) - to_f64(y);
                d * d
            })
            .sum()
    }

    #[inline]
    fn axis_distance(&self, a: f64, b: f64) -> f64 {
        let d = a - b;
        d * d
    }
}

/// L-1 or Manhattan distance.
///
/// See [\[Wikipedia\]](https://en.wikipedia.org/wiki/Taxicab_geometry).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ManhattanDistance;

impl<N: IndexableNum> DistanceMetric<N> for ManhattanDistance {
    #[inline]
    fn distance(&self, a: &[N], b: &[N]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(&x, &y)| (to_f64(x) - to_f64(y)).abs())
            .sum()
    }

    #[inline]
    fn axis_distance(&self, a: f64, b: f64) -> f64 {
        (a - b).abs()
    }
}

/// L-inf or Chebyshev distance.
///
/// See [\[Wikipedia\]](https://en.wikipedia.org/wiki/Chebyshev_distance)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ChebyshevDistance;

impl<N: IndexableNum> DistanceMetric<N> for ChebyshevDistance {
    #[inline]
    fn distance(&self, a: &[N], b: &[N]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(&x, &y)| (to_f64(x) - to_f64(y)).abs())
            .fold(0.0, f64::max)
    }

    #[inline]
    fn axis_distance(&self, a: f64, b: f64) -> f64 {
        (a - b).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_euclidean_distance() {
        let distance = EuclideanDistance.distance(&[0.0f64, 0.0], &[3.0, 4.0]);
        assert_relative_eq!(distance, 5.0);
    }

    #[test]
    fn test_squared_euclidean_distance() {
        let distance = SquaredEuclideanDistance.distance(&[1i32, 1, 1], &[2, 3, 4]);
        assert_relative_eq!(distance, 14.0);
        assert_relative_eq!(
            DistanceMetric::<i32>::axis_distance(&SquaredEuclideanDistance, 1.0, 4.0),
            9.0
        );
    }

    #[test]
    fn test_manhattan_distance() {
        let distance = ManhattanDistance.distance(&[0u8, 10], &[3, 6]);
        assert_relative_eq!(distance, 7.0);
    }

    #[test]
    fn test_chebyshev_distance() {
        let distance = ChebyshevDistance.distance(&[0.0f32, 10.0, 2.0], &[3.0, 4.0, 2.5]);
        assert_relative_eq!(distance, 6.0);
    }

    #[test]
    fn axis_distance_never_exceeds_point_distance() {
        let a = [0.3f64, -1.2, 4.0];
        let b = [2.1f64, 0.4, 3.5];
        for axis in 0..3 {
            let (x, y) = (a[axis], b[axis]);
            assert_dominated(&EuclideanDistance, &a, &b, x, y);
            assert_dominated(&SquaredEuclideanDistance, &a, &b, x, y);
            assert_dominated(&ManhattanDistance, &a, &b, x, y);
            assert_dominated(&ChebyshevDistance, &a, &b, x, y);
        }
    }

    fn assert_dominated<M: DistanceMetric<f64>>(
        metric: &M,
        a: &[f64],
        b: &[f64],
        x: f64,
        y: f64,
    ) {
        assert!(metric.axis_distance(x, y) <= metric.distance(a, b));
    }

    #[test]
    fn metrics_work_through_references() {
        fn dist<M: DistanceMetric<f64>>(metric: M) -> f64 {
            metric.distance(&[0.0, 0.0], &[0.0, 2.0])
        }
        assert_relative_eq!(dist(&EuclideanDistance), 2.0);
    }
}
