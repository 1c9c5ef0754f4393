//! A borrowed, fixed-dimension point set.

use bytemuck::cast_slice;

use crate::error::{KdKnnError, Result};
use crate::r#type::IndexableNum;

/// A reference onto a caller-owned set of points.
///
/// Points are stored interleaved: the coordinates of point `i` are
/// `coords[i * dims..(i + 1) * dims]`. The view never copies the coordinates, so the data must
/// outlive any tree built over it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsRef<'a, N: IndexableNum> {
    coords: &'a [N],
    dims: usize,
}

impl<'a, N: IndexableNum> PointsRef<'a, N> {
    /// Create a view over an interleaved coordinate buffer with `dims` coordinates per point.
    ///
    /// ```
    /// use kd_knn::PointsRef;
    ///
    /// let coords = [0., 0., 1., 1., 2., 2.];
    /// let points = PointsRef::try_new(&coords, 2).unwrap();
    /// assert_eq!(points.len(), 3);
    /// assert_eq!(points.point(1), &[1., 1.]);
    /// ```
    pub fn try_new(coords: &'a [N], dims: usize) -> Result<Self> {
        if dims == 0 {
            return Err(KdKnnError::Configuration(
                "Points must have at least one dimension.".to_string(),
            ));
        }
        if coords.len() % dims != 0 {
            return Err(KdKnnError::DimensionMismatch {
                expected: dims,
                actual: coords.len() % dims,
            });
        }
        Ok(Self { coords, dims })
    }

    /// Create a view over a slice of fixed-size points without copying.
    ///
    /// ```
    /// use kd_knn::PointsRef;
    ///
    /// let data = [[1.1, 0.6], [0.4, 0.5], [0.2, 0.6]];
    /// let points = PointsRef::from_arrays(&data).unwrap();
    /// assert_eq!(points.dims(), 2);
    /// assert_eq!(points.point(2), &[0.2, 0.6]);
    /// ```
    pub fn from_arrays<const D: usize>(points: &'a [[N; D]]) -> Result<Self> {
        if D == 0 {
            return Self::try_new(&[], D);
        }
        Self::try_new(cast_slice(points), D)
    }

    /// The number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len() / self.dims
    }

    /// Returns `true` if there are no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The number of coordinates per point.
    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The underlying interleaved coordinate buffer.
    pub fn coords(&self) -> &'a [N] {
        self.coords
    }

    /// The coordinates of the point at `index`.
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn point(&self, index: usize) -> &'a [N] {
        &self.coords[index * self.dims..(index + 1) * self.dims]
    }

    /// A single coordinate of the point at `index`.
    #[inline]
    pub fn coord(&self, index: usize, axis: usize) -> N {
        self.coords[index * self.dims + axis]
    }

    /// Iterate over all points in dataset order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'a [N]> + 'a {
        self.coords.chunks_exact(self.dims)
    }
}
