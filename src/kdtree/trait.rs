use geo_traits::CoordTrait;
use log::trace;
use tinyvec::TinyVec;

use crate::error::{KdKnnError, Result};
use crate::indices::Indices;
use crate::kdtree::index::NodeData;
use crate::kdtree::select::{select_k_nearest, Candidate};
use crate::kdtree::{KDTree, KDTreeMetadata, Node};
use crate::metric::DistanceMetric;
use crate::points::PointsRef;
use crate::r#type::IndexableNum;
use crate::util::to_f64;

/// A trait for searching and accessing data out of a KDTree.
pub trait KDTreeIndex<N: IndexableNum>: Sized {
    /// The points this tree was built over
    fn points(&self) -> PointsRef<'_, N>;

    /// The permutation of dataset positions. Every node owns one contiguous run of it.
    fn indices(&self) -> Indices<'_>;

    /// The node arena, root first, in depth-first order
    fn nodes(&self) -> &[NodeData];

    /// Access the metadata describing this KDTree
    fn metadata(&self) -> &KDTreeMetadata;

    /// The number of items in this KDTree
    fn num_items(&self) -> usize {
        self.metadata().num_items()
    }

    /// The number of coordinates per point
    fn dims(&self) -> usize {
        self.metadata().dims()
    }

    /// The node size of this KDTree
    fn node_size(&self) -> usize {
        self.metadata().node_size()
    }

    /// Access the root node of the KDTree for manual traversal.
    fn root(&self) -> Node<'_, N, Self> {
        Node::from_root(self)
    }

    /// Find the leaf that `query` would fall into if it were part of the dataset.
    ///
    /// At every branch the query moves right if its coordinate on the branch's axis is strictly
    /// greater than the split value, otherwise left.
    fn descend(&self, query: &[N]) -> Result<Node<'_, N, Self>> {
        check_dims(self.dims(), query.len())?;

        let mut node = self.root();
        while let (Some(split_value), Some(left), Some(right)) =
            (node.split_value(), node.left_child(), node.right_child())
        {
            node = if to_f64(query[node.axis()]) > split_value {
                right
            } else {
                left
            };
        }
        Ok(node)
    }

    /// Search for the `k` items nearest to `query`.
    ///
    /// - query: coordinates of the query point
    /// - k: number of neighbors to return
    /// - approx: number of backtracking levels to skip. `0` gives the exact answer; larger values
    ///   trade accuracy for speed
    /// - metric: distance metric used to rank items
    ///
    /// Returns indices of found items, nearest first.
    ///
    /// ```
    /// use kd_knn::kdtree::{KDTreeBuilder, KDTreeIndex};
    /// use kd_knn::metric::EuclideanDistance;
    /// use kd_knn::PointsRef;
    ///
    /// let data = [
    ///     [1.1, 0.6], [0.4, 0.5], [0.2, 0.6], [0.5, 0.9],
    ///     [1.2, 0.3], [0.7, 0.4], [0.8, 1.0], [0.1, 0.2],
    /// ];
    /// let points = PointsRef::from_arrays(&data).unwrap();
    /// let tree = KDTreeBuilder::new(points).finish().unwrap();
    ///
    /// let results = tree.nearest_neighbors(&[0.55, 0.4], 1, 0, &EuclideanDistance).unwrap();
    /// assert_eq!(results, vec![5]);
    /// ```
    fn nearest_neighbors<M: DistanceMetric<N>>(
        &self,
        query: &[N],
        k: usize,
        approx: usize,
        metric: &M,
    ) -> Result<Vec<u32>> {
        let neighbors = self.nearest_neighbors_with_distance(query, k, approx, metric)?;
        Ok(neighbors.into_iter().map(|(id, _)| id).collect())
    }

    /// Search for the `k` items nearest to `query`, returning each with its distance.
    ///
    /// See [`nearest_neighbors`][Self::nearest_neighbors] for the parameters.
    fn nearest_neighbors_with_distance<M: DistanceMetric<N>>(
        &self,
        query: &[N],
        k: usize,
        approx: usize,
        metric: &M,
    ) -> Result<Vec<(u32, f64)>> {
        let num_items = self.num_items();
        if k == 0 {
            return Err(KdKnnError::InsufficientData(
                "k must be at least 1.".to_string(),
            ));
        }
        if k > num_items {
            return Err(KdKnnError::InsufficientData(format!(
                "k ({}) exceeds dataset size ({}).",
                k, num_items
            )));
        }

        // climb from the query's leaf until the node holds at least k points
        let mut landing = self.descend(query)?;
        while landing.len() < k {
            landing = landing.parent().ok_or_else(|| {
                KdKnnError::InsufficientData(format!(
                    "k ({}) exceeds dataset size ({}).",
                    k, num_items
                ))
            })?;
        }

        // 1D distance from the query to every hyperplane above the landing node, nearest first
        let borders: TinyVec<[f64; 32]> = landing
            .ancestors()
            .map(|(axis, value)| metric.axis_distance(to_f64(query[axis]), value))
            .collect();

        let points = self.points();
        let indices = self.indices();
        let (start, end) = landing.range();
        let mut candidates: Vec<Candidate> = Vec::with_capacity(end - start);
        candidates.extend((start..end).map(|pos| {
            let id = indices.get(pos);
            Candidate {
                id,
                dist: metric.distance(query, points.point(id)),
            }
        }));
        let farthest = select_k_nearest(&mut candidates, k)[k - 1].dist;

        // any hyperplane no farther than the current k-th neighbor may hide a nearer point, or an
        // equally near one with a lower position, behind it; climbing to the farthest such
        // ancestor covers all of them at once
        let climb = borders
            .iter()
            .rposition(|&border| border <= farthest)
            .map_or(0, |pos| pos + 1);
        let steps = climb.saturating_sub(approx);
        trace!(
            "knn query: landing node {} with {} points, climb {} of {} levels, approx {}",
            landing.id(),
            landing.len(),
            steps,
            climb,
            approx
        );

        if steps > 0 {
            if let Some(ancestor) = landing.ancestor(steps) {
                // distances for the landing node's points are already known
                let (outer_start, outer_end) = ancestor.range();
                candidates.reserve((outer_end - outer_start) - (end - start));
                candidates.extend((outer_start..start).chain(end..outer_end).map(|pos| {
                    let id = indices.get(pos);
                    Candidate {
                        id,
                        dist: metric.distance(query, points.point(id)),
                    }
                }));
                select_k_nearest(&mut candidates, k);
            }
        }

        Ok(candidates[..k]
            .iter()
            // Since the max items of the index is u32::MAX + 1, positions fit in u32
            .map(|candidate| (candidate.id as u32, candidate.dist))
            .collect())
    }

    /// Search for the `k` items nearest to `query`, returning their coordinates.
    ///
    /// See [`nearest_neighbors`][Self::nearest_neighbors] for the parameters.
    fn nearest_points<M: DistanceMetric<N>>(
        &self,
        query: &[N],
        k: usize,
        approx: usize,
        metric: &M,
    ) -> Result<Vec<&[N]>> {
        let points = self.points();
        let neighbors = self.nearest_neighbors(query, k, approx, metric)?;
        Ok(neighbors
            .into_iter()
            .map(|id| points.point(id as usize))
            .collect())
    }

    /// Search for the `k` items nearest to the given coordinate.
    ///
    /// The coordinate's dimension must match the tree's.
    fn nearest_neighbors_coord<M: DistanceMetric<N>>(
        &self,
        coord: &impl CoordTrait<T = N>,
        k: usize,
        approx: usize,
        metric: &M,
    ) -> Result<Vec<u32>> {
        let query: TinyVec<[N; 4]> = (0..coord.dim().size())
            .map(|n| coord.nth_or_panic(n))
            .collect();
        self.nearest_neighbors(&query, k, approx, metric)
    }

    /// Search for the `k` nearest items of every query point in parallel.
    ///
    /// Returns one result per query, in query order. Fails with the first error encountered.
    #[cfg(feature = "rayon")]
    fn par_nearest_neighbors<M: DistanceMetric<N> + Sync>(
        &self,
        queries: PointsRef<'_, N>,
        k: usize,
        approx: usize,
        metric: &M,
    ) -> Result<Vec<Vec<u32>>>
    where
        Self: Sync,
    {
        use rayon::prelude::*;

        (0..queries.len())
            .into_par_iter()
            .map(|i| self.nearest_neighbors(queries.point(i), k, approx, metric))
            .collect()
    }
}

impl<N: IndexableNum> KDTreeIndex<N> for KDTree<'_, N> {
    fn points(&self) -> PointsRef<'_, N> {
        self.points
    }

    fn indices(&self) -> Indices<'_> {
        self.ids.as_ref()
    }

    fn nodes(&self) -> &[NodeData] {
        &self.nodes
    }

    fn metadata(&self) -> &KDTreeMetadata {
        &self.metadata
    }
}

#[inline]
fn check_dims(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(KdKnnError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
