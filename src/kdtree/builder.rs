use log::debug;

use crate::error::{KdKnnError, Result};
use crate::indices::{MutableIndices, OwnedIndices};
use crate::kdtree::index::{KDTree, KDTreeMetadata, NodeData, Split};
use crate::points::PointsRef;
use crate::r#type::IndexableNum;
use crate::util::{median_of_sorted, to_f64};

/// The default maximum number of points held by a leaf.
pub const DEFAULT_NODE_SIZE: usize = 1;

/// The largest dataset whose positions still fit into `u32`.
const MAX_ITEMS: u64 = u32::MAX as u64 + 1;

/// A builder to create a [`KDTree`].
///
/// The builder borrows the points; nothing is copied except the permutation of their positions.
#[derive(Debug, Clone, Copy)]
pub struct KDTreeBuilder<'a, N: IndexableNum> {
    points: PointsRef<'a, N>,
    node_size: usize,
}

impl<'a, N: IndexableNum> KDTreeBuilder<'a, N> {
    /// Create a new builder over the provided points and the default node size.
    pub fn new(points: PointsRef<'a, N>) -> Self {
        Self::new_with_node_size(points, DEFAULT_NODE_SIZE)
    }

    /// Create a new builder over the provided points and node size.
    ///
    /// A node is split only while it holds more than `node_size` points. The value is validated
    /// in [`finish`][Self::finish].
    pub fn new_with_node_size(points: PointsRef<'a, N>, node_size: usize) -> Self {
        Self { points, node_size }
    }

    /// Consume this builder, recursively partitioning the points around their medians.
    pub fn finish(self) -> Result<KDTree<'a, N>> {
        if self.node_size < 1 {
            return Err(KdKnnError::Configuration(format!(
                "Node size must be at least 1, got {}.",
                self.node_size
            )));
        }
        if self.points.is_empty() {
            return Err(KdKnnError::EmptyDataset);
        }
        let num_items = self.points.len();
        if num_items as u64 > MAX_ITEMS {
            return Err(KdKnnError::Configuration(format!(
                "Got {} points when at most {} can be indexed.",
                num_items, MAX_ITEMS
            )));
        }

        let mut ids = OwnedIndices::identity(num_items);
        let mut partitioner = Partitioner {
            points: self.points,
            ids: ids.as_mut(),
            nodes: Vec::with_capacity(2 * num_items.div_ceil(self.node_size)),
            node_size: self.node_size,
            max_depth: 0,
        };
        partitioner.split(0, num_items, 0, None);

        let Partitioner {
            nodes, max_depth, ..
        } = partitioner;

        let metadata = KDTreeMetadata {
            num_items,
            dims: self.points.dims(),
            node_size: self.node_size,
            num_nodes: nodes.len(),
            max_depth,
        };
        debug!(
            "built kd-tree over {} points in {} dimensions: {} nodes, depth {}",
            num_items,
            metadata.dims,
            metadata.num_nodes,
            max_depth
        );

        Ok(KDTree {
            points: self.points,
            ids,
            nodes,
            metadata,
        })
    }
}

/// Depth-first median partitioning of the index permutation into the node arena.
struct Partitioner<'a, 'b, N: IndexableNum> {
    points: PointsRef<'a, N>,
    ids: MutableIndices<'b>,
    nodes: Vec<NodeData>,
    node_size: usize,
    max_depth: usize,
}

impl<N: IndexableNum> Partitioner<'_, '_, N> {
    /// Create the node owning `ids[start..end]` and, if it is too large, its subtrees.
    ///
    /// Returns the arena position of the created node.
    fn split(&mut self, start: usize, end: usize, depth: usize, parent: Option<usize>) -> usize {
        let node_id = self.nodes.len();
        self.nodes.push(NodeData {
            start,
            end,
            depth,
            parent,
            split: None,
        });
        self.max_depth = self.max_depth.max(depth);

        let len = end - start;
        if len <= self.node_size {
            return node_id;
        }

        // sort the run by its coordinate on this level's axis, ties by dataset position
        let points = self.points;
        let axis = depth % points.dims();
        self.ids.slice_mut(start, end).sort_by(|a, b| {
            to_f64(points.coord(a, axis))
                .total_cmp(&to_f64(points.coord(b, axis)))
                .then(a.cmp(&b))
        });

        // the lower half gets floor(len / 2) points, the upper half the rest
        let mid = start + len / 2;
        let lower_middle = to_f64(points.coord(self.ids.get(mid - 1), axis));
        let upper_middle = to_f64(points.coord(self.ids.get(mid), axis));
        let value = median_of_sorted(lower_middle, upper_middle, len);

        let left = self.split(start, mid, depth + 1, Some(node_id));
        let right = self.split(mid, end, depth + 1, Some(node_id));
        self.nodes[node_id].split = Some(Split { value, left, right });

        node_id
    }
}
