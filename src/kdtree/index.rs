use crate::error::Result;
use crate::indices::OwnedIndices;
use crate::kdtree::KDTreeBuilder;
use crate::points::PointsRef;
use crate::r#type::IndexableNum;

/// Common metadata describing a KDTree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KDTreeMetadata {
    pub(crate) num_items: usize,
    pub(crate) dims: usize,
    pub(crate) node_size: usize,
    pub(crate) num_nodes: usize,
    pub(crate) max_depth: usize,
}

impl KDTreeMetadata {
    /// The number of points indexed by the tree.
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// The number of coordinates per point.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The largest number of points a leaf may hold.
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// The number of nodes in the tree, both leaves and branches.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// The depth of the deepest leaf. The root has depth 0.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// The split recorded on a branch node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Split {
    pub(crate) value: f64,
    pub(crate) left: usize,
    pub(crate) right: usize,
}

/// One entry of the node arena.
///
/// A node owns the run `start..end` of the tree's index permutation. Children split that run at
/// its midpoint, so every descendant's run is nested inside its ancestors' runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeData {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) depth: usize,
    pub(crate) parent: Option<usize>,
    pub(crate) split: Option<Split>,
}

impl NodeData {
    /// The number of points below this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always `false`: every node holds at least one point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A KDTree built over a borrowed set of points.
///
/// Usually this will be created via [`KDTreeBuilder`] or [`KDTree::try_new`]. The tree owns its
/// node arena and the permutation of dataset positions, but never copies the coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<'a, N: IndexableNum> {
    pub(crate) points: PointsRef<'a, N>,
    pub(crate) ids: OwnedIndices,
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) metadata: KDTreeMetadata,
}

impl<'a, N: IndexableNum> KDTree<'a, N> {
    /// Build a tree whose leaves hold at most `node_size` points.
    ///
    /// ```
    /// use kd_knn::kdtree::{KDTree, KDTreeIndex};
    /// use kd_knn::metric::EuclideanDistance;
    /// use kd_knn::PointsRef;
    ///
    /// let data = [[0., 0.], [1., 1.], [2., 2.], [3., 3.]];
    /// let points = PointsRef::from_arrays(&data).unwrap();
    /// let tree = KDTree::try_new(points, 1).unwrap();
    ///
    /// let results = tree.nearest_neighbors(&[2.2, 2.1], 2, 0, &EuclideanDistance).unwrap();
    /// assert_eq!(results, vec![2, 3]);
    /// ```
    pub fn try_new(points: PointsRef<'a, N>, node_size: usize) -> Result<Self> {
        KDTreeBuilder::new_with_node_size(points, node_size).finish()
    }
}
