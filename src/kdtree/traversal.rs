//! Utilities to traverse the KDTree structure.

use std::fmt;
use std::marker::PhantomData;

use crate::kdtree::index::NodeData;
use crate::kdtree::KDTreeIndex;
use crate::r#type::IndexableNum;

/// A node in the KDTree.
///
/// This is a lightweight view onto the tree's node arena. Moving to a child or to the parent
/// returns another view; nothing is allocated.
pub struct Node<'a, N: IndexableNum, T: KDTreeIndex<N>> {
    /// The tree that this node is a reference onto
    tree: &'a T,

    /// Position of this node in the tree's arena
    node_id: usize,

    phantom: PhantomData<N>,
}

impl<'a, N: IndexableNum, T: KDTreeIndex<N>> Node<'a, N, T> {
    pub(crate) fn from_root(tree: &'a T) -> Self {
        Self::from_id(tree, 0)
    }

    #[inline]
    fn from_id(tree: &'a T, node_id: usize) -> Self {
        Self {
            tree,
            node_id,
            phantom: PhantomData,
        }
    }

    #[inline]
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes()[self.node_id]
    }

    /// The run of the tree's index permutation that this node owns.
    #[inline]
    pub(crate) fn range(&self) -> (usize, usize) {
        let data = self.data();
        (data.start, data.end)
    }

    /// Position of this node in the tree's node arena. The root is at 0.
    pub fn id(&self) -> usize {
        self.node_id
    }

    /// The depth of this node. The root has depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.data().depth
    }

    /// The axis that the children of this node are split over.
    ///
    /// This is always `depth % dims`, also on leaves, which are never split.
    #[inline]
    pub fn axis(&self) -> usize {
        self.depth() % self.tree.points().dims()
    }

    /// The median on [`axis`][Self::axis] that separates the children, or `None` on a leaf.
    #[inline]
    pub fn split_value(&self) -> Option<f64> {
        self.data().split.map(|split| split.value)
    }

    /// The number of points below this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Always `false`: every node holds at least one point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// The dataset positions of the points below this node.
    ///
    /// The left child's positions come first, followed by the right child's.
    pub fn indices(&self) -> impl Iterator<Item = usize> + 'a {
        let (start, end) = self.range();
        self.tree.indices().slice(start, end).iter()
    }

    /// The child node holding the lower half of this node's points.
    pub fn left_child(&self) -> Option<Node<'a, N, T>> {
        self.data()
            .split
            .map(|split| Self::from_id(self.tree, split.left))
    }

    /// The child node holding the upper half of this node's points.
    pub fn right_child(&self) -> Option<Node<'a, N, T>> {
        self.data()
            .split
            .map(|split| Self::from_id(self.tree, split.right))
    }

    /// The node this node was split from, or `None` on the root.
    pub fn parent(&self) -> Option<Node<'a, N, T>> {
        self.data()
            .parent
            .map(|parent| Self::from_id(self.tree, parent))
    }

    /// The ancestor `levels` steps up the tree. `ancestor(0)` is this node itself.
    pub fn ancestor(&self, levels: usize) -> Option<Node<'a, N, T>> {
        let mut node = *self;
        for _ in 0..levels {
            node = node.parent()?;
        }
        Some(node)
    }

    /// The `(axis, split value)` of every ancestor, from the parent up to the root.
    pub fn ancestors(&self) -> Ancestors<'a, N, T> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Returns `true` if this node is the root of the tree.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.data().parent.is_none()
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.data().split.is_none()
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}

impl<N: IndexableNum, T: KDTreeIndex<N>> Clone for Node<'_, N, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: IndexableNum, T: KDTreeIndex<N>> Copy for Node<'_, N, T> {}

impl<N: IndexableNum, T: KDTreeIndex<N>> fmt::Debug for Node<'_, N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.node_id)
            .field("depth", &self.depth())
            .field("len", &self.len())
            .field("split_value", &self.split_value())
            .finish()
    }
}

/// Iterator over the splitting hyperplanes above a node, nearest first.
///
/// Created by [`Node::ancestors`].
pub struct Ancestors<'a, N: IndexableNum, T: KDTreeIndex<N>> {
    next: Option<Node<'a, N, T>>,
}

impl<N: IndexableNum, T: KDTreeIndex<N>> Iterator for Ancestors<'_, N, T> {
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent();
        // every ancestor is a branch, so the split is always present
        node.split_value().map(|value| (node.axis(), value))
    }
}
