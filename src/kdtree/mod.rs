//! An implementation of an immutable, median-split K-D Tree with backtracking k-nearest-neighbor
//! search.

#![warn(missing_docs)]

mod builder;
mod index;
mod select;
mod r#trait;
mod traversal;

pub use builder::{KDTreeBuilder, DEFAULT_NODE_SIZE};
pub use index::{KDTree, KDTreeMetadata, NodeData};
pub use r#trait::KDTreeIndex;
pub use traversal::{Ancestors, Node};
