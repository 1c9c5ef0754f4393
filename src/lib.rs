#![doc = include_str!("../README.md")]

mod error;
pub mod indices;
pub mod kdtree;
pub mod metric;
mod points;
mod r#type;
mod util;

pub use error::{KdKnnError, Result};
pub use points::PointsRef;
pub use r#type::IndexableNum;
