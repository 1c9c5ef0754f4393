use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdKnnError {
    /// A build option is out of range, e.g. a node size of zero.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A tree cannot be built over a dataset without points.
    #[error("Cannot build a tree over an empty dataset")]
    EmptyDataset,

    /// A point or query does not have the dimension of the dataset.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A query asked for more neighbors than can be returned.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

pub type Result<T> = std::result::Result<T, KdKnnError>;
