//! Error types for shrinkmap_io crate.

use thiserror::Error;

/// Main error type for dataset operations.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// A line that does not follow the fixed-width layout
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// File contained no samples
    #[error("Dataset is empty")]
    Empty,

    /// Requested split does not fit the dataset
    #[error("Cannot take {requested} training samples from {available}")]
    Split { requested: usize, available: usize },

    /// Projection failed for a sample
    #[error("Preprocessing error: {0}")]
    Preprocess(#[from] shrinkmap_core::ClusterError),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<DatasetError>,
    },
}

/// Result type alias for shrinkmap_io operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

impl DatasetError {
    /// Creates a new parse error.
    #[must_use]
    pub fn parse<S: Into<String>>(line: usize, reason: S) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
