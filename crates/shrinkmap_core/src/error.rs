//! Error types for shrinkmap_core.
//!
//! Every variant is fatal for the current run. The engine never retries; the
//! binary turns these into a non-zero exit status.

use thiserror::Error;

/// Main error type for clustering operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// Settings that make training impossible or meaningless
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Training requested with no inputs
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// Nearest-prototype query against zero prototypes
    #[error("No prototypes to match against")]
    EmptyPopulation,

    /// Normalization of a vector with zero or non-finite length
    #[error("Cannot normalize vector with norm {norm}")]
    DegenerateVector { norm: f64 },
}

/// Result type alias for shrinkmap_core operations.
pub type Result<T> = std::result::Result<T, ClusterError>;

impl ClusterError {
    /// Creates a new invalid settings error.
    #[must_use]
    pub fn invalid_settings<S: Into<String>>(msg: S) -> Self {
        Self::InvalidSettings(msg.into())
    }
}
