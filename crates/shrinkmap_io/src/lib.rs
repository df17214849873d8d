//! Dataset input for shrinkmap: the fixed-width sample file, sign balancing,
//! projection and the train/test split.

pub mod dataset;
pub mod error;

pub use dataset::{balance_signs, load, parse, parse_line, Dataset, PrepareOptions, RawSample};
pub use error::{DatasetError, Result};
