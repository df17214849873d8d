//! Plain data types shared by the shrinkmap crates.
//!
//! Nothing here carries behaviour beyond trivial accessors; the clustering
//! logic lives in `shrinkmap_core` and is attached through extension traits.

pub mod data;

pub use data::features::{
    DataPoint, Features, Label, RawFeatures, FEATURE_DIMENSIONS, LABEL_COUNT, RAW_DIMENSIONS,
};
pub use data::neuron::{Neuron, SlotState};
