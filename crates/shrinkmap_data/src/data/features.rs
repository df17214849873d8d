use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of measured dimensions per sample.
pub const RAW_DIMENSIONS: usize = 4;
/// Dimensions after projection (one extra coordinate for the sphere).
pub const FEATURE_DIMENSIONS: usize = RAW_DIMENSIONS + 1;
/// Number of ground-truth classes.
pub const LABEL_COUNT: usize = 3;

/// Feature vector as read from the dataset.
pub type RawFeatures = [f64; RAW_DIMENSIONS];

/// Projected feature vector; also the shape of every neuron weight.
pub type Features = [f64; FEATURE_DIMENSIONS];

/// Ground-truth class of a sample. Only consulted during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    Setosa,
    Versicolor,
    Virginica,
}

impl Label {
    pub const ALL: [Label; LABEL_COUNT] = [Label::Setosa, Label::Versicolor, Label::Virginica];

    /// Row/column index used by contingency tables.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Label::Setosa => 0,
            Label::Versicolor => 1,
            Label::Virginica => 2,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parses the class name used by the dataset file (`Iris-setosa`, ...).
    #[must_use]
    pub fn from_dataset_name(name: &str) -> Option<Self> {
        match name {
            "Iris-setosa" => Some(Label::Setosa),
            "Iris-versicolor" => Some(Label::Versicolor),
            "Iris-virginica" => Some(Label::Virginica),
            _ => None,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Label::Setosa => "iris setosa",
            Label::Versicolor => "iris versicolor",
            Label::Virginica => "iris virginica",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One labelled sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub features: Features,
    pub label: Label,
}

impl DataPoint {
    #[must_use]
    pub fn new(features: Features, label: Label) -> Self {
        Self { features, label }
    }
}
