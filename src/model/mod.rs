pub use shrinkmap_core::NeuronLogic;
pub use shrinkmap_data::{DataPoint, Features, Label, Neuron, RawFeatures};
pub mod engine {
    pub use shrinkmap_core::engine::*;
}
pub mod geometry {
    pub use shrinkmap_core::geometry::*;
}
pub mod policy {
    pub use shrinkmap_core::policy::*;
}
pub mod random {
    pub use shrinkmap_core::random::*;
}
pub mod dataset {
    pub use shrinkmap_io::dataset::*;
}

pub mod config;
pub mod evaluation;
