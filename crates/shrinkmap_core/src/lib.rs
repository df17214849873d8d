//! # Shrinkmap Core
//!
//! The clustering engine behind shrinkmap: a self-organizing map whose
//! neuron population starts large and is pruned sweep by sweep until only
//! the expected number of cluster prototypes remain.
//!
//! This crate contains:
//! - Stereographic projection and vector helpers
//! - Neuron adjustment and similarity
//! - The population with per-slot liveness
//! - Pluggable population-control policies (quota pruning, merging)
//! - The training engine and its statistics
//!
//! ## Example
//!
//! ```
//! use shrinkmap_core::{Engine, EngineSettings, RandomSource};
//!
//! let mut rng = RandomSource::seeded(42);
//! let settings = EngineSettings {
//!     population_size: 30,
//!     expected_cluster_count: 3,
//!     initial_radius: 2.5,
//!     ..Default::default()
//! };
//! let mut engine = Engine::new(settings, &mut rng).unwrap();
//!
//! let inputs = [
//!     [0.6, 0.0, 0.0, 0.0, -0.8],
//!     [0.0, 0.6, 0.0, 0.0, -0.8],
//!     [0.0, 0.0, 0.6, 0.0, -0.8],
//! ];
//! engine.run(&inputs).unwrap();
//! assert_eq!(engine.prototypes().len(), 3);
//! ```

/// Engine settings and validation
pub mod config;
/// The training loop
pub mod engine;
/// Error types
pub mod error;
/// Projection and vector arithmetic
pub mod geometry;
/// Sweep statistics and logging setup
pub mod metrics;
/// Neuron behaviour
pub mod neuron;
/// Population-control strategies
pub mod policy;
/// Neuron slots and liveness
pub mod population;
/// Seeded random source
pub mod random;

pub use config::{EngineSettings, InfluenceMode, PolicyKind};
pub use engine::Engine;
pub use error::{ClusterError, Result};
pub use metrics::{init_logging, SweepReport, TrainingStats, TrainingSummary};
pub use neuron::NeuronLogic;
pub use policy::{CorrelationMerge, PopulationControl, QuotaPruning, Reduction};
pub use population::Population;
pub use random::RandomSource;
pub use shrinkmap_data::{Features, Neuron, SlotState};
