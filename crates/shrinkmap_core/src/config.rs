//! Engine settings.
//!
//! `EngineSettings` is the immutable parameter set of one training run. It
//! maps onto the `[engine]` table of `config.toml`:
//!
//! ```toml
//! [engine]
//! population_size = 1000
//! expected_cluster_count = 3
//! learning_rate = 0.2
//! initial_radius = 2.5
//! radius_decay = 0.05
//! kill_fraction = 0.1
//! kill_minimum = 3
//! sphere_radius = 4.0
//! influence = "winner_takes_all"
//! policy = "quota"
//! merge_interval = 10
//! ```

use crate::error::{ClusterError, Result};
use serde::{Deserialize, Serialize};

/// Which neurons an input may move during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfluenceMode {
    /// Every alive neuron within the influence radius. Neurons that share a
    /// neighbourhood follow the same input sequence and drift together, so a
    /// small radius and learning rate are needed to keep them apart.
    Radius,
    /// Only the best-matching unit, and only if it is within the radius.
    #[default]
    WinnerTakesAll,
}

/// Population-control strategy applied after each sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Lazy elimination plus a per-sweep quota of worst-distortion kills.
    #[default]
    Quota,
    /// Lazy elimination plus periodic merging of the most similar pair.
    Merge,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Initial number of neurons.
    pub population_size: usize,
    /// Training stops once this many neurons remain.
    pub expected_cluster_count: usize,
    /// Fraction of the distance to an input covered per adjustment.
    pub learning_rate: f64,
    /// Influence radius for the first sweep.
    pub initial_radius: f64,
    /// Radius shrink factor per sweep: `radius *= 1 - radius_decay`.
    pub radius_decay: f64,
    /// Share of alive neurons to remove per sweep under the quota policy.
    pub kill_fraction: f64,
    /// Lower bound on removals per sweep under the quota policy.
    pub kill_minimum: usize,
    /// Radius used by the stereographic projection.
    pub sphere_radius: f64,
    pub influence: InfluenceMode,
    pub policy: PolicyKind,
    /// Sweeps between merges under the merge policy.
    pub merge_interval: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            population_size: 1000,
            expected_cluster_count: 3,
            learning_rate: 0.2,
            initial_radius: 2.5,
            radius_decay: 0.05,
            kill_fraction: 0.1,
            kill_minimum: 3,
            sphere_radius: 4.0,
            influence: InfluenceMode::WinnerTakesAll,
            policy: PolicyKind::Quota,
            merge_interval: 10,
        }
    }
}

fn ensure(cond: bool, msg: &str) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(ClusterError::invalid_settings(msg))
    }
}

impl EngineSettings {
    /// Rejects settings under which training cannot run or cannot terminate.
    pub fn validate(&self) -> Result<()> {
        ensure(
            self.expected_cluster_count > 0,
            "Expected cluster count must be positive",
        )?;
        ensure(
            self.expected_cluster_count < self.population_size,
            "Expected cluster count must be below the population size",
        )?;
        ensure(
            self.learning_rate > 0.0 && self.learning_rate <= 1.0,
            "Learning rate must be in (0.0, 1.0]",
        )?;
        ensure(
            self.initial_radius.is_finite() && self.initial_radius > 0.0,
            "Initial radius must be positive and finite",
        )?;
        ensure(
            (0.0..1.0).contains(&self.radius_decay),
            "Radius decay must be in [0.0, 1.0)",
        )?;
        ensure(
            self.sphere_radius.is_finite() && self.sphere_radius > 0.0,
            "Sphere radius must be positive and finite",
        )?;
        match self.policy {
            PolicyKind::Quota => {
                ensure(
                    (0.0..=1.0).contains(&self.kill_fraction),
                    "Kill fraction must be in [0.0, 1.0]",
                )?;
                ensure(self.kill_minimum > 0, "Kill minimum must be positive")?;
                ensure(
                    self.kill_minimum <= self.population_size,
                    "Kill minimum must not exceed the population size",
                )?;
            }
            PolicyKind::Merge => {
                ensure(self.merge_interval > 0, "Merge interval must be positive")?;
            }
        }
        Ok(())
    }
}
