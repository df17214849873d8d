//! Population-control strategies.
//!
//! A policy runs once per sweep, after every input has been presented and
//! before the radius decays. It may only shrink the population, and only
//! through [`Population::kill`] / [`Population::merge`], which enforce the
//! floor.

pub mod merge;
pub mod quota;

pub use merge::CorrelationMerge;
pub use quota::QuotaPruning;

use crate::config::{EngineSettings, PolicyKind};
use crate::error::Result;
use crate::population::Population;
use serde::Serialize;

/// What one policy step removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Reduction {
    /// Neurons no input reached this sweep.
    pub lazy: usize,
    /// Neurons removed for carrying the highest distortion score.
    pub distorted: usize,
    /// Neurons absorbed into a similar neighbour.
    pub merged: usize,
}

impl Reduction {
    #[must_use]
    pub fn total(&self) -> usize {
        self.lazy + self.distorted + self.merged
    }
}

pub trait PopulationControl: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Applies one sweep's worth of population reduction. `sweep` is the
    /// 1-based number of the sweep that just finished.
    fn reduce(&mut self, population: &mut Population, sweep: usize) -> Result<Reduction>;
}

/// Builds the policy selected by `settings.policy`.
pub fn from_settings(settings: &EngineSettings) -> Result<Box<dyn PopulationControl>> {
    let policy: Box<dyn PopulationControl> = match settings.policy {
        PolicyKind::Quota => Box::new(QuotaPruning::new(
            settings.kill_fraction,
            settings.kill_minimum,
        )?),
        PolicyKind::Merge => Box::new(CorrelationMerge::new(settings.merge_interval)?),
    };
    Ok(policy)
}
