use super::{PopulationControl, Reduction};
use crate::error::{ClusterError, Result};
use crate::population::Population;

/// Lazy elimination followed by worst-distortion kills up to a quota.
///
/// The quota is `max(floor(alive × kill_fraction), kill_minimum)`, with
/// `alive` taken before any kill of the sweep. Lazy kills count toward it.
#[derive(Debug, Clone)]
pub struct QuotaPruning {
    kill_fraction: f64,
    kill_minimum: usize,
}

impl QuotaPruning {
    /// Fails unless `kill_fraction` is in `[0, 1]` and `kill_minimum` is
    /// positive. A zero minimum could stall a sweep with no lazy neurons.
    pub fn new(kill_fraction: f64, kill_minimum: usize) -> Result<Self> {
        if !(0.0..=1.0).contains(&kill_fraction) {
            return Err(ClusterError::invalid_settings(
                "Kill fraction must be in [0.0, 1.0]",
            ));
        }
        if kill_minimum == 0 {
            return Err(ClusterError::invalid_settings(
                "Kill minimum must be positive",
            ));
        }
        Ok(Self {
            kill_fraction,
            kill_minimum,
        })
    }

    #[must_use]
    pub fn quota(&self, alive: usize) -> usize {
        let share = (alive as f64 * self.kill_fraction).floor() as usize;
        share.max(self.kill_minimum)
    }
}

impl PopulationControl for QuotaPruning {
    fn name(&self) -> &'static str {
        "quota"
    }

    fn reduce(&mut self, population: &mut Population, _sweep: usize) -> Result<Reduction> {
        let to_kill = self.quota(population.alive_count());
        let mut reduction = Reduction {
            lazy: population.eliminate_lazy(),
            ..Default::default()
        };

        while reduction.total() < to_kill && !population.at_floor() {
            let Some(worst) = population.most_distorted() else {
                break;
            };
            let score = population.state(worst).score().unwrap_or(0.0);
            if !population.kill(worst) {
                break;
            }
            tracing::debug!(slot = worst, score, "Most distorted neuron eliminated");
            reduction.distorted += 1;
        }

        Ok(reduction)
    }
}
