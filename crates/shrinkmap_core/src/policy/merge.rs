use super::{PopulationControl, Reduction};
use crate::error::{ClusterError, Result};
use crate::population::Population;

/// Lazy elimination every sweep, plus one merge of the most similar alive
/// pair every `interval` sweeps.
///
/// Termination does not depend on the radius schedule: while the population
/// is above its floor, at least one neuron disappears every `interval`
/// sweeps through the merge alone.
#[derive(Debug, Clone)]
pub struct CorrelationMerge {
    interval: usize,
}

impl CorrelationMerge {
    pub fn new(interval: usize) -> Result<Self> {
        if interval == 0 {
            return Err(ClusterError::invalid_settings(
                "Merge interval must be positive",
            ));
        }
        Ok(Self { interval })
    }

    #[must_use]
    pub fn is_merge_sweep(&self, sweep: usize) -> bool {
        sweep > 0 && sweep % self.interval == 0
    }
}

impl PopulationControl for CorrelationMerge {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn reduce(&mut self, population: &mut Population, sweep: usize) -> Result<Reduction> {
        let mut reduction = Reduction {
            lazy: population.eliminate_lazy(),
            ..Default::default()
        };

        if self.is_merge_sweep(sweep) && !population.at_floor() {
            if let Some((i, j)) = population.most_similar_pair() {
                if population.merge(i, j)? {
                    tracing::debug!(absorbed = i, into = j, "Neurons merged");
                    reduction.merged += 1;
                }
            }
        }

        Ok(reduction)
    }
}
