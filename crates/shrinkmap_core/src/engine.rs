//! The clustering engine: competitive training with a shrinking population.
//!
//! ## Sweep
//!
//! 1. Every alive slot is reset to `Idle`.
//! 2. Each training input, in order, moves the neurons it influences (all
//!    alive neurons within the radius, or only the best-matching unit).
//!    Updates are online: later inputs see the weights earlier ones left.
//! 3. The population-control policy removes neurons.
//! 4. The influence radius decays by `1 - radius_decay`.
//!
//! Training runs sweeps until the alive count reaches the expected cluster
//! count. The floor is enforced on every individual kill, so the run ends
//! with exactly that many prototypes.

use crate::config::{EngineSettings, InfluenceMode};
use crate::error::{ClusterError, Result};
use crate::metrics::{SweepReport, TrainingStats, TrainingSummary};
use crate::neuron::NeuronLogic;
use crate::policy::{self, PopulationControl};
use crate::population::Population;
use crate::random::RandomSource;
use shrinkmap_data::{Features, Neuron};

const RADIUS_WARN_THRESHOLD: f64 = 1e-6;

#[derive(Debug)]
pub struct Engine {
    settings: EngineSettings,
    population: Population,
    policy: Box<dyn PopulationControl>,
    radius: f64,
    sweep: usize,
    stats: TrainingStats,
    radius_warned: bool,
}

impl Engine {
    /// Validates `settings` and draws the initial population from `rng`,
    /// using the policy named in the settings.
    pub fn new(settings: EngineSettings, rng: &mut RandomSource) -> Result<Self> {
        let policy = policy::from_settings(&settings)?;
        Self::with_policy(settings, policy, rng)
    }

    /// Like [`Engine::new`] with an explicit population-control policy.
    pub fn with_policy(
        settings: EngineSettings,
        policy: Box<dyn PopulationControl>,
        rng: &mut RandomSource,
    ) -> Result<Self> {
        settings.validate()?;
        let neurons = (0..settings.population_size)
            .map(|_| Neuron::new_random(rng, settings.sphere_radius))
            .collect::<Result<Vec<_>>>()?;
        Self::from_neurons(settings, policy, neurons)
    }

    /// Engine over a caller-supplied initial population.
    ///
    /// `settings.population_size` is ignored in favour of `neurons.len()`.
    pub fn from_neurons(
        mut settings: EngineSettings,
        policy: Box<dyn PopulationControl>,
        neurons: Vec<Neuron>,
    ) -> Result<Self> {
        settings.population_size = neurons.len();
        settings.validate()?;

        tracing::debug!(
            population = settings.population_size,
            expected = settings.expected_cluster_count,
            policy = policy.name(),
            "Engine initialized"
        );

        Ok(Self {
            population: Population::new(neurons, settings.expected_cluster_count),
            radius: settings.initial_radius,
            stats: TrainingStats::new(settings.population_size),
            settings,
            policy,
            sweep: 0,
            radius_warned: false,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Influence radius for the next sweep.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sweeps completed so far.
    #[must_use]
    pub fn sweeps(&self) -> usize {
        self.sweep
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.population.alive_count()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.population.at_floor()
    }

    /// Alive neuron nearest to `input`.
    #[must_use]
    pub fn best_matching_unit(&self, input: &Features) -> Option<usize> {
        self.population.best_matching_unit(input)
    }

    /// Runs one sweep over `inputs`. A completed engine is left untouched.
    pub fn sweep(&mut self, inputs: &[Features]) -> Result<SweepReport> {
        if inputs.is_empty() {
            return Err(ClusterError::EmptyTrainingSet);
        }
        if self.is_completed() {
            return Ok(SweepReport {
                sweep: self.sweep,
                alive: self.alive_count(),
                reduction: Default::default(),
                radius: self.radius,
                adjustments: 0,
            });
        }

        self.sweep += 1;
        self.population.reset_activity();

        let radius = self.radius;
        let radius_sq = radius * radius;
        let lr = self.settings.learning_rate;
        let mut adjustments = 0;

        for input in inputs {
            match self.settings.influence {
                InfluenceMode::Radius => {
                    for i in 0..self.population.len() {
                        if self.population.is_alive(i)
                            && self.population.neuron(i).squared_distance(input) < radius_sq
                        {
                            self.population.train(i, input, lr)?;
                            adjustments += 1;
                        }
                    }
                }
                InfluenceMode::WinnerTakesAll => {
                    if let Some(winner) = self.population.best_matching_unit(input) {
                        if self.population.neuron(winner).squared_distance(input) < radius_sq {
                            self.population.train(winner, input, lr)?;
                            adjustments += 1;
                        }
                    }
                }
            }
        }

        let reduction = self.policy.reduce(&mut self.population, self.sweep)?;

        self.radius *= 1.0 - self.settings.radius_decay;
        if self.radius < RADIUS_WARN_THRESHOLD && !self.radius_warned {
            tracing::warn!(
                radius = self.radius,
                sweep = self.sweep,
                "Influence radius has collapsed; remaining neurons will only be removed as lazy"
            );
            self.radius_warned = true;
        }

        let report = SweepReport {
            sweep: self.sweep,
            alive: self.alive_count(),
            reduction,
            radius,
            adjustments,
        };
        self.stats.record_sweep(&report);
        Ok(report)
    }

    /// Sweeps until the population reaches the expected cluster count.
    pub fn run(&mut self, inputs: &[Features]) -> Result<TrainingSummary> {
        if inputs.is_empty() {
            return Err(ClusterError::EmptyTrainingSet);
        }
        while !self.is_completed() {
            self.sweep(inputs)?;
        }
        let summary = self.stats.summary();
        tracing::info!(
            sweeps = summary.sweeps,
            adjustments = summary.adjustments,
            prototypes = self.alive_count(),
            "Training completed"
        );
        Ok(summary)
    }

    /// Surviving neurons in slot order.
    #[must_use]
    pub fn prototypes(&self) -> Vec<Neuron> {
        self.population.alive_neurons()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyKind;
    use crate::policy::{CorrelationMerge, QuotaPruning};

    fn settings(population: usize, expected: usize) -> EngineSettings {
        EngineSettings {
            population_size: population,
            expected_cluster_count: expected,
            initial_radius: 2.5,
            ..Default::default()
        }
    }

    fn inputs() -> Vec<Features> {
        vec![
            [0.6, 0.0, 0.0, 0.0, -0.8],
            [0.0, 0.6, 0.0, 0.0, -0.8],
            [0.0, 0.0, 0.6, 0.0, -0.8],
        ]
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let mut rng = RandomSource::seeded(1);
        let err = Engine::new(settings(3, 3), &mut rng).unwrap_err();
        assert!(matches!(err, ClusterError::InvalidSettings(_)));
    }

    #[test]
    fn test_run_rejects_empty_inputs() {
        let mut rng = RandomSource::seeded(1);
        let mut engine = Engine::new(settings(10, 3), &mut rng).unwrap();
        assert_eq!(engine.run(&[]), Err(ClusterError::EmptyTrainingSet));
        assert_eq!(engine.sweeps(), 0);
    }

    #[test]
    fn test_run_reaches_expected_count() {
        let mut rng = RandomSource::seeded(2);
        let mut engine = Engine::new(settings(30, 3), &mut rng).unwrap();
        let summary = engine.run(&inputs()).unwrap();
        assert!(engine.is_completed());
        assert_eq!(engine.prototypes().len(), 3);
        assert_eq!(summary.sweeps, engine.sweeps());
    }

    #[test]
    fn test_radius_decays_every_sweep() {
        let mut rng = RandomSource::seeded(3);
        let mut engine = Engine::new(settings(30, 3), &mut rng).unwrap();
        let r0 = engine.radius();
        let report = engine.sweep(&inputs()).unwrap();
        assert_eq!(report.radius, r0);
        assert!((engine.radius() - r0 * 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_after_completion_is_noop() {
        let mut rng = RandomSource::seeded(4);
        let mut engine = Engine::new(settings(10, 3), &mut rng).unwrap();
        engine.run(&inputs()).unwrap();
        let sweeps = engine.sweeps();
        let radius = engine.radius();
        let report = engine.sweep(&inputs()).unwrap();
        assert_eq!(report.reduction.total(), 0);
        assert_eq!(engine.sweeps(), sweeps);
        assert_eq!(engine.radius(), radius);
    }

    #[test]
    fn test_injected_quota_policy_must_remove_neurons() {
        assert!(matches!(
            QuotaPruning::new(0.0, 0),
            Err(ClusterError::InvalidSettings(_))
        ));

        // A zero kill fraction still terminates once every sweep must kill one.
        let mut rng = RandomSource::seeded(8);
        let policy = Box::new(QuotaPruning::new(0.0, 1).unwrap());
        let mut engine = Engine::with_policy(settings(10, 3), policy, &mut rng).unwrap();
        engine.run(&inputs()).unwrap();
        assert_eq!(engine.alive_count(), 3);
        assert!(engine.sweeps() <= 7);
    }

    #[test]
    fn test_large_radius_touches_every_neuron() {
        let mut rng = RandomSource::seeded(5);
        let s = EngineSettings {
            influence: InfluenceMode::Radius,
            ..settings(20, 3)
        };
        let mut engine = Engine::new(s, &mut rng).unwrap();
        let report = engine.sweep(&inputs()).unwrap();
        // Unit vectors are never more than 2 apart, and 2 < 2.5.
        assert_eq!(report.adjustments, 20 * 3);
        assert_eq!(report.reduction.lazy, 0);
    }

    #[test]
    fn test_winner_mode_adjusts_one_per_input() {
        let mut rng = RandomSource::seeded(6);
        let s = EngineSettings {
            influence: InfluenceMode::WinnerTakesAll,
            ..settings(20, 3)
        };
        let mut engine = Engine::new(s, &mut rng).unwrap();
        let report = engine.sweep(&inputs()).unwrap();
        assert_eq!(report.adjustments, 3);
    }

    #[test]
    fn test_merge_policy_terminates() {
        let mut rng = RandomSource::seeded(7);
        let s = EngineSettings {
            policy: PolicyKind::Merge,
            merge_interval: 2,
            ..settings(12, 3)
        };
        let mut engine = Engine::new(s, &mut rng).unwrap();
        assert_eq!(engine.policy_name(), "merge");
        engine.run(&inputs()).unwrap();
        assert_eq!(engine.prototypes().len(), 3);
    }

    #[test]
    fn test_from_neurons_uses_given_population() {
        let neurons = vec![
            Neuron::from_weights([1.0, 0.0, 0.0, 0.0, 0.0]),
            Neuron::from_weights([0.0, 1.0, 0.0, 0.0, 0.0]),
            Neuron::from_weights([0.0, 0.0, 1.0, 0.0, 0.0]),
        ];
        let engine = Engine::from_neurons(
            settings(1000, 1),
            Box::new(CorrelationMerge::new(1).unwrap()),
            neurons,
        )
        .unwrap();
        assert_eq!(engine.settings().population_size, 3);
        assert_eq!(
            engine.best_matching_unit(&[0.1, 0.9, 0.0, 0.0, 0.0]),
            Some(1)
        );
    }
}
