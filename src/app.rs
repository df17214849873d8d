//! End-to-end pipeline: load → preprocess → train → evaluate.

use anyhow::{Context, Result};
use serde::Serialize;
use shrinkmap_core::{Engine, Neuron, RandomSource, TrainingSummary};
use shrinkmap_io::{Dataset, PrepareOptions, RawSample};

use crate::model::config::AppConfig;
use crate::model::evaluation::{self, ContingencyTable};

/// Everything a run produces, in a form the CLI can print or serialize.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub fingerprint: String,
    pub seed: Option<u64>,
    pub policy: &'static str,
    pub training_samples: usize,
    pub test_samples: usize,
    pub summary: TrainingSummary,
    pub prototypes: Vec<Neuron>,
    pub table: ContingencyTable,
}

pub struct Clusterizer {
    config: AppConfig,
}

impl Clusterizer {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Loads the dataset named in the configuration and runs on it.
    pub fn run(&self) -> Result<RunReport> {
        let samples = shrinkmap_io::load(&self.config.dataset.path)?;
        self.run_with_samples(samples)
    }

    /// Runs on already-parsed samples.
    pub fn run_with_samples(&self, samples: Vec<RawSample>) -> Result<RunReport> {
        let mut rng = RandomSource::new(self.config.run.seed);
        match rng.seed() {
            Some(seed) => tracing::info!(seed, "Random source seeded"),
            None => tracing::info!("Random source seeded from entropy"),
        }

        let options = PrepareOptions {
            training_set_size: self.config.dataset.training_set_size,
            sphere_radius: self.config.engine.sphere_radius,
            balance_signs: self.config.dataset.balance_signs,
        };
        let dataset = Dataset::prepare(samples, &options, &mut rng)?;

        let mut engine = Engine::new(self.config.engine.clone(), &mut rng)
            .context("failed to build clustering engine")?;
        let summary = engine
            .run(&dataset.train_features())
            .context("training failed")?;

        let prototypes = engine.prototypes();
        let table = evaluation::evaluate(&prototypes, dataset.test())?;
        tracing::info!(
            purity = table.purity(),
            evaluated = table.total(),
            "Evaluation finished"
        );

        Ok(RunReport {
            fingerprint: self.config.fingerprint(),
            seed: rng.seed(),
            policy: engine.policy_name(),
            training_samples: dataset.train().len(),
            test_samples: dataset.test().len(),
            summary,
            prototypes,
            table,
        })
    }
}

/// Human-readable settings block printed before training.
#[must_use]
pub fn render_settings(config: &AppConfig) -> String {
    let e = &config.engine;
    let lines = [
        format!(
            " - training set size:                              {:>6}",
            config.dataset.training_set_size
        ),
        format!(
            " - initial no of neurons:                          {:>6}",
            e.population_size
        ),
        format!(
            " - expected cluster count:                         {:>6}",
            e.expected_cluster_count
        ),
        format!(
            " - radius of normalization sphere:                 {:>6.2}",
            e.sphere_radius
        ),
        format!(
            " - initial radius of input influence:              {:>6.2}",
            e.initial_radius
        ),
        format!(
            " - learning rate (neuron adjustment strength):     {:>6.2}",
            e.learning_rate
        ),
        format!(
            " - radius decay per sweep:                         {:>6.2}",
            e.radius_decay
        ),
        format!(
            " - ratio of neurons killed per sweep:              {:>6.2}",
            e.kill_fraction
        ),
        format!(
            " - minimal number of neurons killed per sweep:     {:>6}",
            e.kill_minimum
        ),
        format!(
            " - population control:                             {:>6}",
            format!("{:?}", e.policy).to_lowercase()
        ),
    ];
    lines.join("\n")
}

/// Plain-text report: summary line, contingency table and purity.
#[must_use]
pub fn render_report(report: &RunReport) -> String {
    let mut out = format!(
        "Training completed after {} sweeps ({} policy, {} prototypes).\n\n",
        report.summary.sweeps,
        report.policy,
        report.prototypes.len()
    );
    out.push_str(&report.table.render());
    out.push_str(&format!(
        "purity: {:.2}% over {} test samples\n",
        report.table.purity() * 100.0,
        report.table.total()
    ));
    out
}
