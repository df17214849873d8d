//! Training statistics and structured logging.

use crate::policy::Reduction;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Outcome of a single sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepReport {
    /// 1-based sweep number.
    pub sweep: usize,
    /// Alive neurons after population control.
    pub alive: usize,
    pub reduction: Reduction,
    /// Radius in effect during the sweep.
    pub radius: f64,
    /// Neuron adjustments performed.
    pub adjustments: usize,
}

/// Accumulated counters for one training run.
#[derive(Debug, Clone)]
pub struct TrainingStats {
    sweeps: usize,
    adjustments: usize,
    lazy: usize,
    distorted: usize,
    merged: usize,
    population: usize,
    start_time: Instant,
}

impl TrainingStats {
    #[must_use]
    pub fn new(population: usize) -> Self {
        Self {
            sweeps: 0,
            adjustments: 0,
            lazy: 0,
            distorted: 0,
            merged: 0,
            population,
            start_time: Instant::now(),
        }
    }

    /// Folds a sweep into the totals and logs it.
    pub fn record_sweep(&mut self, report: &SweepReport) {
        self.sweeps += 1;
        self.adjustments += report.adjustments;
        self.lazy += report.reduction.lazy;
        self.distorted += report.reduction.distorted;
        self.merged += report.reduction.merged;

        let remaining = report.alive as f64 / self.population.max(1) as f64 * 100.0;
        tracing::info!(
            sweep = report.sweep,
            alive = report.alive,
            population = self.population,
            remaining_pct = %format_args!("{remaining:.2}"),
            lazy = report.reduction.lazy,
            killed = report.reduction.distorted,
            merged = report.reduction.merged,
            radius = report.radius,
            "Sweep finished"
        );
    }

    #[must_use]
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    #[must_use]
    pub fn adjustments(&self) -> usize {
        self.adjustments
    }

    /// Neurons removed so far, by any means.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.lazy + self.distorted + self.merged
    }

    #[must_use]
    pub fn summary(&self) -> TrainingSummary {
        TrainingSummary {
            sweeps: self.sweeps,
            adjustments: self.adjustments,
            lazy: self.lazy,
            distorted: self.distorted,
            merged: self.merged,
            elapsed: self.start_time.elapsed(),
        }
    }
}

/// Snapshot of [`TrainingStats`] returned when a run completes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingSummary {
    pub sweeps: usize,
    pub adjustments: usize,
    pub lazy: usize,
    pub distorted: usize,
    pub merged: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
