//! Owned pseudo-random source.
//!
//! One `RandomSource` is built per run and handed by `&mut` to everything
//! stochastic (dataset shuffling, neuron initialization). A fixed seed makes
//! the whole pipeline reproducible.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shrinkmap_data::{RawFeatures, RAW_DIMENSIONS};

#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
    seed: Option<u64>,
}

impl RandomSource {
    /// Deterministic stream for the given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Stream seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Uniform real in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform real in `[-1, 1)`.
    pub fn symmetric(&mut self) -> f64 {
        self.uniform() * 2.0 - 1.0
    }

    /// Bernoulli trial succeeding with probability `p` (clamped to `[0, 1]`).
    pub fn chance(&mut self, p: f64) -> bool {
        p.clamp(0.0, 1.0) > self.uniform()
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Raw starting point for a neuron, each coordinate in `[-1, 1)`.
    pub fn initial_weights(&mut self) -> RawFeatures {
        let mut raw = [0.0; RAW_DIMENSIONS];
        for w in raw.iter_mut() {
            *w = self.symmetric();
        }
        raw
    }
}
