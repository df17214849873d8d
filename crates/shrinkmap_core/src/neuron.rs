//! Behaviour of a single prototype neuron.

use crate::error::Result;
use crate::geometry;
use crate::random::RandomSource;
use shrinkmap_data::{Features, Neuron};

/// Trait defining the competitive-learning operations on a neuron.
pub trait NeuronLogic {
    /// Random neuron: raw coordinates uniform in `[-1, 1)`, projected at
    /// `sphere_radius` and scaled to unit length.
    fn new_random(rng: &mut RandomSource, sphere_radius: f64) -> Result<Self>
    where
        Self: Sized;

    #[must_use]
    fn squared_distance(&self, input: &Features) -> f64;

    #[must_use]
    fn distance(&self, input: &Features) -> f64;

    /// Moves the weights a `learning_rate` fraction toward `input`, then
    /// renormalizes. Returns the squared displacement of the weights.
    fn adjust(&mut self, input: &Features, learning_rate: f64) -> Result<f64>;

    /// Replaces the weights with the normalized mean of both neurons.
    fn average_with(&mut self, other: &Self) -> Result<()>;

    #[must_use]
    fn similarity(&self, other: &Self) -> f64;
}

impl NeuronLogic for Neuron {
    fn new_random(rng: &mut RandomSource, sphere_radius: f64) -> Result<Self> {
        let raw = rng.initial_weights();
        Ok(Neuron::from_weights(geometry::embed(&raw, sphere_radius)?))
    }

    fn squared_distance(&self, input: &Features) -> f64 {
        geometry::squared_distance(&self.weights, input)
    }

    fn distance(&self, input: &Features) -> f64 {
        self.squared_distance(input).sqrt()
    }

    fn adjust(&mut self, input: &Features, learning_rate: f64) -> Result<f64> {
        let prev = self.weights;
        for (w, x) in self.weights.iter_mut().zip(input) {
            *w += learning_rate * (x - *w);
        }
        if let Err(e) = geometry::normalize(&mut self.weights) {
            self.weights = prev;
            return Err(e);
        }
        Ok(geometry::squared_distance(&prev, &self.weights))
    }

    fn average_with(&mut self, other: &Self) -> Result<()> {
        let mut merged = self.weights;
        for (w, o) in merged.iter_mut().zip(&other.weights) {
            *w = (*w + o) / 2.0;
        }
        geometry::normalize(&mut merged)?;
        self.weights = merged;
        Ok(())
    }

    fn similarity(&self, other: &Self) -> f64 {
        geometry::dot(&self.weights, &other.weights)
    }
}
