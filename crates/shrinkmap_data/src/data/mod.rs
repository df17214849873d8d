//! Core data structures for the shrinkmap engine.

pub mod features;
pub mod neuron;
