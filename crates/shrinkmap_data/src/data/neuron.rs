use super::features::Features;
use serde::{Deserialize, Serialize};

/// A single prototype vector competing for inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    /// Weight vector, kept at unit length.
    pub weights: Features,
}

impl Neuron {
    #[must_use]
    pub fn from_weights(weights: Features) -> Self {
        Self { weights }
    }
}

/// Liveness and activity of one population slot during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum SlotState {
    /// Alive, but no input reached it this sweep.
    #[default]
    Idle,
    /// Alive; holds the largest squared displacement seen this sweep.
    Active(f64),
    /// Removed from the population for the rest of the run.
    Dead,
}

impl SlotState {
    #[must_use]
    pub fn is_alive(self) -> bool {
        !matches!(self, SlotState::Dead)
    }

    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, SlotState::Idle)
    }

    /// Distortion score, `None` unless the slot is `Active`.
    #[must_use]
    pub fn score(self) -> Option<f64> {
        match self {
            SlotState::Active(score) => Some(score),
            _ => None,
        }
    }
}
