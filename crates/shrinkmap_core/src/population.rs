//! Neuron population with per-slot liveness.
//!
//! Slots are addressed by stable index for the whole run. Removal only flips
//! a slot to `Dead`; nothing is reordered or deallocated. Every kill checks
//! the floor first, so the alive count can never drop below it.

use crate::error::Result;
use crate::neuron::NeuronLogic;
use shrinkmap_data::{Features, Neuron, SlotState};

#[derive(Debug, Clone)]
pub struct Population {
    neurons: Vec<Neuron>,
    states: Vec<SlotState>,
    alive: usize,
    floor: usize,
}

impl Population {
    /// All slots start alive and `Idle`.
    #[must_use]
    pub fn new(neurons: Vec<Neuron>, floor: usize) -> Self {
        let alive = neurons.len();
        Self {
            states: vec![SlotState::Idle; alive],
            neurons,
            alive,
            floor,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive
    }

    /// Alive count below which no kill is allowed.
    #[must_use]
    pub fn floor(&self) -> usize {
        self.floor
    }

    #[must_use]
    pub fn at_floor(&self) -> bool {
        self.alive <= self.floor
    }

    #[must_use]
    pub fn neuron(&self, index: usize) -> &Neuron {
        &self.neurons[index]
    }

    #[must_use]
    pub fn state(&self, index: usize) -> SlotState {
        self.states[index]
    }

    #[must_use]
    pub fn is_alive(&self, index: usize) -> bool {
        self.states[index].is_alive()
    }

    pub fn alive_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_alive())
            .map(|(i, _)| i)
    }

    /// Weights of every alive neuron, in slot order.
    #[must_use]
    pub fn alive_neurons(&self) -> Vec<Neuron> {
        self.alive_indices().map(|i| self.neurons[i]).collect()
    }

    /// Clears last sweep's activity; dead slots stay dead.
    pub fn reset_activity(&mut self) {
        for s in self.states.iter_mut().filter(|s| s.is_alive()) {
            *s = SlotState::Idle;
        }
    }

    /// Adjusts neuron `index` toward `input` and keeps the larger of the
    /// stored score and the resulting displacement.
    pub fn train(&mut self, index: usize, input: &Features, learning_rate: f64) -> Result<f64> {
        let moved = self.neurons[index].adjust(input, learning_rate)?;
        let state = &mut self.states[index];
        match *state {
            SlotState::Idle => *state = SlotState::Active(moved),
            SlotState::Active(score) if moved > score => *state = SlotState::Active(moved),
            _ => {}
        }
        Ok(moved)
    }

    /// Alive neuron closest to `input`; ties go to the lowest index.
    #[must_use]
    pub fn best_matching_unit(&self, input: &Features) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for i in self.alive_indices() {
            let d = self.neurons[i].squared_distance(input);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Marks `index` dead unless that would cross the floor or the slot is
    /// already dead. Returns whether a kill happened.
    pub fn kill(&mut self, index: usize) -> bool {
        if self.at_floor() || !self.states[index].is_alive() {
            return false;
        }
        self.states[index] = SlotState::Dead;
        self.alive -= 1;
        true
    }

    /// Kills every `Idle` neuron in slot order, stopping at the floor.
    pub fn eliminate_lazy(&mut self) -> usize {
        let mut killed = 0;
        for i in 0..self.states.len() {
            if self.at_floor() {
                break;
            }
            if self.states[i].is_idle() && self.kill(i) {
                tracing::debug!(slot = i, "Lazy neuron eliminated");
                killed += 1;
            }
        }
        killed
    }

    /// Alive neuron with the highest distortion score. Ties resolve to the
    /// lowest index. `Idle` slots count as score zero.
    #[must_use]
    pub fn most_distorted(&self) -> Option<usize> {
        let mut worst: Option<(usize, f64)> = None;
        for (i, s) in self.states.iter().enumerate() {
            let score = match s {
                SlotState::Dead => continue,
                SlotState::Idle => 0.0,
                SlotState::Active(score) => *score,
            };
            if worst.map_or(true, |(_, ws)| score > ws) {
                worst = Some((i, score));
            }
        }
        worst.map(|(i, _)| i)
    }

    /// Alive pair `(i, j)`, `i < j`, with the largest dot product. Ties keep
    /// the first pair in scan order.
    #[must_use]
    pub fn most_similar_pair(&self) -> Option<(usize, usize)> {
        let alive: Vec<usize> = self.alive_indices().collect();
        let mut best: Option<((usize, usize), f64)> = None;
        for (a, &i) in alive.iter().enumerate() {
            for &j in &alive[a + 1..] {
                let sim = self.neurons[i].similarity(&self.neurons[j]);
                if best.map_or(true, |(_, bs)| sim > bs) {
                    best = Some(((i, j), sim));
                }
            }
        }
        best.map(|(pair, _)| pair)
    }

    /// Averages `absorbed` into `into` and kills `absorbed`. Leaves both
    /// untouched when at the floor.
    pub fn merge(&mut self, absorbed: usize, into: usize) -> Result<bool> {
        if self.at_floor() || !self.is_alive(absorbed) || !self.is_alive(into) {
            return Ok(false);
        }
        let source = self.neurons[absorbed];
        self.neurons[into].average_with(&source)?;
        Ok(self.kill(absorbed))
    }
}
