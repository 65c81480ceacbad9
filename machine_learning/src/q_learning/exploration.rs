use serde::{Deserialize, Serialize};

/// Multiplicative per-episode decay of the exploration rate, clamped at a floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpsilonSchedule {
    epsilon: f32,
    epsilon_min: f32,
    epsilon_decay: f32,
}

impl EpsilonSchedule {
    pub fn new(epsilon: f32, epsilon_min: f32, epsilon_decay: f32) -> Self {
        Self {
            epsilon,
            epsilon_min,
            epsilon_decay,
        }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    // once per finished episode
    pub fn decay(&mut self) -> f32 {
        self.epsilon = self.epsilon_min.max(self.epsilon * self.epsilon_decay);
        self.epsilon
    }
}
