//! Hyper-parameters for the agent and the training loop.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Learning-rate, discount and exploration settings of a Q-learning agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    pub alpha: f32,
    pub gamma: f32,
    pub epsilon: f32,
    pub epsilon_min: f32,
    pub epsilon_decay: f32,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.20,
            gamma: 0.99,
            epsilon: 1.0,
            epsilon_min: 0.10,
            epsilon_decay: 0.9997,
        }
    }
}

impl QLearningConfig {
    pub fn tictactoe() -> Self {
        Self {
            alpha: 0.5,
            gamma: 0.9,
            epsilon: 1.0,
            epsilon_min: 0.05,
            epsilon_decay: 0.9995,
        }
    }

    /// Same settings with exploration switched off, for playback.
    pub fn greedy(self) -> Self {
        Self {
            epsilon: 0.0,
            epsilon_min: 0.0,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(Error::config(format!("alpha must be in (0, 1], got {}", self.alpha)));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(Error::config(format!("gamma must be in [0, 1], got {}", self.gamma)));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::config(format!("epsilon must be in [0, 1], got {}", self.epsilon)));
        }
        if !(0.0..=1.0).contains(&self.epsilon_min) {
            return Err(Error::config(format!(
                "epsilon_min must be in [0, 1], got {}",
                self.epsilon_min
            )));
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(Error::config(format!(
                "epsilon_decay must be in (0, 1], got {}",
                self.epsilon_decay
            )));
        }
        Ok(())
    }
}

/// Episode budget, curriculum length and reporting cadence of [`crate::q_learning::train`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub episodes: usize,
    /// Episodes at the start of training that run with the simplified environment.
    pub easy_episodes: usize,
    pub max_steps_per_episode: usize,
    /// 0 disables progress records.
    pub log_every: usize,
    /// 0 disables intermediate checkpoints; the final save still happens.
    pub autosave_every: usize,
    pub stats_window: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            episodes: 12_000,
            easy_episodes: 2_000,
            max_steps_per_episode: 20_000,
            log_every: 100,
            autosave_every: 500,
            stats_window: 100,
        }
    }
}

impl TrainConfig {
    pub fn tictactoe() -> Self {
        Self {
            episodes: 20_000,
            easy_episodes: 0,
            max_steps_per_episode: 9,
            log_every: 1_000,
            autosave_every: 5_000,
            stats_window: 100,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_steps_per_episode == 0 {
            return Err(Error::config("max_steps_per_episode must be positive"));
        }
        if self.stats_window == 0 {
            return Err(Error::config("stats_window must be positive"));
        }
        Ok(())
    }
}
