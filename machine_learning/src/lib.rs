//! Tabular Q-learning: action-value table, epsilon-greedy policy, the one-step
//! TD update, per-episode exploration decay and the loop that drives them
//! against an [`env::Env`].

pub mod config;
pub mod error;
pub mod q_learning;

pub use config::{QLearningConfig, TrainConfig};
pub use error::{Error, Result};
