use std::hash::Hash;

use env::rand::rngs::StdRng;
use env::rand::{Rng, SeedableRng};

use super::exploration::EpsilonSchedule;
use super::policy::epsilon_greedy;
use super::q_table::QTable;
use super::q_utils::{max_value, max_value_over};
use crate::config::QLearningConfig;
use crate::error::Result;

fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(env::rand::rng().random()),
    }
}

/// Tabular Q-learning agent.
///
/// Owns its action-value table, its exploration schedule and the random
/// source used for exploration, so two agents built with the same seed make
/// the same choices.
#[derive(Debug, Clone)]
pub struct QLearningAgent<S> {
    pub(crate) table: QTable<S>,
    alpha: f32,
    gamma: f32,
    exploration: EpsilonSchedule,
    rng: StdRng,
}

impl<S> QLearningAgent<S>
where
    S: Clone + Eq + Hash,
{
    pub fn new(n_actions: usize, config: QLearningConfig, seed: Option<u64>) -> Result<Self> {
        Self::from_table(QTable::new(n_actions), config, seed)
    }

    /// Fails with [`crate::Error::InvalidConfig`] when `config` is out of range.
    pub fn from_table(table: QTable<S>, config: QLearningConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            table,
            alpha: config.alpha,
            gamma: config.gamma,
            exploration: EpsilonSchedule::new(
                config.epsilon,
                config.epsilon_min,
                config.epsilon_decay,
            ),
            rng: build_rng(seed),
        })
    }

    pub fn table(&self) -> &QTable<S> {
        &self.table
    }

    pub fn n_actions(&self) -> usize {
        self.table.n_actions()
    }

    pub fn epsilon(&self) -> f32 {
        self.exploration.epsilon()
    }

    /// Action values for `state`, creating a zero row if the state is new.
    pub fn q_values(&mut self, state: &S) -> &[f32] {
        self.table.get(state)
    }

    /// Epsilon-greedy choice at the current exploration rate.
    pub fn choose(&mut self, state: &S, valid: &[usize]) -> Option<usize> {
        let epsilon = self.exploration.epsilon();
        self.choose_with_epsilon(state, epsilon, valid)
    }

    pub fn choose_with_epsilon(&mut self, state: &S, epsilon: f32, valid: &[usize]) -> Option<usize> {
        epsilon_greedy(&mut self.table, state, epsilon, valid, &mut self.rng)
    }

    pub fn greedy(&mut self, state: &S, valid: &[usize]) -> Option<usize> {
        self.choose_with_epsilon(state, 0.0, valid)
    }

    /// One-step Q-learning update.
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)], with the bootstrap
    /// term dropped on terminal transitions.
    pub fn update(&mut self, state: &S, action: usize, reward: f32, next_state: &S, done: bool) {
        let next = self.table.get(next_state);
        let target = if done {
            reward
        } else {
            reward + self.gamma * max_value(next)
        };
        self.apply(state, action, target);
    }

    /// Same as [`Self::update`] but the bootstrap maximum only ranges over
    /// `next_valid`, so slots of illegal actions never leak into the target.
    pub fn update_restricted(
        &mut self,
        state: &S,
        action: usize,
        reward: f32,
        next_state: &S,
        next_valid: &[usize],
        done: bool,
    ) {
        let next = self.table.get(next_state);
        let target = if done {
            reward
        } else {
            reward + self.gamma * max_value_over(next, next_valid)
        };
        self.apply(state, action, target);
    }

    fn apply(&mut self, state: &S, action: usize, target: f32) {
        let alpha = self.alpha;
        let q = &mut self.table.get(state)[action];
        let current = *q;
        *q = current + alpha * (target - current);
    }

    pub fn decay_epsilon(&mut self) -> f32 {
        self.exploration.decay()
    }
}
