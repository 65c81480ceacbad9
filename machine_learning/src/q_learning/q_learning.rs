use std::collections::VecDeque;
use std::hash::Hash;
use std::path::Path;

use env::{ActionIndex, Env, StepInfo};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::agent::QLearningAgent;
use super::q_utils::action_indices;
use crate::config::TrainConfig;
use crate::error::Result;

/// Averages over the most recent episodes.
#[derive(Debug, Clone)]
pub struct RollingStats {
    capacity: usize,
    scores: VecDeque<f32>,
    rewards: VecDeque<f32>,
}

impl RollingStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            scores: VecDeque::with_capacity(capacity),
            rewards: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, score: f32, reward: f32) {
        if self.scores.len() >= self.capacity {
            self.scores.pop_front();
            self.rewards.pop_front();
        }
        self.scores.push_back(score);
        self.rewards.push_back(reward);
    }

    pub fn avg_score(&self) -> f32 {
        mean(&self.scores)
    }

    pub fn avg_reward(&self) -> f32 {
        mean(&self.rewards)
    }
}

fn mean(values: &VecDeque<f32>) -> f32 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f32>() / values.len() as f32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub final_epsilon: f32,
    pub table_size: usize,
    pub avg_score: f32,
    pub avg_reward: f32,
    pub best_score: f32,
    /// Table saves written, autosaves and the final save.
    pub checkpoints: usize,
}

/// Outcome of one episode run by [`run_episode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeResult {
    pub steps: usize,
    pub total_reward: f32,
    pub score: f32,
    pub done: bool,
}

/// Plays one episode from `env.reset()`.
///
/// With `learn` set, every transition is fed to the update rule right after the
/// step that produced it; the exploration rate is left alone either way.
pub fn run_episode<E>(
    env: &mut E,
    agent: &mut QLearningAgent<E::State>,
    epsilon: f32,
    max_steps: usize,
    learn: bool,
) -> EpisodeResult
where
    E: Env,
    E::State: Clone + Eq + Hash,
{
    let mut state = env.reset();
    let mut result = EpisodeResult {
        steps: 0,
        total_reward: 0.0,
        score: 0.0,
        done: false,
    };

    for _ in 0..max_steps {
        let legal = action_indices(&env.legal_actions());
        let Some(index) = agent.choose_with_epsilon(&state, epsilon, &legal) else {
            break;
        };
        let Some(action) = E::Action::from_index(index) else {
            break;
        };

        let (next_state, reward, done, info) = env.step(action);
        if learn {
            let next_legal = if done {
                Vec::new()
            } else {
                action_indices(&env.legal_actions())
            };
            agent.update_restricted(&state, index, reward, &next_state, &next_legal, done);
        }

        result.steps += 1;
        result.total_reward += reward;
        result.score = info.score();
        state = next_state;

        if done {
            result.done = true;
            break;
        }
    }

    result
}

/// Trains `agent` on `env` for `config.episodes` episodes.
///
/// The first `config.easy_episodes` episodes run with the environment's
/// simplified settings. Epsilon decays once after every episode. When a
/// checkpoint path is given the table is saved every `autosave_every`
/// episodes and once more at the end.
pub fn train<E>(
    env: &mut E,
    agent: &mut QLearningAgent<E::State>,
    config: &TrainConfig,
    checkpoint: Option<&Path>,
) -> Result<TrainingSummary>
where
    E: Env,
    E::State: Clone + Eq + Hash + Serialize + DeserializeOwned,
{
    config.validate()?;

    let mut stats = RollingStats::new(config.stats_window);
    let mut best_score = f32::NEG_INFINITY;
    let mut checkpoints = 0;

    for episode in 1..=config.episodes {
        let easy = episode <= config.easy_episodes;
        env.set_training_easy(easy);

        let epsilon = agent.epsilon();
        let result = run_episode(env, agent, epsilon, config.max_steps_per_episode, true);
        agent.decay_epsilon();

        stats.push(result.score, result.total_reward);
        best_score = best_score.max(result.score);

        if config.log_every > 0 && episode % config.log_every == 0 {
            info!(
                episode,
                episodes = config.episodes,
                avg_score = stats.avg_score(),
                avg_reward = stats.avg_reward(),
                epsilon = agent.epsilon(),
                easy,
                states = agent.table().len(),
                "training progress"
            );
        }

        if let Some(path) = checkpoint {
            if config.autosave_every > 0 && episode % config.autosave_every == 0 {
                agent.save(path)?;
                checkpoints += 1;
                debug!(episode, path = %path.display(), "checkpoint saved");
            }
        }
    }

    if let Some(path) = checkpoint {
        agent.save(path)?;
        checkpoints += 1;
        info!(path = %path.display(), states = agent.table().len(), "training finished, table saved");
    }

    Ok(TrainingSummary {
        episodes: config.episodes,
        final_epsilon: agent.epsilon(),
        table_size: agent.table().len(),
        avg_score: stats.avg_score(),
        avg_reward: stats.avg_reward(),
        best_score: if config.episodes == 0 { 0.0 } else { best_score },
        checkpoints,
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationReport {
    pub scores: Vec<f32>,
    pub rewards: Vec<f32>,
}

impl EvaluationReport {
    pub fn episodes(&self) -> usize {
        self.scores.len()
    }

    pub fn mean_score(&self) -> f32 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.scores.iter().sum::<f32>() / self.scores.len() as f32
        }
    }

    pub fn mean_reward(&self) -> f32 {
        if self.rewards.is_empty() {
            0.0
        } else {
            self.rewards.iter().sum::<f32>() / self.rewards.len() as f32
        }
    }
}

/// Greedy playback: epsilon 0, no learning.
pub fn evaluate<E>(
    env: &mut E,
    agent: &mut QLearningAgent<E::State>,
    episodes: usize,
    max_steps: usize,
) -> EvaluationReport
where
    E: Env,
    E::State: Clone + Eq + Hash,
{
    env.set_training_easy(false);
    let mut report = EvaluationReport::default();
    for _ in 0..episodes {
        let result = run_episode(env, agent, 0.0, max_steps, false);
        report.scores.push(result.score);
        report.rewards.push(result.total_reward);
    }
    report
}
