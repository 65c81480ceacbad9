mod agent;
mod exploration;
mod persistence;
mod policy;
mod q_learning;
mod q_table;
mod q_utils;

pub use agent::QLearningAgent;
pub use exploration::EpsilonSchedule;
pub use policy::epsilon_greedy;
pub use q_learning::{
    evaluate, run_episode, train, EpisodeResult, EvaluationReport, RollingStats, TrainingSummary,
};
pub use q_table::QTable;
pub use q_utils::{action_indices, greedy_ties, max_value, max_value_over};
