use std::hash::Hash;
use std::path::PathBuf;

use anyhow::{Context, Result};
use env::{ActionIndex, Env};
use games::dino::{Game, RunnerAction};
use games::tictactoe::{Square, TicTacToe};
use machine_learning::q_learning::{evaluate, train, QLearningAgent};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::cli::{GameKind, TrainArgs};
use crate::config::RunConfig;
use crate::opponent_for;

/// Greedy games played after training to report how the table does.
const CHECK_EPISODES: usize = 100;

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = RunConfig::resolve(&args)?;
    let table = args.table.clone().unwrap_or_else(|| args.game.default_table());

    info!(
        game = ?args.game,
        episodes = config.training.episodes,
        easy_episodes = config.training.easy_episodes,
        alpha = config.agent.alpha,
        gamma = config.agent.gamma,
        table = %table.display(),
        "starting training"
    );

    match args.game {
        GameKind::Runner => {
            let game = Game::new(args.seed);
            run(game, RunnerAction::COUNT, &config, table, args.seed)
        }
        GameKind::Tictactoe => {
            let game = TicTacToe::new(opponent_for(args.opponent, args.seed));
            run(game, Square::COUNT, &config, table, args.seed)
        }
    }
}

fn run<E>(mut env: E, n_actions: usize, config: &RunConfig, table: PathBuf, seed: Option<u64>) -> Result<()>
where
    E: Env,
    E::State: Clone + Eq + Hash + Serialize + DeserializeOwned,
{
    let agent_seed = seed.map(|s| s.wrapping_add(1));
    let mut agent = QLearningAgent::new(n_actions, config.agent, agent_seed)?;

    let summary = train(&mut env, &mut agent, &config.training, Some(table.as_path()))
        .with_context(|| format!("training failed, table path {}", table.display()))?;

    info!(
        episodes = summary.episodes,
        states = summary.table_size,
        epsilon = summary.final_epsilon,
        avg_score = summary.avg_score,
        avg_reward = summary.avg_reward,
        best_score = summary.best_score,
        checkpoints = summary.checkpoints,
        "training summary"
    );

    let report = evaluate(
        &mut env,
        &mut agent,
        CHECK_EPISODES,
        config.training.max_steps_per_episode,
    );
    info!(
        episodes = report.episodes(),
        mean_score = report.mean_score(),
        mean_reward = report.mean_reward(),
        "greedy check"
    );
    Ok(())
}
