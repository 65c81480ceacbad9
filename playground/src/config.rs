use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use machine_learning::{QLearningConfig, TrainConfig};
use serde::Deserialize;

use crate::cli::{GameKind, TrainArgs};

/// Layout of the optional `--config` file. Missing sections keep the
/// per-game presets; missing fields inside a section keep the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    agent: Option<QLearningConfig>,
    training: Option<TrainConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub agent: QLearningConfig,
    pub training: TrainConfig,
}

impl RunConfig {
    pub fn preset(game: GameKind) -> Self {
        match game {
            GameKind::Runner => RunConfig {
                agent: QLearningConfig::default(),
                training: TrainConfig::default(),
            },
            GameKind::Tictactoe => RunConfig {
                agent: QLearningConfig::tictactoe(),
                training: TrainConfig::tictactoe(),
            },
        }
    }

    pub fn resolve(args: &TrainArgs) -> Result<Self> {
        let mut config = Self::preset(args.game);

        if let Some(path) = &args.config {
            let file = read_file(path)?;
            if let Some(agent) = file.agent {
                config.agent = agent;
            }
            if let Some(training) = file.training {
                config.training = training;
            }
        }
        if let Some(episodes) = args.episodes {
            config.training.episodes = episodes;
        }
        if let Some(easy) = args.easy_episodes {
            config.training.easy_episodes = easy;
        }

        config.agent.validate().context("invalid agent settings")?;
        config.training.validate().context("invalid training settings")?;
        Ok(config)
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
