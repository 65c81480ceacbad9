use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "playground")]
#[command(version, about = "Tabular Q-learning on a dino runner and tic-tac-toe", long_about = None)]
pub struct Cli {
    /// Default log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Train an agent and save its action-value table
    Train(TrainArgs),
    /// Load a trained table and let the agent play greedily
    Play(PlayArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GameKind {
    Runner,
    Tictactoe,
}

impl GameKind {
    pub fn default_table(self) -> PathBuf {
        match self {
            GameKind::Runner => PathBuf::from("trained_q_table.json"),
            GameKind::Tictactoe => PathBuf::from("tictactoe_q_table.json"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    Random,
    Blocking,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    #[arg(value_enum)]
    pub game: GameKind,

    /// Where the table is written (defaults per game)
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// JSON file with `agent` and `training` sections
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub episodes: Option<usize>,

    /// Episodes run with the simplified environment first
    #[arg(long)]
    pub easy_episodes: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value = "random")]
    pub opponent: OpponentKind,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    #[arg(value_enum)]
    pub game: GameKind,

    #[arg(long)]
    pub table: Option<PathBuf>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the terminal view and only report scores
    #[arg(long)]
    pub headless: bool,

    /// Episodes (or games) played in headless mode
    #[arg(long, default_value_t = 100)]
    pub episodes: usize,

    /// Delay between frames in the terminal view
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    #[arg(long, value_enum, default_value = "random")]
    pub opponent: OpponentKind,
}
