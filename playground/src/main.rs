mod cli;
mod config;
mod play;
mod train;

use anyhow::Result;
use clap::Parser;
use games::tictactoe::{BlockingOpponent, Opponent, RandomOpponent};
use tracing::debug;

use crate::cli::{Cli, Command, OpponentKind};

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

pub(crate) fn opponent_for(kind: OpponentKind, seed: Option<u64>) -> Box<dyn Opponent> {
    match kind {
        OpponentKind::Random => Box::new(RandomOpponent::new(seed)),
        OpponentKind::Blocking => Box::new(BlockingOpponent::new(seed)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    debug!(log_level = %cli.log_level, "tracing initialized");

    match cli.command {
        Command::Train(args) => train::execute(args),
        Command::Play(args) => play::execute(args),
    }
}
