//! Side-scrolling obstacle runner: the dino either idles or jumps.

pub mod game;
pub mod state;
pub mod world;

pub use game::{Game, RunnerAction, RunnerInfo};
pub use state::RunnerState;
