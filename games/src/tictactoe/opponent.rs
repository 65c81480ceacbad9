use env::rand::rngs::StdRng;
use env::rand::seq::IndexedRandom;
use env::rand::{Rng, SeedableRng};

use super::board::{Board, Cell};

/// The computer side of a tic-tac-toe game.
pub trait Opponent {
    /// Picks an empty cell for `mark`; `None` only when the board is full.
    fn choose(&mut self, board: &Board, mark: Cell) -> Option<usize>;
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(env::rand::rng().random()),
    }
}

/// Plays a uniformly random empty cell.
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: seeded(seed) }
    }
}

impl Opponent for RandomOpponent {
    fn choose(&mut self, board: &Board, _mark: Cell) -> Option<usize> {
        board.empty_cells().choose(&mut self.rng).copied()
    }
}

/// Completes its own line when it can, blocks the other side's line
/// otherwise, and falls back to a random cell.
pub struct BlockingOpponent {
    rng: StdRng,
}

impl BlockingOpponent {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: seeded(seed) }
    }
}

impl Opponent for BlockingOpponent {
    fn choose(&mut self, board: &Board, mark: Cell) -> Option<usize> {
        board
            .winning_move(mark)
            .or_else(|| board.winning_move(mark.opponent()))
            .or_else(|| board.empty_cells().choose(&mut self.rng).copied())
    }
}
