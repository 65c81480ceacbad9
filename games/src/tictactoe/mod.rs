//! Tic-tac-toe with the learning bot as X against a computer opponent.

pub mod board;
pub mod game;
pub mod opponent;

pub use board::{Board, Cell};
pub use game::{Outcome, Square, TicTacToe, TicTacToeInfo};
pub use opponent::{BlockingOpponent, Opponent, RandomOpponent};
