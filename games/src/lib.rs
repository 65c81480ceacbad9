pub mod dino;
pub mod tictactoe;

pub use crossterm;
pub use ratatui;
