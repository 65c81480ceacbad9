use env::{ActionIndex, Env, StepInfo};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use tracing::trace;

use super::board::{Board, Cell};
use super::opponent::Opponent;

pub const WIN_REWARD: f32 = 1.0;
pub const LOSS_REWARD: f32 = -1.0;
pub const DRAW_REWARD: f32 = 0.5;

/// The bot always plays X and opens every game.
pub const BOT: Cell = Cell::X;

/// A board cell, 0..9 row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square(pub u8);

impl ActionIndex for Square {
    const COUNT: usize = 9;

    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(Square(index as u8))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    InProgress,
    BotWin,
    OpponentWin,
    Draw,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TicTacToeInfo {
    pub outcome: Outcome,
    pub moves: usize,
}

impl StepInfo for TicTacToeInfo {
    fn score(&self) -> f32 {
        if self.outcome == Outcome::BotWin {
            1.0
        } else {
            0.0
        }
    }
}

/// Tic-tac-toe seen from the bot's side: one `step` is the bot's move
/// followed by the opponent's reply, so every transition the bot learns
/// from starts and ends on a board where it is to move.
pub struct TicTacToe {
    board: Board,
    opponent: Box<dyn Opponent>,
    outcome: Outcome,
    moves: usize,
}

impl TicTacToe {
    pub fn new(opponent: Box<dyn Opponent>) -> Self {
        TicTacToe {
            board: Board::new(),
            opponent,
            outcome: Outcome::InProgress,
            moves: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn info(&self) -> TicTacToeInfo {
        TicTacToeInfo {
            outcome: self.outcome,
            moves: self.moves,
        }
    }

    fn mark(&mut self, cell: usize, mark: Cell) {
        self.board.place(cell, mark);
        self.moves += 1;
        if self.board.winner() == Some(mark) {
            self.outcome = if mark == BOT {
                Outcome::BotWin
            } else {
                Outcome::OpponentWin
            };
        } else if self.board.is_full() {
            self.outcome = Outcome::Draw;
        }
    }

    fn reward(&self) -> f32 {
        match self.outcome {
            Outcome::InProgress => 0.0,
            Outcome::BotWin => WIN_REWARD,
            Outcome::OpponentWin => LOSS_REWARD,
            Outcome::Draw => DRAW_REWARD,
        }
    }

    pub fn render(&self) -> (Text, &'static str) {
        let mut lines = Vec::new();
        for (row, cells) in self.board.cells().chunks(3).enumerate() {
            let mut spans = Vec::new();
            for (col, &cell) in cells.iter().enumerate() {
                let style = match cell {
                    Cell::X => Style::default().fg(Color::Green),
                    Cell::O => Style::default().fg(Color::Red),
                    Cell::Empty => Style::default().fg(Color::DarkGray),
                };
                let label = match cell {
                    Cell::Empty => (row * 3 + col).to_string(),
                    mark => mark.to_char().to_string(),
                };
                spans.push(Span::styled(format!(" {label} "), style));
            }
            lines.push(Line::from(spans));
        }

        let title = match self.outcome {
            Outcome::InProgress => "Tic-Tac-Toe",
            Outcome::BotWin => "Bot wins",
            Outcome::OpponentWin => "Opponent wins",
            Outcome::Draw => "Draw",
        };
        (Text::from(lines), title)
    }
}

impl Env for TicTacToe {
    type State = Board;
    type Action = Square;
    type Info = TicTacToeInfo;

    fn reset(&mut self) -> Self::State {
        self.board = Board::new();
        self.outcome = Outcome::InProgress;
        self.moves = 0;
        self.board
    }

    fn step(&mut self, action: Square) -> (Self::State, f32, bool, Self::Info) {
        if self.outcome != Outcome::InProgress {
            return (self.board, 0.0, true, self.info());
        }

        self.mark(action.index(), BOT);
        if self.outcome == Outcome::InProgress {
            if let Some(reply) = self.opponent.choose(&self.board, BOT.opponent()) {
                self.mark(reply, BOT.opponent());
            }
        }

        let done = self.outcome != Outcome::InProgress;
        if done {
            trace!(outcome = ?self.outcome, moves = self.moves, "game finished");
        }
        (self.board, self.reward(), done, self.info())
    }

    fn current_state(&self) -> Self::State {
        self.board
    }

    fn legal_actions(&self) -> Vec<Self::Action> {
        if self.outcome != Outcome::InProgress {
            return Vec::new();
        }
        self.board
            .empty_cells()
            .into_iter()
            .map(|i| Square(i as u8))
            .collect()
    }

    fn is_terminal(&self) -> bool {
        self.outcome != Outcome::InProgress
    }
}
