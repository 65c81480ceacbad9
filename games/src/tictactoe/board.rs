use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn opponent(self) -> Cell {
        match self {
            Cell::X => Cell::O,
            Cell::O => Cell::X,
            Cell::Empty => Cell::Empty,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The literal 3x3 board, row-major. Used directly as the learning state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Board { cells }
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Marks an empty cell. Marking an occupied cell is a caller bug.
    pub fn place(&mut self, index: usize, mark: Cell) {
        assert!(
            self.cells[index] == Cell::Empty,
            "cell {index} is already taken"
        );
        self.cells[index] = mark;
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        (0..9).filter(|&i| self.cells[i] == Cell::Empty).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    pub fn winner(&self) -> Option<Cell> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.cells[a];
            (mark != Cell::Empty && mark == self.cells[b] && mark == self.cells[c]).then_some(mark)
        })
    }

    /// A cell that would complete a line for `mark`, if any.
    pub fn winning_move(&self, mark: Cell) -> Option<usize> {
        self.empty_cells().into_iter().find(|&i| {
            let mut next = *self;
            next.cells[i] = mark;
            next.winner() == Some(mark)
        })
    }
}
