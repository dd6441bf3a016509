use std::fmt;
use std::ops::Not;
use std::str::FromStr;

use itertools::Itertools;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

/// Side length of the board.
pub const SIZE: usize = 3;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Display, EnumIter)]
pub enum Player {
    X,
    O,
}

impl Not for Player {
    type Output = Player;

    fn not(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum GameOutcome {
    InProgress,
    Won(Player),
    Draw,
}

impl GameOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "in progress"),
            GameOutcome::Won(player) => write!(f, "won by {player}"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell ({row}, {col}) is already occupied")]
    IllegalMove { row: usize, col: usize },
    #[error("cell ({row}, {col}) is outside the 3x3 board")]
    IndexOutOfRange { row: usize, col: usize },
    #[error("invalid board notation {0:?}")]
    InvalidNotation(String),
}

/// A target cell. Construction checks the coordinates, legality depends on the board.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    /// Top left corner, the opening move and the fallback of the search.
    pub const ORIGIN: Move = Move { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= SIZE || col >= SIZE {
            return Err(BoardError::IndexOutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    fn from_index(index: usize) -> Self {
        debug_assert!(index < SIZE * SIZE);
        Self { row: index / SIZE, col: index % SIZE }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn index(&self) -> usize {
        self.row * SIZE + self.col
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 3x3 grid. Whose turn it is is not stored here, see [`Board::next_player`].
#[derive(Debug, Clone, Hash, Eq, PartialEq, Default)]
pub struct Board {
    cells: [Cell; SIZE * SIZE],
}

impl Board {
    // rows, columns, then both diagonals; `winner` reports the first complete line in this order
    const WIN_INDICES: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        [0, 4, 8],
        [6, 4, 2],
    ];

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(cells: [Cell; SIZE * SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; SIZE * SIZE] {
        &self.cells
    }

    pub fn cell(&self, target: Move) -> Cell {
        self.cells[target.index()]
    }

    pub fn is_empty(&self, row: usize, col: usize) -> Result<bool, BoardError> {
        Ok(self.cell(Move::new(row, col)?) == Cell::Empty)
    }

    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), BoardError> {
        self.place_move(Move::new(row, col)?, player)
    }

    pub fn place_move(&mut self, target: Move, player: Player) -> Result<(), BoardError> {
        if self.cell(target) != Cell::Empty {
            return Err(BoardError::IllegalMove { row: target.row, col: target.col });
        }
        self.set_cell(target, player.into());
        Ok(())
    }

    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), BoardError> {
        self.clear_move(Move::new(row, col)?);
        Ok(())
    }

    pub fn clear_move(&mut self, target: Move) {
        self.set_cell(target, Cell::Empty);
    }

    pub(crate) fn set_cell(&mut self, target: Move, cell: Cell) {
        self.cells[target.index()] = cell;
    }

    pub fn winning_indices(&self) -> Option<&[usize; 3]> {
        Self::WIN_INDICES.iter().find(|indices| {
            self.cells[indices[0]] != Cell::Empty
                && self.cells[indices[0]] == self.cells[indices[1]]
                && self.cells[indices[1]] == self.cells[indices[2]]
        })
    }

    pub fn winner(&self) -> Option<Player> {
        self.winning_indices().and_then(|indices| self.cells[indices[0]].player())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell != &Cell::Empty)
    }

    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// Empty cells in row-major order.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.cells.iter()
            .positions(|cell| cell == &Cell::Empty)
            .map(Move::from_index)
            .collect()
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell != &&Cell::Empty).count()
    }

    /// X opens, so X is to move whenever an even number of cells is taken.
    pub fn next_player(&self) -> Player {
        if self.occupied() % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    pub fn outcome(&self) -> GameOutcome {
        match self.winner() {
            Some(player) => GameOutcome::Won(player),
            None if self.is_full() => GameOutcome::Draw,
            None => GameOutcome::InProgress,
        }
    }

    /// Compact form accepted by [`FromStr`], e.g. `XO_/_X_/_O_`.
    pub fn notation(&self) -> String {
        self.cells.chunks(SIZE)
            .map(|row| row.iter().map(|cell| match cell {
                Cell::Empty => '_',
                other => other.symbol(),
            }).collect::<String>())
            .join("/")
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidNotation(s.to_string());
        let rows = s.trim().split('/').collect_vec();
        if rows.len() != SIZE {
            return Err(invalid());
        }
        let mut cells = [Cell::Empty; SIZE * SIZE];
        for (row_index, row) in rows.iter().enumerate() {
            let row_cells = row.chars()
                .map(|c| match c.to_ascii_uppercase() {
                    'X' => Ok(Cell::X),
                    'O' => Ok(Cell::O),
                    '_' | '.' => Ok(Cell::Empty),
                    _ => Err(invalid()),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if row_cells.len() != SIZE {
                return Err(invalid());
            }
            cells[row_index * SIZE..(row_index + 1) * SIZE].copy_from_slice(&row_cells);
        }
        Ok(Board::new(cells))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = format!("   {}", "-".repeat(4 * SIZE + 1));
        writeln!(f, "     {}", (1..=SIZE).join("   "))?;
        for (index, row) in self.cells.chunks(SIZE).enumerate() {
            writeln!(f, "{separator}")?;
            writeln!(f, " {} | {} |", index + 1, row.iter().map(|cell| cell.symbol()).join(" | "))?;
        }
        writeln!(f, "{separator}")
    }
}
