use super::player::Player;
use crate::error::BoardError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    One,
    Two,
}

impl Cell {
    /// The player occupying this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Cell occupancy grid. Knows nothing about turns or winning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Checked lookup; `None` when the position is off the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Check if a column has no empty cell left
    pub fn is_column_full(&self, col: usize) -> Result<bool, BoardError> {
        Ok(self.landing_row(col)?.is_none())
    }

    /// Lowest empty row in a column, or `None` if the column is full
    pub fn landing_row(&self, col: usize) -> Result<Option<usize>, BoardError> {
        if col >= COLS {
            return Err(BoardError::InvalidColumn(col));
        }

        // Scan from the bottom so pieces stack
        Ok((0..ROWS).rev().find(|&row| self.cells[row][col].is_empty()))
    }

    /// Write a player's piece into an empty cell
    pub fn set(&mut self, row: usize, col: usize, player: Player) -> Result<(), BoardError> {
        let slot = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(BoardError::InvalidCell { row, col })?;

        if !slot.is_empty() {
            return Err(BoardError::CellOccupied { row, col });
        }

        *slot = player.to_cell();
        Ok(())
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| !cell.is_empty()).count()
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLS]> {
        self.cells.iter()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    Cell::One => '1',
                    Cell::Two => '2',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
