//! Win detection centered on the most recently placed piece.
//!
//! Only the four lines through the placed cell are inspected, walking outward
//! in both directions, so the cost is bounded by the board dimensions rather
//! than the number of cells.

use serde::Serialize;

use super::board::{Board, Cell};
use super::player::Player;

/// Pieces in a row needed to win.
pub const CONNECT: usize = 4;

/// The four lines a run can lie on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    /// left / right
    Horizontal,
    /// up / down
    Vertical,
    /// up-left / down-right (`\`)
    DiagonalDown,
    /// down-left / up-right (`/`)
    DiagonalUp,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DiagonalDown,
        Axis::DiagonalUp,
    ];

    /// `(row, col)` step toward one end of the axis; the other end is the negation.
    fn step(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::DiagonalDown => (1, 1),
            Axis::DiagonalUp => (1, -1),
        }
    }
}

/// A run of at least [`CONNECT`] pieces belonging to one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinningLine {
    pub player: Player,
    pub axis: Axis,
    /// `(row, col)` pairs ordered along the axis
    pub cells: Vec<(usize, usize)>,
}

impl WinningLine {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Check whether the piece at `(row, col)` completes a line.
///
/// Returns `None` for an empty or off-board cell. When several axes qualify
/// the first in [`Axis::ALL`] order is reported.
pub fn find_winning_line(board: &Board, row: usize, col: usize) -> Option<WinningLine> {
    let player = board.cell(row, col)?.player()?;

    Axis::ALL.into_iter().find_map(|axis| {
        let cells = run_through(board, row, col, player, axis);
        (cells.len() >= CONNECT).then_some(WinningLine {
            player,
            axis,
            cells,
        })
    })
}

/// Maximal run of `player`'s pieces on `axis` that passes through `(row, col)`.
fn run_through(
    board: &Board,
    row: usize,
    col: usize,
    player: Player,
    axis: Axis,
) -> Vec<(usize, usize)> {
    let (dr, dc) = axis.step();

    let mut cells = walk(board, row, col, -dr, -dc, player);
    cells.reverse();
    cells.push((row, col));
    cells.extend(walk(board, row, col, dr, dc, player));
    cells
}

/// Consecutive cells owned by `player`, starting next to `(row, col)`.
/// Stepping off the board ends the walk.
fn walk(
    board: &Board,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    player: Player,
) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    let (mut r, mut c) = (row, col);

    while let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) {
        if board.cell(nr, nc).and_then(Cell::player) != Some(player) {
            break;
        }
        cells.push((nr, nc));
        r = nr;
        c = nc;
    }

    cells
}
