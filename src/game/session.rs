use serde::Serialize;
use tracing::{debug, info};

use super::board::{Board, Cell, COLS};
use super::player::Player;
use super::rules::{self, WinningLine};
use crate::error::{MoveError, ReplayError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    InProgress,
    Won(Player),
    Draw,
}

/// What a successful move did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Continue,
    Win(Player),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub row: usize,
    pub column: usize,
    pub player: Player,
    pub outcome: Outcome,
    /// Set only when `outcome` is a win
    pub winning_line: Option<WinningLine>,
}

/// A piece that has been played in the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub player: Player,
}

/// One table of play: the board, whose turn it is, and how the game stands.
///
/// The session is the only writer of its board. Once the status leaves
/// [`Status::InProgress`] every move is rejected until [`GameSession::new_game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    status: Status,
    history: Vec<Placement>,
    winning_line: Option<WinningLine>,
    game_number: u64,
}

impl GameSession {
    /// Create a session with an empty board, Player 1 to move
    pub fn new() -> Self {
        GameSession {
            board: Board::new(),
            current_player: Player::One,
            status: Status::InProgress,
            history: Vec::new(),
            winning_line: None,
            game_number: 1,
        }
    }

    /// Play a sequence of columns from a fresh session.
    pub fn replay<I>(columns: I) -> Result<Self, ReplayError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut session = Self::new();
        for (index, column) in columns.into_iter().enumerate() {
            session
                .apply_move(column)
                .map_err(|source| ReplayError {
                    index,
                    column,
                    source,
                })?;
        }
        Ok(session)
    }

    /// Discard the board and start over. Score is tracked elsewhere and is
    /// not affected.
    pub fn new_game(&mut self) {
        self.board = Board::new();
        self.current_player = Player::One;
        self.status = Status::InProgress;
        self.history.clear();
        self.winning_line = None;
        self.game_number += 1;
        info!(game = self.game_number, "new game");
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Validation happens before any write, so an error leaves the session
    /// exactly as it was.
    pub fn apply_move(&mut self, column: usize) -> Result<MoveResult, MoveError> {
        if self.is_over() {
            debug!(column, status = ?self.status, "move rejected: game over");
            return Err(MoveError::GameOver);
        }

        let row = match self.board.landing_row(column) {
            Ok(Some(row)) => row,
            Ok(None) => {
                debug!(column, "move rejected: column full");
                return Err(MoveError::ColumnFull(column));
            }
            Err(err) => {
                debug!(column, "move rejected: invalid column");
                return Err(err.into());
            }
        };

        let player = self.current_player;
        self.board.set(row, column, player)?;
        self.history.push(Placement {
            row,
            column,
            player,
        });
        debug!(row, column, player = %player, "piece placed");

        // Win is checked before draw: the last cell can complete a line
        let winning_line = rules::find_winning_line(&self.board, row, column);
        let outcome = if winning_line.is_some() {
            self.status = Status::Won(player);
            info!(game = self.game_number, winner = %player, "game won");
            Outcome::Win(player)
        } else if self.board.is_full() {
            self.status = Status::Draw;
            info!(game = self.game_number, "game drawn");
            Outcome::Draw
        } else {
            self.current_player = player.other();
            Outcome::Continue
        };
        self.winning_line = winning_line.clone();

        Ok(MoveResult {
            row,
            column,
            player,
            outcome,
            winning_line,
        })
    }

    /// Get current player. After a win this is still the winner.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Checked cell lookup for renderers
    pub fn cell_at(&self, row: usize, column: usize) -> Option<Cell> {
        self.board.cell(row, column)
    }

    pub fn is_win(&self) -> bool {
        matches!(self.status, Status::Won(_))
    }

    pub fn is_draw(&self) -> bool {
        self.status == Status::Draw
    }

    /// Check if game is over
    pub fn is_over(&self) -> bool {
        self.status != Status::InProgress
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            Status::Won(player) => Some(player),
            _ => None,
        }
    }

    /// The line that ended the game, if it was won
    pub fn winning_line(&self) -> Option<&WinningLine> {
        self.winning_line.as_ref()
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| matches!(self.board.is_column_full(col), Ok(false)))
            .collect()
    }

    /// Pieces played this game, oldest first
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// Starts at 1 and increases with every [`GameSession::new_game`].
    pub fn game_number(&self) -> u64 {
        self.game_number
    }

    /// Hand the turn to `player` without a move, for building positions in tests.
    #[cfg(test)]
    pub(crate) fn force_turn(&mut self, player: Player) {
        self.current_player = player;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::ROWS;
    use crate::game::rules::Axis;
    use proptest::prelude::*;

    /// 42 alternating moves that fill the board without four in a row.
    const DRAW_SEQUENCE: [usize; 42] = [
        4, 1, 6, 2, 1, 0, 1, 4, 4, 2, 4, 1, 3, 6, 3, 3, 1, 0, 4, 6, 6, 1, 2, 3, 2, 3, 2, 2,
        6, 5, 5, 0, 5, 4, 6, 5, 5, 5, 0, 0, 3, 0,
    ];

    /// Same as above with the last two swapped: the final piece fills the board
    /// and completes Player 2's top row.
    const WIN_ON_LAST_CELL: [usize; 42] = [
        4, 1, 6, 2, 1, 0, 1, 4, 4, 2, 4, 1, 3, 6, 3, 3, 1, 0, 4, 6, 6, 1, 2, 3, 2, 3, 2, 2,
        6, 5, 5, 0, 5, 4, 6, 5, 5, 5, 0, 0, 0, 3,
    ];

    /// Brute-force line search over every cell and direction.
    fn any_line(board: &Board) -> Option<Player> {
        const DIRS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
        for row in 0..ROWS {
            for col in 0..COLS {
                let Some(player) = board.get(row, col).player() else {
                    continue;
                };
                for (dr, dc) in DIRS {
                    let hit = (0..4isize).all(|k| {
                        let r = row as isize + dr * k;
                        let c = col as isize + dc * k;
                        r >= 0
                            && c >= 0
                            && board.cell(r as usize, c as usize) == Some(player.to_cell())
                    });
                    if hit {
                        return Some(player);
                    }
                }
            }
        }
        None
    }

    fn forced(session: &mut GameSession, player: Player, column: usize) -> MoveResult {
        session.force_turn(player);
        session.apply_move(column).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let session = GameSession::new();
        assert_eq!(session.current_player(), Player::One);
        assert_eq!(session.status(), Status::InProgress);
        assert!(!session.is_over());
        assert_eq!(session.legal_columns().len(), COLS);
        assert_eq!(session.game_number(), 1);
    }

    #[test]
    fn test_apply_move() {
        let mut session = GameSession::new();
        let result = session.apply_move(3).unwrap();

        assert_eq!(result.row, 5);
        assert_eq!(result.column, 3);
        assert_eq!(result.player, Player::One);
        assert_eq!(result.outcome, Outcome::Continue);
        assert_eq!(result.winning_line, None);
        assert_eq!(session.current_player(), Player::Two);
        assert_eq!(session.cell_at(5, 3), Some(Cell::One));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_landing_rows_follow_gravity() {
        for col in 0..COLS {
            let mut session = GameSession::new();
            for k in 0..ROWS {
                assert_eq!(session.board().landing_row(col), Ok(Some(ROWS - 1 - k)));
                let result = session.apply_move(col).unwrap();
                assert_eq!(result.row, ROWS - 1 - k);
            }
            assert_eq!(session.board().landing_row(col), Ok(None));
        }
    }

    #[test]
    fn test_invalid_column() {
        let mut session = GameSession::new();
        let before = session.clone();

        assert_eq!(session.apply_move(7), Err(MoveError::InvalidColumn(7)));
        assert_eq!(session.apply_move(usize::MAX), Err(MoveError::InvalidColumn(usize::MAX)));
        assert_eq!(session, before);
    }

    #[test]
    fn test_column_full_leaves_board_unchanged() {
        let mut session = GameSession::new();
        for _ in 0..ROWS {
            session.apply_move(0).unwrap();
        }
        let before = session.clone();

        assert_eq!(session.apply_move(0), Err(MoveError::ColumnFull(0)));
        assert_eq!(session, before);
        assert_eq!(session.current_player(), Player::One);
        assert!(!session.legal_columns().contains(&0));
    }

    #[test]
    fn test_vertical_win_for_player_one() {
        let mut session = GameSession::new();
        for _ in 0..3 {
            assert_eq!(forced(&mut session, Player::One, 0).outcome, Outcome::Continue);
        }
        let result = forced(&mut session, Player::One, 0);

        assert_eq!(result.outcome, Outcome::Win(Player::One));
        assert_eq!(result.row, 2);
        let mut cells = result.winning_line.unwrap().cells;
        cells.sort();
        assert_eq!(cells, vec![(2, 0), (3, 0), (4, 0), (5, 0)]);
        assert_eq!(session.status(), Status::Won(Player::One));
        assert_eq!(session.winner(), Some(Player::One));
    }

    #[test]
    fn test_win_detection() {
        let mut session = GameSession::new();

        // Player 1 wins with horizontal line
        for col in 0..4 {
            session.apply_move(col).unwrap(); // Player 1
            if col < 3 {
                session.apply_move(col).unwrap(); // Player 2 (different row)
            }
        }

        assert!(session.is_win());
        assert_eq!(session.status(), Status::Won(Player::One));
        // The turn does not pass after a winning move
        assert_eq!(session.current_player(), Player::One);
        assert!(session.legal_columns().is_empty());
        assert!(session.winning_line().is_some_and(|line| line.contains(5, 3)));
    }

    #[test]
    fn test_win_with_any_piece_placed_last() {
        // (axis, Player 2 supports as (column, height), Player 1 line columns).
        // Vertical lines can only be completed from the top; see
        // test_vertical_win_for_player_one.
        let cases: [(Axis, &[(usize, usize)], [usize; 4]); 3] = [
            (Axis::Horizontal, &[], [1, 2, 3, 4]),
            // `/` (5,0) (4,1) (3,2) (2,3)
            (Axis::DiagonalUp, &[(1, 1), (2, 2), (3, 3)], [0, 1, 2, 3]),
            // `\` (2,3) (3,4) (4,5) (5,6)
            (Axis::DiagonalDown, &[(5, 1), (4, 2), (3, 3)], [6, 5, 4, 3]),
        ];

        for (axis, supports, line) in cases {
            for last in line {
                let mut session = GameSession::new();
                for &(col, height) in supports {
                    for _ in 0..height {
                        forced(&mut session, Player::Two, col);
                    }
                }

                let mut order: Vec<usize> = line.iter().copied().filter(|&c| c != last).collect();
                order.push(last);

                for &col in &order[..3] {
                    assert_eq!(forced(&mut session, Player::One, col).outcome, Outcome::Continue);
                }
                let result = forced(&mut session, Player::One, last);
                assert_eq!(
                    result.outcome,
                    Outcome::Win(Player::One),
                    "{axis:?}, last piece in column {last}"
                );
                let winning_line = result.winning_line.unwrap();
                assert_eq!(winning_line.axis, axis);
                assert_eq!(winning_line.len(), 4);
            }
        }
    }

    #[test]
    fn test_draw() {
        let mut session = GameSession::new();
        let (last, rest) = DRAW_SEQUENCE.split_last().unwrap();

        for &col in rest {
            assert_eq!(session.apply_move(col).unwrap().outcome, Outcome::Continue);
        }
        let player = session.current_player();
        let result = session.apply_move(*last).unwrap();

        assert_eq!(result.outcome, Outcome::Draw);
        assert!(session.is_draw());
        assert!(session.board().is_full());
        assert_eq!(session.current_player(), player);
        assert_eq!(session.apply_move(3), Err(MoveError::GameOver));
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_draw() {
        let mut session = GameSession::new();
        let (last, rest) = WIN_ON_LAST_CELL.split_last().unwrap();
        for &col in rest {
            session.apply_move(col).unwrap();
        }

        let result = session.apply_move(*last).unwrap();
        assert!(session.board().is_full());
        assert_eq!(result.outcome, Outcome::Win(Player::Two));
        assert_eq!(session.status(), Status::Won(Player::Two));
    }

    #[test]
    fn test_no_moves_after_win() {
        let mut session = GameSession::replay([0, 1, 0, 1, 0, 1, 0]).unwrap();
        assert_eq!(session.status(), Status::Won(Player::One));
        let before = session.clone();

        assert_eq!(session.apply_move(2), Err(MoveError::GameOver));
        // GameOver wins over every other check
        assert_eq!(session.apply_move(99), Err(MoveError::GameOver));
        assert_eq!(session, before);
    }

    #[test]
    fn test_new_game_resets_board_and_turn() {
        let mut session = GameSession::replay([0, 1, 0, 1, 0, 1, 0]).unwrap();
        session.new_game();

        assert_eq!(session.status(), Status::InProgress);
        assert_eq!(session.current_player(), Player::One);
        assert_eq!(session.board(), &Board::new());
        assert!(session.history().is_empty());
        assert!(session.winning_line().is_none());
        assert_eq!(session.game_number(), 2);
        assert!(session.apply_move(0).is_ok());
    }

    #[test]
    fn test_replay_reports_rejected_move() {
        let err = GameSession::replay([0, 0, 0, 0, 0, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            ReplayError {
                index: 6,
                column: 0,
                source: MoveError::ColumnFull(0),
            }
        );
    }

    #[test]
    fn test_history_records_players_in_order() {
        let session = GameSession::replay([3, 3, 4]).unwrap();
        let players: Vec<Player> = session.history().iter().map(|p| p.player).collect();
        assert_eq!(players, vec![Player::One, Player::Two, Player::One]);
        assert_eq!(
            session.history()[1],
            Placement {
                row: 4,
                column: 3,
                player: Player::Two
            }
        );
    }

    proptest! {
        #[test]
        fn prop_landing_row_after_k_drops(col in 0..COLS, k in 0..=ROWS) {
            let mut session = GameSession::new();
            for _ in 0..k {
                session.apply_move(col).unwrap();
            }

            let expected = (k < ROWS).then(|| ROWS - 1 - k);
            prop_assert_eq!(session.board().landing_row(col), Ok(expected));
            prop_assert_eq!(session.board().is_column_full(col), Ok(k == ROWS));
            if k == ROWS {
                prop_assert_eq!(session.apply_move(col), Err(MoveError::ColumnFull(col)));
            }
        }

        #[test]
        fn prop_moves_follow_the_rules(columns in prop::collection::vec(0usize..COLS + 2, 0..80)) {
            let mut session = GameSession::new();

            for column in columns {
                let before = session.clone();
                match session.apply_move(column) {
                    Err(err) => {
                        prop_assert_eq!(&session, &before);
                        let expected = if before.is_over() {
                            MoveError::GameOver
                        } else if column >= COLS {
                            MoveError::InvalidColumn(column)
                        } else {
                            MoveError::ColumnFull(column)
                        };
                        prop_assert_eq!(err, expected);
                    }
                    Ok(result) => {
                        prop_assert_eq!(result.player, before.current_player());
                        prop_assert_eq!(
                            session.board().piece_count(),
                            before.board().piece_count() + 1
                        );

                        // Local detection agrees with a full-board scan
                        let scanned = any_line(session.board());
                        match result.outcome {
                            Outcome::Continue => {
                                prop_assert_eq!(scanned, None);
                                prop_assert!(!session.board().is_full());
                                prop_assert_eq!(session.current_player(), result.player.other());
                            }
                            Outcome::Win(player) => {
                                prop_assert_eq!(scanned, Some(player));
                                prop_assert_eq!(session.current_player(), player);
                                prop_assert!(result.winning_line.is_some());
                            }
                            Outcome::Draw => {
                                prop_assert_eq!(scanned, None);
                                prop_assert!(session.board().is_full());
                                prop_assert_eq!(session.current_player(), result.player);
                            }
                        }
                    }
                }
            }
        }
    }
}
