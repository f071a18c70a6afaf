//! Core Connect Four game logic: board, players, win detection, the game
//! session state machine, and score keeping.

mod board;
mod player;
pub mod rules;
mod score;
mod session;

pub use board::{Board, Cell, COLS, ROWS};
pub use player::Player;
pub use rules::{find_winning_line, Axis, WinningLine, CONNECT};
pub use score::Scoreboard;
pub use session::{GameSession, MoveResult, Outcome, Placement, Status};
