use std::path::PathBuf;

/// Errors raised by direct board access.
///
/// These indicate a caller bug: the engine validates every move before it
/// touches the board, so it never produces them during play.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {0} is out of range")]
    InvalidColumn(usize),

    #[error("cell ({row}, {col}) is out of range")]
    InvalidCell { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },
}

/// Reasons a move can be rejected. A rejected move never changes the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::InvalidColumn(col) | BoardError::InvalidCell { col, .. } => {
                MoveError::InvalidColumn(col)
            }
            BoardError::CellOccupied { col, .. } => MoveError::ColumnFull(col),
        }
    }
}

/// A scripted sequence of moves failed part-way through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("move {index} (column {column}) rejected: {source}")]
pub struct ReplayError {
    pub index: usize,
    pub column: usize,
    pub source: MoveError,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
