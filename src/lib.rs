//! # Connect Four
//!
//! Rules engine for two-player Connect Four on a 6×7 grid, plus a terminal
//! front end built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, win detection, session state
//!   machine, score keeping
//! - [`ui`]: Terminal UI: game view and input handling
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
