//! Terminal UI for playing Connect Four: column selection, board rendering,
//! score display, and play-again.

mod app;
mod game_view;

pub use app::App;
