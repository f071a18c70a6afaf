use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{GameSession, Outcome, Player, Scoreboard, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Duration;
use tracing::{debug, info};

pub struct App {
    config: AppConfig,
    session: GameSession,
    score: Scoreboard,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App {
            selected_column: config.ui.start_column,
            config,
            session: GameSession::new(),
            score: Scoreboard::new(),
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let tick = Duration::from_millis(self.config.ui.tick_ms);
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events(tick)?;
        }
        info!(
            player_one = self.score.wins(Player::One),
            player_two = self.score.wins(Player::Two),
            "quit"
        );
        Ok(())
    }

    /// Display name for a player
    pub fn name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.config.players.one,
            Player::Two => &self.config.players.two,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn score(&self) -> &Scoreboard {
        &self.score
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle keyboard events
    fn handle_events(&mut self, tick: Duration) -> io::Result<()> {
        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.play_again();
            }
            _ => {}
        }
    }

    /// Start a new game, keeping the score
    fn play_again(&mut self) {
        self.session.new_game();
        self.selected_column = self.config.ui.start_column;
        self.message = Some("New game started!".to_string());
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.session.apply_move(self.selected_column) {
            Ok(result) => {
                let text = match result.outcome {
                    Outcome::Continue => return,
                    Outcome::Win(player) => {
                        format!("{} wins! Press 'r' to play again.", self.name(player))
                    }
                    Outcome::Draw => "It's a draw! Press 'r' to play again.".to_string(),
                };
                if let Some(player) = self.score.record(&self.session) {
                    debug!(player = %player, wins = self.score.wins(player), "score updated");
                }
                self.message = Some(text);
            }
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn(_)) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to play again.".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, self);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
