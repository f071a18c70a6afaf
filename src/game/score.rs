use std::collections::HashSet;

use super::player::Player;
use super::session::{GameSession, Status};

/// Running win totals across games.
///
/// A finished game is counted once no matter how many times it is observed;
/// games are told apart by [`GameSession::game_number`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    player_one: u32,
    player_two: u32,
    draws: u32,
    recorded: HashSet<u64>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the session's result if it is finished and not yet counted.
    ///
    /// Returns the player whose score went up, if any.
    pub fn record(&mut self, session: &GameSession) -> Option<Player> {
        if !session.is_over() || !self.recorded.insert(session.game_number()) {
            return None;
        }

        match session.status() {
            Status::Won(Player::One) => {
                self.player_one += 1;
                Some(Player::One)
            }
            Status::Won(Player::Two) => {
                self.player_two += 1;
                Some(Player::Two)
            }
            Status::Draw => {
                self.draws += 1;
                None
            }
            Status::InProgress => None,
        }
    }

    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Finished games counted so far
    pub fn games_recorded(&self) -> u32 {
        self.player_one + self.player_two + self.draws
    }
}
