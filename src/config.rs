use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::COLS;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub players: PlayerNames,
    pub ui: UiConfig,
}

/// Display names for the two seats.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayerNames {
    pub one: String,
    pub two: String,
}

impl Default for PlayerNames {
    fn default() -> Self {
        PlayerNames {
            one: "Player 1".to_string(),
            two: "Player 2".to_string(),
        }
    }
}

/// Terminal front-end settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Column selected when a game starts
    pub start_column: usize,
    /// Input poll interval in milliseconds
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            start_column: COLS / 2,
            tick_ms: 100,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            players: PlayerNames::default(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.one.trim().is_empty() || self.players.two.trim().is_empty() {
            return Err(ConfigError::Validation(
                "players.one and players.two must not be empty".into(),
            ));
        }
        if self.players.one == self.players.two {
            return Err(ConfigError::Validation(
                "players.one and players.two must differ".into(),
            ));
        }
        if self.ui.start_column >= COLS {
            return Err(ConfigError::Validation(format!(
                "ui.start_column must be < {COLS}"
            )));
        }
        if self.ui.tick_ms == 0 {
            return Err(ConfigError::Validation("ui.tick_ms must be > 0".into()));
        }
        Ok(())
    }
}
