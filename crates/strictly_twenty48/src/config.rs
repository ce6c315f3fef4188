//! Game configuration.

use crate::spawner::DEFAULT_FOUR_PROBABILITY;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Board and rule settings for a game.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board edge length.
    #[serde(default = "default_size")]
    size: usize,

    /// Tiles spawned when a game starts.
    #[serde(default = "default_start_tiles")]
    start_tiles: usize,

    /// Tile value that wins the game.
    #[serde(default = "default_winning_value")]
    winning_value: u32,

    /// Chance that a spawned tile is a 4.
    #[serde(default = "default_four_probability")]
    four_probability: f64,
}

fn default_size() -> usize {
    4
}

fn default_start_tiles() -> usize {
    2
}

fn default_winning_value() -> u32 {
    2048
}

fn default_four_probability() -> f64 {
    DEFAULT_FOUR_PROBABILITY
}

impl GameConfig {
    /// Creates a configuration with the given board size and start tiles.
    #[instrument]
    pub fn new(size: usize, start_tiles: usize) -> Self {
        Self {
            size,
            start_tiles,
            ..Self::default()
        }
    }

    /// Returns a copy with a different board size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Returns a copy with a different winning value.
    pub fn with_winning_value(mut self, winning_value: u32) -> Self {
        self.winning_value = winning_value;
        self
    }

    /// Returns a copy with a different 4-spawn probability.
    pub fn with_four_probability(mut self, four_probability: f64) -> Self {
        self.four_probability = four_probability;
        self
    }

    /// Loads configuration from a TOML file and validates it.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(size = config.size, winning_value = config.winning_value, "Config loaded");
        Ok(config)
    }

    /// Parses configuration from TOML text and validates it.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the settings describe a playable game.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::new(format!(
                "Board size must be at least 2, got {}",
                self.size
            )));
        }
        if self.start_tiles > self.size * self.size {
            return Err(ConfigError::new(format!(
                "Cannot start with {} tiles on a {}x{} board",
                self.start_tiles, self.size, self.size
            )));
        }
        if self.winning_value < 4 || !self.winning_value.is_power_of_two() {
            return Err(ConfigError::new(format!(
                "Winning value must be a power of two >= 4, got {}",
                self.winning_value
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::new(format!(
                "Four probability must be within [0, 1], got {}",
                self.four_probability
            )));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            start_tiles: default_start_tiles(),
            winning_value: default_winning_value(),
            four_probability: default_four_probability(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
