//! Table configuration models.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::TableError;
use crate::game::{
    GameSettings,
    constants::{
        DEFAULT_BIG_BLIND, DEFAULT_SMALL_BLIND, DEFAULT_START_COUNTDOWN_SECS,
        DEFAULT_STARTING_STACK, MAX_SEATS, MIN_SEATS,
    },
    entities::Chips,
};

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name
    pub name: String,

    /// Maximum number of seats (default: 10)
    pub max_seats: usize,

    /// Small blind amount
    pub small_blind: Chips,

    /// Big blind amount
    pub big_blind: Chips,

    /// Stack every seat starts with
    pub starting_stack: Chips,

    /// Seconds between the table filling up and the hand starting
    pub start_countdown_secs: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Default Table".to_string(),
            max_seats: MAX_SEATS,
            small_blind: DEFAULT_SMALL_BLIND,
            big_blind: DEFAULT_BIG_BLIND,
            starting_stack: DEFAULT_STARTING_STACK,
            start_countdown_secs: DEFAULT_START_COUNTDOWN_SECS,
        }
    }
}

impl TableConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), TableError> {
        let invalid = |reason: &str| Err(TableError::InvalidConfig(reason.to_string()));
        if self.name.trim().is_empty() {
            return invalid("Table name can't be empty");
        }
        if self.small_blind == 0 {
            return invalid("Small blind must be positive");
        }
        if self.big_blind <= self.small_blind {
            return invalid("Big blind must be greater than small blind");
        }
        if self.starting_stack < self.big_blind {
            return invalid("Starting stack must cover the big blind");
        }
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.max_seats) {
            return Err(TableError::InvalidConfig(format!(
                "Max seats must be between {MIN_SEATS} and {MAX_SEATS}"
            )));
        }
        if self.start_countdown_secs == 0 {
            return invalid("Start countdown must be at least one second");
        }
        Ok(())
    }

    /// Settings for the table's game engine
    pub fn game_settings(&self) -> GameSettings {
        GameSettings::new(
            self.small_blind,
            self.big_blind,
            self.starting_stack,
            self.max_seats,
        )
    }

    pub fn start_countdown(&self) -> Duration {
        Duration::from_secs(self.start_countdown_secs)
    }
}
