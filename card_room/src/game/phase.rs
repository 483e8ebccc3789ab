use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::errors::GameError;

/// Lifecycle of a table, one hand at a time. Phases advance strictly in
/// declaration order and wrap from `GameOver` back to `Initializing`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    Initializing,
    WaitingForPlayers,
    Starting,
    DealingCards,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    GameOver,
}

impl Phase {
    pub const ALL: [Self; 10] = [
        Self::Initializing,
        Self::WaitingForPlayers,
        Self::Starting,
        Self::DealingCards,
        Self::PreFlop,
        Self::Flop,
        Self::Turn,
        Self::River,
        Self::Showdown,
        Self::GameOver,
    ];

    /// Successor in the fixed cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Initializing => Self::WaitingForPlayers,
            Self::WaitingForPlayers => Self::Starting,
            Self::Starting => Self::DealingCards,
            Self::DealingCards => Self::PreFlop,
            Self::PreFlop => Self::Flop,
            Self::Flop => Self::Turn,
            Self::Turn => Self::River,
            Self::River => Self::Showdown,
            Self::Showdown => Self::GameOver,
            Self::GameOver => Self::Initializing,
        }
    }

    /// Whether seats take betting actions during this phase.
    #[must_use]
    pub const fn is_betting_street(self) -> bool {
        matches!(self, Self::PreFlop | Self::Flop | Self::Turn | Self::River)
    }

    /// Number of community cards revealed on entering this phase.
    #[must_use]
    pub const fn community_cards_dealt(self) -> usize {
        match self {
            Self::Flop => 3,
            Self::Turn | Self::River => 1,
            _ => 0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initializing => "INITIALIZING",
            Self::WaitingForPlayers => "WAITING_FOR_PLAYERS",
            Self::Starting => "STARTING",
            Self::DealingCards => "DEALING_CARDS",
            Self::PreFlop => "PRE_FLOP",
            Self::Flop => "FLOP",
            Self::Turn => "TURN",
            Self::River => "RIVER",
            Self::Showdown => "SHOWDOWN",
            Self::GameOver => "GAME_OVER",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Phase {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| GameError::InvalidPhase(s.to_string()))
    }
}
