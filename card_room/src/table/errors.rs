//! Table error types.

use thiserror::Error;

use super::messages::TableId;
use crate::{chat::ChatError, game::GameError};

/// Why a request to a table was refused
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TableError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("invalid table config: {0}")]
    InvalidConfig(String),

    #[error("table {0} not found")]
    NotFound(TableId),

    #[error("table limit of {0} reached")]
    LimitReached(usize),

    #[error("table is closed")]
    Closed,
}
