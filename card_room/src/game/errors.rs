use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::SeatId;

/// Every way a table operation can be refused. A refused operation leaves
/// the table state exactly as it was.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("not your turn")]
    OutOfTurn,
    #[error("can't check facing a bet")]
    IllegalCheck,
    #[error("nothing to call")]
    NothingToCall,
    #[error("amount must be positive")]
    ZeroOrNegativeAmount,
    #[error("{0} can't cover that amount")]
    InsufficientFunds(SeatId),
    #[error("{0} already has chips in this street")]
    AlreadyBet(SeatId),
    #[error("betting is already open, raise instead")]
    BettingAlreadyOpen,
    #[error("invalid action")]
    InvalidAction,
    #[error("invalid phase: {0}")]
    InvalidPhase(String),
    #[error("need 2+ players")]
    NotEnoughPlayers,
    #[error("seat {0} not found")]
    SeatNotFound(SeatId),
    #[error("{0} is already seated")]
    SeatTaken(SeatId),
    #[error("table is full")]
    TableFull,
    #[error("deck exhausted")]
    DeckExhausted,
}
