//! Table actor message types.

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use super::errors::TableError;
use crate::{
    auth::Identity,
    chat::ChatMessage,
    game::{
        AppliedAction, PublicState,
        entities::{Action, Card, Player, SeatId},
    },
};

/// Table ID type
pub type TableId = u64;

/// Reply channel for a table request
pub type Reply<T> = oneshot::Sender<Result<T, TableError>>;

/// Messages that can be sent to a TableActor
#[derive(Debug)]
pub enum TableMessage {
    /// Take a seat and subscribe to the table's events
    JoinTable {
        identity: Identity,
        events: mpsc::Sender<TableEvent>,
        response: Reply<Player>,
    },

    /// Give up a seat and unsubscribe
    LeaveTable {
        seat: SeatId,
        response: Reply<()>,
    },

    /// Betting action from the seat on turn
    TakeAction {
        seat: SeatId,
        action: Action,
        response: Reply<AppliedAction>,
    },

    /// Start the hand now instead of waiting out the countdown
    StartGame {
        seat: SeatId,
        response: Reply<()>,
    },

    /// Send chat message
    SendChat {
        seat: SeatId,
        text: String,
        response: Reply<()>,
    },

    /// Get current table state
    GetState {
        response: oneshot::Sender<TableSnapshot>,
    },

    /// Close table
    Close { response: oneshot::Sender<()> },
}

/// Pushed to every seated connection
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    /// Public table state after any change
    GameUpdate { state: PublicState },
    /// The receiving seat's own hole cards, sent once per deal
    PlayerHand { cards: [Card; 2] },
    /// Full chat history after any new message
    ChatUpdate { messages: Vec<ChatMessage> },
    /// A hand has just started
    GameStart { message: String },
}

/// Point-in-time view of a table for discovery
#[derive(Clone, Debug, Serialize)]
pub struct TableSnapshot {
    pub id: TableId,
    pub name: String,
    pub max_seats: usize,
    pub state: PublicState,
}
