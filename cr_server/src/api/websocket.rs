//! WebSocket handler for seated play.
//!
//! # Connection Flow
//!
//! 1. Client connects via `GET /ws/{table_id}?token=<jwt>`
//! 2. Server verifies the token (`401` on failure) and finds the table (`404`)
//! 3. The identity takes a seat; table events are forwarded as they happen
//! 4. On disconnect, the seat is given up
//!
//! # Client Messages
//!
//! ```json
//! {"type": "start_game"}
//! {"type": "make_move", "action": "RAISE", "amount": 200}
//! {"type": "send_message", "text": "gl"}
//! ```
//!
//! # Server Messages
//!
//! `game_update`, `player_hand`, `chat_update`, and `game_start` are pushed
//! by the table. A refused request is answered to its sender only:
//!
//! ```json
//! {"type": "error", "message": "not your turn"}
//! ```

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use card_room::{
    auth::Identity,
    entities::{Action, ActionRequest, SeatId},
    table::{TableError, TableEvent, TableHandle, TableId},
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::{AppState, rate_limiter::ConnectionLimits};

/// Table events buffered per connection before the table starts dropping them
const EVENT_BUFFER: usize = 64;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    #[serde(default)]
    token: String,
}

/// Client messages received via WebSocket
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Skip the countdown and deal now
    StartGame,
    /// Betting action
    MakeMove(ActionRequest),
    /// Chat line
    SendMessage { text: String },
}

/// Replies sent only to the connection that made the request
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerResponse {
    Error { message: String },
}

impl ServerResponse {
    fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Upgrade to a WebSocket seated at `table_id`.
///
/// The token is checked before the upgrade, so a bad token gets a plain
/// `401 Unauthorized` response.
pub async fn websocket_handler(
    Path(table_id): Path<TableId>,
    Query(query): Query<WsQuery>,
    State(state): State<AppState>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let identity = match state.verifier.verify(&query.token) {
        Ok(identity) => identity,
        Err(e) => {
            warn!("Rejected WebSocket for table {}: {}", table_id, e);
            return (StatusCode::UNAUTHORIZED, e.client_message()).into_response();
        }
    };

    let Some(table) = state.table_manager.get_table(table_id).await else {
        return (StatusCode::NOT_FOUND, format!("Table {table_id} not found")).into_response();
    };

    match ws {
        Ok(ws) => ws.on_upgrade(move |socket| handle_socket(socket, table, identity)),
        Err(rejection) => rejection.into_response(),
    }
}

/// Seat the identity and pump messages until either side goes away.
async fn handle_socket(socket: WebSocket, table: TableHandle, identity: Identity) {
    let (mut sender, mut receiver) = socket.split();
    let table_id = table.table_id();
    let seat = identity.id.clone();

    let (events_tx, mut events_rx) = mpsc::channel::<TableEvent>(EVENT_BUFFER);
    let (reply_tx, mut reply_rx) = mpsc::channel::<ServerResponse>(32);

    if let Err(e) = table.join(identity, events_tx).await {
        info!("Seat {} refused at table {}: {}", seat, table_id, e);
        if let Ok(json) = serde_json::to_string(&ServerResponse::error(e.to_string())) {
            let _ = sender.send(Message::Text(json.into())).await;
        }
        let _ = sender.close().await;
        return;
    }
    info!("WebSocket connected: table={}, seat={}", table_id, seat);

    let send_task = tokio::spawn(async move {
        loop {
            let json = tokio::select! {
                Some(event) = events_rx.recv() => serde_json::to_string(&event),
                Some(reply) = reply_rx.recv() => serde_json::to_string(&reply),
                else => break,
            };
            match json {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => error!("Failed to serialize outgoing message: {}", e),
            }
        }
    });

    let mut limits = ConnectionLimits::default();
    while let Some(message) = receiver.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                debug!("WebSocket error on table {}: {}", table_id, e);
                break;
            }
        };

        if let Err(reason) = limits.check() {
            warn!("Rate limit hit by seat {} at table {}", seat, table_id);
            if reply_tx.send(ServerResponse::error(reason)).await.is_err() {
                break;
            }
            continue;
        }

        let result = match serde_json::from_str::<ClientMessage>(text.as_str()) {
            Ok(message) => handle_client_message(message, &table, &seat).await,
            Err(e) => {
                debug!("Unparseable message from seat {}: {}", seat, e);
                if reply_tx
                    .send(ServerResponse::error("Invalid message format"))
                    .await
                    .is_err()
                {
                    break;
                }
                continue;
            }
        };

        if let Err(e) = result {
            debug!("Refused request from seat {}: {}", seat, e);
            if reply_tx.send(ServerResponse::error(e.to_string())).await.is_err() {
                break;
            }
        }
    }

    send_task.abort();
    if let Err(e) = table.leave(seat.clone()).await {
        debug!("Seat {} was already gone from table {}: {}", seat, table_id, e);
    }
    info!("WebSocket disconnected: table={}, seat={}", table_id, seat);
}

/// Forward one client request to the table. Successes need no reply since
/// the table broadcasts the new state.
async fn handle_client_message(
    message: ClientMessage,
    table: &TableHandle,
    seat: &SeatId,
) -> Result<(), TableError> {
    match message {
        ClientMessage::StartGame => table.start_game(seat.clone()).await,
        ClientMessage::MakeMove(request) => {
            let action = Action::try_from(request)?;
            table.take_action(seat.clone(), action).await.map(|_| ())
        }
        ClientMessage::SendMessage { text } => table.send_chat(seat.clone(), text).await,
    }
}
