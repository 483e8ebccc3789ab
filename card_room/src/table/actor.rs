//! Table actor implementation with async message handling.

use std::{collections::HashMap, future};

use tokio::{
    sync::{mpsc, oneshot},
    time::{Duration, Instant, Interval, interval_at},
};

use super::{
    config::TableConfig,
    errors::TableError,
    messages::{TableEvent, TableId, TableMessage, TableSnapshot},
};
use crate::{
    auth::Identity,
    chat::ChatLog,
    game::{
        AppliedAction, Game, GameError, GameEvent,
        entities::{Action, Player, SeatId},
    },
};

/// Capacity of a table's message inbox
const INBOX_CAPACITY: usize = 100;

/// Table actor handle for sending messages
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
    table_id: TableId,
}

impl TableHandle {
    /// Create a new table handle
    pub fn new(sender: mpsc::Sender<TableMessage>, table_id: TableId) -> Self {
        Self { sender, table_id }
    }

    /// Get table ID
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Send a message to the table
    pub async fn send(&self, message: TableMessage) -> Result<(), TableError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| TableError::Closed)
    }

    /// Take a seat. Table events for the seat are pushed into `events`.
    pub async fn join(
        &self,
        identity: Identity,
        events: mpsc::Sender<TableEvent>,
    ) -> Result<Player, TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::JoinTable {
            identity,
            events,
            response,
        })
        .await?;
        rx.await.map_err(|_| TableError::Closed)?
    }

    pub async fn leave(&self, seat: SeatId) -> Result<(), TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::LeaveTable { seat, response })
            .await?;
        rx.await.map_err(|_| TableError::Closed)?
    }

    pub async fn take_action(
        &self,
        seat: SeatId,
        action: Action,
    ) -> Result<AppliedAction, TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::TakeAction {
            seat,
            action,
            response,
        })
        .await?;
        rx.await.map_err(|_| TableError::Closed)?
    }

    pub async fn start_game(&self, seat: SeatId) -> Result<(), TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::StartGame { seat, response })
            .await?;
        rx.await.map_err(|_| TableError::Closed)?
    }

    pub async fn send_chat(&self, seat: SeatId, text: String) -> Result<(), TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::SendChat {
            seat,
            text,
            response,
        })
        .await?;
        rx.await.map_err(|_| TableError::Closed)?
    }

    pub async fn snapshot(&self) -> Result<TableSnapshot, TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::GetState { response }).await?;
        rx.await.map_err(|_| TableError::Closed)
    }

    pub async fn close(&self) -> Result<(), TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::Close { response }).await?;
        rx.await.map_err(|_| TableError::Closed)
    }
}

/// Pre-hand countdown. Dropping it cancels it.
struct Countdown {
    ticker: Interval,
    remaining: u64,
}

/// Resolves on the next countdown tick, or never when no countdown runs.
async fn next_tick(countdown: &mut Option<Countdown>) {
    match countdown {
        Some(countdown) => {
            countdown.ticker.tick().await;
        }
        None => future::pending().await,
    }
}

/// Table actor managing a single poker table
pub struct TableActor {
    /// Table ID
    id: TableId,

    /// Table configuration
    config: TableConfig,

    /// Hand engine
    game: Game,

    /// Chat history
    chat: ChatLog,

    /// Chat changed since the last chat broadcast
    chat_dirty: bool,

    /// Message inbox
    inbox: mpsc::Receiver<TableMessage>,

    /// Identities of connected seats, for chat authorship and names
    identities: HashMap<SeatId, Identity>,

    /// Event channels of connected seats
    subscribers: HashMap<SeatId, mpsc::Sender<TableEvent>>,

    /// Running start countdown, if any
    countdown: Option<Countdown>,

    /// Is table closed
    is_closed: bool,
}

impl TableActor {
    /// Create a new table actor and the handle for sending it messages
    pub fn new(id: TableId, config: TableConfig) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let actor = Self {
            id,
            game: Game::new(config.game_settings()),
            config,
            chat: ChatLog::default(),
            chat_dirty: false,
            inbox,
            identities: HashMap::new(),
            subscribers: HashMap::new(),
            countdown: None,
            is_closed: false,
        };

        (actor, TableHandle::new(sender, id))
    }

    /// Run the table actor event loop
    pub async fn run(mut self) {
        log::info!("Table {} '{}' starting", self.id, self.config.name);

        loop {
            tokio::select! {
                message = self.inbox.recv() => match message {
                    Some(message) => self.handle_message(message),
                    None => break,
                },
                () = next_tick(&mut self.countdown), if self.countdown.is_some() => {
                    self.on_countdown_tick();
                }
            }

            if self.is_closed {
                break;
            }
        }

        log::info!("Table {} '{}' closed", self.id, self.config.name);
    }

    /// Handle a table message
    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::JoinTable {
                identity,
                events,
                response,
            } => {
                let result = self.handle_join(identity, events);
                let _ = response.send(result);
            }

            TableMessage::LeaveTable { seat, response } => {
                let result = self.handle_leave(&seat);
                let _ = response.send(result);
            }

            TableMessage::TakeAction {
                seat,
                action,
                response,
            } => {
                let result = self.handle_action(&seat, action);
                let _ = response.send(result);
            }

            TableMessage::StartGame { seat, response } => {
                let result = self.handle_start(&seat);
                let _ = response.send(result);
            }

            TableMessage::SendChat {
                seat,
                text,
                response,
            } => {
                let result = self.handle_chat(&seat, &text);
                let _ = response.send(result);
            }

            TableMessage::GetState { response } => {
                let _ = response.send(self.snapshot());
            }

            TableMessage::Close { response } => {
                self.countdown = None;
                self.is_closed = true;
                let _ = response.send(());
            }
        }
    }

    fn handle_join(
        &mut self,
        identity: Identity,
        events: mpsc::Sender<TableEvent>,
    ) -> Result<Player, TableError> {
        // A connection unseated by the engine keeps its subscription until it
        // leaves.
        if self.identities.contains_key(&identity.id) {
            return Err(GameError::SeatTaken(identity.id).into());
        }
        let player = self.game.add_seat(identity.clone())?;
        let seat = player.id.clone();
        log::info!(
            "Table {}: {} ({}) took a seat",
            self.id,
            identity.display_name,
            seat
        );

        self.chat
            .push_system(format!("{} has joined the game.", identity.display_name));
        self.chat_dirty = true;
        self.subscribers.insert(seat.clone(), events);
        self.identities.insert(seat.clone(), identity);
        self.process_events();
        self.publish();
        Ok(player)
    }

    fn handle_leave(&mut self, seat: &SeatId) -> Result<(), TableError> {
        self.subscribers.remove(seat);
        let identity = self.identities.remove(seat);
        let connected = identity.is_some();
        match self.game.remove_seat(seat) {
            Ok(()) => {}
            // Busted seats are already gone from the game.
            Err(GameError::SeatNotFound(_)) if connected => {}
            Err(e) => return Err(e.into()),
        }
        let name = identity.map_or_else(|| seat.to_string(), |identity| identity.display_name);
        log::info!("Table {}: {} ({}) left", self.id, name, seat);

        self.chat.push_system(format!("{name} has left the game."));
        self.chat_dirty = true;
        self.process_events();
        self.publish();
        Ok(())
    }

    fn handle_action(
        &mut self,
        seat: &SeatId,
        action: Action,
    ) -> Result<AppliedAction, TableError> {
        let applied = self.game.take_action(seat, action)?;
        self.process_events();
        self.publish();
        Ok(applied)
    }

    fn handle_start(&mut self, seat: &SeatId) -> Result<(), TableError> {
        if !self.game.is_seated(seat) {
            return Err(GameError::SeatNotFound(seat.clone()).into());
        }
        log::info!("Table {}: {} asked to start now", self.id, seat);
        self.start_hand()
    }

    fn handle_chat(&mut self, seat: &SeatId, text: &str) -> Result<(), TableError> {
        let author = self
            .identities
            .get(seat)
            .ok_or_else(|| GameError::SeatNotFound(seat.clone()))?;
        self.chat.push_user(author, text)?;
        self.chat_dirty = true;
        self.flush_chat();
        Ok(())
    }

    fn start_hand(&mut self) -> Result<(), TableError> {
        self.game.start_hand()?;
        self.process_events();
        self.publish();
        Ok(())
    }

    fn arm_countdown(&mut self) {
        let countdown = self.config.start_countdown();
        let secs = countdown.as_secs();
        let period = Duration::from_secs(1);
        self.countdown = Some(Countdown {
            ticker: interval_at(Instant::now() + period, period),
            remaining: secs,
        });
        log::info!("Table {}: starting in {:?}", self.id, countdown);
        self.announce_countdown(secs);
    }

    fn on_countdown_tick(&mut self) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        countdown.remaining = countdown.remaining.saturating_sub(1);
        let remaining = countdown.remaining;

        if remaining > 0 {
            self.announce_countdown(remaining);
            self.flush_chat();
            return;
        }

        self.countdown = None;
        if let Err(e) = self.start_hand() {
            log::warn!("Table {}: countdown elapsed but hand didn't start: {}", self.id, e);
        }
    }

    fn announce_countdown(&mut self, secs: u64) {
        self.chat.push_system(format!("Game starting in {secs}"));
        self.chat_dirty = true;
    }

    /// Reacts to what the last game operation did.
    fn process_events(&mut self) {
        for event in self.game.drain_events() {
            log::debug!("Table {}: {}", self.id, event);
            match event {
                GameEvent::CountdownArmed => self.arm_countdown(),
                GameEvent::CountdownCancelled => {
                    if self.countdown.take().is_some() {
                        log::info!("Table {}: countdown cancelled", self.id);
                    }
                }
                GameEvent::HandStarted(hand) => {
                    self.countdown = None;
                    log::info!("Table {}: hand #{} started", self.id, hand);
                    self.broadcast(TableEvent::GameStart {
                        message: "Game is starting!".to_string(),
                    });
                }
                GameEvent::HoleCardsDealt => self.send_hole_cards(),
                GameEvent::PotAwarded { .. } | GameEvent::PotCarried(_) => {
                    log::info!("Table {}: {}", self.id, event);
                }
                GameEvent::Busted(seat) => {
                    let name = self.display_name(&seat);
                    self.chat.push_system(format!("{name} is out of chips."));
                    self.chat_dirty = true;
                }
                _ => {}
            }
        }
    }

    fn display_name(&self, seat: &SeatId) -> String {
        self.identities
            .get(seat)
            .map_or_else(|| seat.to_string(), |identity| identity.display_name.clone())
    }

    fn send_hole_cards(&mut self) {
        let seats: Vec<SeatId> = self.subscribers.keys().cloned().collect();
        for seat in seats {
            if let Some(cards) = self.game.hole_cards(&seat) {
                self.send_to(&seat, TableEvent::PlayerHand { cards });
            }
        }
    }

    /// Broadcasts pending chat and the public table state.
    fn publish(&mut self) {
        self.flush_chat();
        self.broadcast(TableEvent::GameUpdate {
            state: self.game.public_view().clone(),
        });
    }

    fn flush_chat(&mut self) {
        if std::mem::take(&mut self.chat_dirty) {
            self.broadcast(TableEvent::ChatUpdate {
                messages: self.chat.history(),
            });
        }
    }

    fn send_to(&mut self, seat: &SeatId, event: TableEvent) {
        let Some(sender) = self.subscribers.get(seat) else {
            return;
        };
        if let Err(mpsc::error::TrySendError::Closed(_)) = sender.try_send(event) {
            log::debug!("Subscriber {} disconnected, removing", seat);
            self.subscribers.remove(seat);
        }
    }

    /// Broadcast an event to all subscribers
    fn broadcast(&mut self, event: TableEvent) {
        self.subscribers.retain(|seat, sender| {
            match sender.try_send(event.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("Subscriber {} channel full, dropping event", seat);
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber {} disconnected, removing", seat);
                    false
                }
            }
        });
    }

    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            id: self.id,
            name: self.config.name.clone(),
            max_seats: self.config.max_seats,
            state: self.game.public_view().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Phase;

    fn spawn_table(countdown_secs: u64) -> TableHandle {
        let config = TableConfig {
            start_countdown_secs: countdown_secs,
            ..TableConfig::default()
        };
        let (actor, handle) = TableActor::new(1, config);
        tokio::spawn(actor.run());
        handle
    }

    #[tokio::test(start_paused = true)]
    async fn join_broadcasts_chat_and_state() {
        let table = spawn_table(5);
        let (tx, mut rx) = mpsc::channel(32);
        table.join(Identity::new("a", "Ann"), tx).await.unwrap();

        match rx.recv().await.unwrap() {
            TableEvent::ChatUpdate { messages } => {
                assert_eq!(messages.last().unwrap().text, "Ann has joined the game.");
            }
            other => panic!("expected chat update, got {other:?}"),
        }
        match rx.recv().await.unwrap() {
            TableEvent::GameUpdate { state } => {
                assert_eq!(state.seats.len(), 1);
                assert_eq!(state.phase, Phase::WaitingForPlayers);
            }
            other => panic!("expected game update, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn chat_from_unseated_connection_is_rejected() {
        let table = spawn_table(5);
        let result = table.send_chat(SeatId::new("nobody"), "hi".to_string()).await;
        assert_eq!(
            result,
            Err(TableError::Game(GameError::SeatNotFound(SeatId::new("nobody"))))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn closed_table_refuses_requests() {
        let table = spawn_table(5);
        table.close().await.unwrap();
        tokio::task::yield_now().await;
        let (tx, _rx) = mpsc::channel(8);
        assert_eq!(
            table.join(Identity::new("a", "Ann"), tx).await,
            Err(TableError::Closed)
        );
    }
}
