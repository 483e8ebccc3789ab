//! # Card Room
//!
//! A server-authoritative Texas Hold'em table engine. Clients only ever
//! send intents; every rule is enforced here and every change is published
//! as a fresh public snapshot.
//!
//! ## Architecture
//!
//! A table moves through a fixed cycle of phases:
//!
//! - **Initializing / WaitingForPlayers**: seats fill up
//! - **Starting**: a short countdown runs once two seats are taken
//! - **DealingCards**: blinds are posted and hole cards dealt
//! - **PreFlop / Flop / Turn / River**: betting streets
//! - **Showdown / GameOver**: hole cards are revealed and the hand is wrapped up
//!
//! ## Core Modules
//!
//! - [`game`]: Cards, betting, turn order, blinds, dealing, and the hand lifecycle
//! - [`table`]: One async actor per table plus a manager for discovery
//! - [`chat`]: Bounded per-table chat history
//! - [`auth`]: Token verification resolving connections to identities
//!
//! ## Example
//!
//! ```
//! use card_room::{Game, GameSettings, auth::Identity, game::entities::Action};
//!
//! let mut game = Game::new(GameSettings::default());
//! game.add_seat(Identity::new("a", "Ann")).unwrap();
//! game.add_seat(Identity::new("b", "Bob")).unwrap();
//! game.start_hand().unwrap();
//!
//! // Heads-up, the small blind acts first and folds to the big blind.
//! let actor = game.public_view().current_actor.clone().unwrap();
//! game.take_action(&actor, Action::Fold).unwrap();
//! assert_eq!(game.public_view().pot, 0);
//! ```

/// Connection authentication.
pub mod auth;

/// Per-table chat history.
pub mod chat;

/// Core game logic, entities, and hand lifecycle.
pub mod game;
pub use game::{
    Game, GameError, GameEvent, GameSettings, Phase, PublicState, TableState,
    constants::{self, DEFAULT_BIG_BLIND, DEFAULT_SMALL_BLIND, DEFAULT_STARTING_STACK, MAX_SEATS},
    entities,
};

/// Multi-table actor infrastructure.
pub mod table;
