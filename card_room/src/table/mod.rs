//! Table module providing multi-table support with async actor model.
//!
//! This module implements:
//! - TableActor: Async actor owning one table's game, chat, and countdown
//! - TableManager: Registry that spawns and closes table actors
//! - Message-based communication with tokio channels
//!
//! ## Architecture
//!
//! Each table runs in a separate Tokio task with an mpsc message inbox, so
//! every operation on a table is applied in arrival order. Seated
//! connections receive [`TableEvent`]s over their own channels.
//!
//! ## Example
//!
//! ```no_run
//! use card_room::{auth::Identity, table::{TableActor, TableConfig}};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, handle) = TableActor::new(1, TableConfig::default());
//!     tokio::spawn(actor.run());
//!
//!     let (events, mut updates) = mpsc::channel(32);
//!     handle.join(Identity::new("uid-1", "Player One"), events).await.unwrap();
//!     while let Some(update) = updates.recv().await {
//!         println!("{update:?}");
//!     }
//! }
//! ```

pub mod actor;
pub mod config;
pub mod errors;
pub mod manager;
pub mod messages;

pub use actor::{TableActor, TableHandle};
pub use config::TableConfig;
pub use errors::TableError;
pub use manager::{TableManager, TableMetadata};
pub use messages::{TableEvent, TableId, TableMessage, TableSnapshot};
