//! WebSocket server for `card_room` tables.
//!
//! Exposes the HTTP router, configuration loading, and logging setup so the
//! binary and the integration tests share them.

pub mod api;
pub mod config;
pub mod logging;
