//! Texas Hold'em table engine.
//!
//! [`Game`] owns one table's [`TableState`] and drives it through the
//! [`Phase`] cycle. The stateless helpers it delegates to can also be used
//! on a bare [`TableState`]:
//!
//! - [`BettingEngine`] validates and applies check, call, bet, raise, and fold
//! - [`TurnSequencer`] picks the next actor and their legal actions
//! - [`BlindsManager`] posts the forced bets
//! - [`DealingCoordinator`] shuffles and deals hole and community cards

pub mod betting;
pub mod blinds;
pub mod constants;
pub mod dealing;
pub mod entities;
pub mod errors;
pub mod phase;
pub mod state;
pub mod state_machine;
pub mod turns;

pub use betting::{AppliedAction, BettingEngine};
pub use blinds::BlindsManager;
pub use dealing::DealingCoordinator;
pub use errors::GameError;
pub use phase::Phase;
pub use state::{PrivateState, PublicState, TableState};
pub use state_machine::{Game, GameEvent, GameSettings};
pub use turns::{TurnOutcome, TurnSequencer};
