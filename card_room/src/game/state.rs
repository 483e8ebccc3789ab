use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{
    entities::{ActionChoices, Blinds, Card, Chips, Deck, Player, SeatId, ShownHand},
    phase::Phase,
};

/// Everything every seat may see. This is what gets broadcast.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PublicState {
    pub phase: Phase,
    pub pot: Chips,
    pub blinds: Blinds,
    /// Highest street bet among seats still in the hand.
    pub current_bet: Chips,
    pub current_actor: Option<SeatId>,
    pub available_actions: ActionChoices,
    /// Seats in clockwise order.
    pub seats: Vec<Player>,
    pub is_started: bool,
    pub community_cards: Vec<Card>,
    /// Hole cards turned face up when a hand reaches showdown.
    pub showdown: Vec<ShownHand>,
}

/// State never sent to clients as-is. Each seat only ever learns its own
/// hole cards.
#[derive(Clone, Debug, Default)]
pub struct PrivateState {
    pub deck: Deck,
    pub hole_cards: HashMap<SeatId, [Card; 2]>,
}

/// Public and private halves of a single table.
#[derive(Clone, Debug)]
pub struct TableState {
    pub public: PublicState,
    pub private: PrivateState,
}

impl TableState {
    #[must_use]
    pub fn new(blinds: Blinds) -> Self {
        Self {
            public: PublicState {
                phase: Phase::Initializing,
                pot: 0,
                blinds,
                current_bet: 0,
                current_actor: None,
                available_actions: ActionChoices::default(),
                seats: Vec::new(),
                is_started: false,
                community_cards: Vec::new(),
                showdown: Vec::new(),
            },
            private: PrivateState::default(),
        }
    }

    #[must_use]
    pub fn seat_index(&self, seat: &SeatId) -> Option<usize> {
        self.public.seats.iter().position(|player| &player.id == seat)
    }

    #[must_use]
    pub fn player(&self, seat: &SeatId) -> Option<&Player> {
        self.public.seats.iter().find(|player| &player.id == seat)
    }

    pub fn player_mut(&mut self, seat: &SeatId) -> Option<&mut Player> {
        self.public.seats.iter_mut().find(|player| &player.id == seat)
    }

    #[must_use]
    pub fn hole_cards(&self, seat: &SeatId) -> Option<[Card; 2]> {
        self.private.hole_cards.get(seat).copied()
    }

    /// Seats that haven't folded this hand.
    pub fn contenders(&self) -> impl Iterator<Item = &Player> {
        self.public.seats.iter().filter(|player| !player.folded)
    }

    /// Sets the current bet to the highest street bet among contenders.
    pub fn recompute_current_bet(&mut self) {
        self.public.current_bet = self
            .contenders()
            .map(|player| player.street_bet)
            .max()
            .unwrap_or(0);
    }

    /// Sum of every stack plus the pot.
    #[must_use]
    pub fn total_chips(&self) -> Chips {
        self.public.pot
            + self
                .public
                .seats
                .iter()
                .map(|player| player.stack)
                .sum::<Chips>()
    }
}
