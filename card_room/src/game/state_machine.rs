//! Hand lifecycle for a single table.
//!
//! [`Game`] sequences the betting, blinds, and dealing helpers through the
//! phase cycle and queues [`GameEvent`]s describing what happened so the
//! owner can notify seats and manage the start countdown.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, VecDeque},
    fmt,
};

use super::{
    betting::{AppliedAction, BettingEngine},
    blinds::BlindsManager,
    constants::{
        DEFAULT_BIG_BLIND, DEFAULT_SMALL_BLIND, DEFAULT_STARTING_STACK, MAX_SEATS, MIN_SEATS,
    },
    dealing::DealingCoordinator,
    entities::{Action, ActionKind, Blinds, Card, Chips, Player, SeatId, ShownHand},
    errors::GameError,
    phase::Phase,
    state::{PublicState, TableState},
    turns::{TurnOutcome, TurnSequencer},
};
use crate::auth::Identity;

/// Events that occur during gameplay
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameEvent {
    Joined(SeatId),
    /// Joined while a hand was running and sits out until the next one.
    SittingOut(SeatId),
    LeaveQueued(SeatId),
    Left(SeatId),
    Busted(SeatId),
    CountdownArmed,
    CountdownCancelled,
    HandStarted(u64),
    HoleCardsDealt,
    Acted { seat: SeatId, action: Action },
    AutoFolded(SeatId),
    StreetDealt { phase: Phase, cards: Vec<Card> },
    Showdown(Vec<ShownHand>),
    PotAwarded { seat: SeatId, amount: Chips },
    PotCarried(Chips),
    HandEnded(u64),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Joined(seat) => format!("{seat} joined the table"),
            Self::SittingOut(seat) => format!("{seat} sits out until the next hand"),
            Self::LeaveQueued(seat) => format!("{seat} will be removed after the hand"),
            Self::Left(seat) => format!("{seat} left the table"),
            Self::Busted(seat) => format!("{seat} can't cover the big blind"),
            Self::CountdownArmed => "start countdown armed".to_string(),
            Self::CountdownCancelled => "start countdown cancelled".to_string(),
            Self::HandStarted(hand) => format!("hand #{hand} started"),
            Self::HoleCardsDealt => "hole cards dealt".to_string(),
            Self::Acted { seat, action } => format!("{seat} {action}"),
            Self::AutoFolded(seat) => format!("{seat} folded on leaving"),
            Self::StreetDealt { phase, cards } => {
                let cards = cards.iter().map(ToString::to_string).collect::<Vec<_>>();
                format!("{phase}: {}", cards.join(" "))
            }
            Self::Showdown(hands) => format!("{} hands shown down", hands.len()),
            Self::PotAwarded { seat, amount } => format!("{seat} won {amount}"),
            Self::PotCarried(amount) => format!("{amount} carried into the next hand"),
            Self::HandEnded(hand) => format!("hand #{hand} ended"),
        };
        write!(f, "{repr}")
    }
}

/// Game configuration settings
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSettings {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub starting_stack: Chips,
    pub max_seats: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(
            DEFAULT_SMALL_BLIND,
            DEFAULT_BIG_BLIND,
            DEFAULT_STARTING_STACK,
            MAX_SEATS,
        )
    }
}

impl GameSettings {
    #[must_use]
    pub const fn new(
        small_blind: Chips,
        big_blind: Chips,
        starting_stack: Chips,
        max_seats: usize,
    ) -> Self {
        Self {
            small_blind,
            big_blind,
            starting_stack,
            max_seats,
        }
    }
}

/// One table's state plus the rules for moving it between phases.
///
/// Every public method either succeeds or returns an error with the table
/// left as it was.
#[derive(Debug)]
pub struct Game {
    state: TableState,
    settings: GameSettings,
    /// Seats that left mid-hand. They can't be removed until the hand
    /// ends, so they're folded and queued instead.
    to_remove: BTreeSet<SeatId>,
    events: VecDeque<GameEvent>,
    hands_played: u64,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}

impl Game {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        let blinds = Blinds::new(settings.small_blind, settings.big_blind);
        let mut game = Self {
            state: TableState::new(blinds),
            settings,
            to_remove: BTreeSet::new(),
            events: VecDeque::new(),
            hands_played: 0,
        };
        game.reset();
        game
    }

    /// Drops back to waiting for players. Asks for the countdown to be
    /// cancelled if one was running.
    pub fn reset(&mut self) {
        if self.state.public.phase == Phase::Starting {
            self.events.push_back(GameEvent::CountdownCancelled);
        }
        self.state.public.phase = Phase::WaitingForPlayers;
    }

    #[must_use]
    pub fn can_start(&self) -> bool {
        self.state.public.seats.len() >= MIN_SEATS && !self.state.public.is_started
    }

    pub fn add_seat(&mut self, identity: Identity) -> Result<Player, GameError> {
        let seat = identity.id.clone();
        // A seat that left mid-hand stays taken until the hand ends.
        if self.state.seat_index(&seat).is_some() {
            return Err(GameError::SeatTaken(seat));
        }
        if self.state.public.seats.len() >= self.settings.max_seats {
            return Err(GameError::TableFull);
        }

        let mut player = Player::new(identity, self.settings.starting_stack);
        if self.state.public.is_started {
            player.folded = true;
            self.events.push_back(GameEvent::SittingOut(seat.clone()));
        }
        self.state.public.seats.push(player.clone());
        self.events.push_back(GameEvent::Joined(seat));

        if self.can_start() && self.state.public.phase == Phase::WaitingForPlayers {
            self.state.public.phase = self.state.public.phase.next();
            self.events.push_back(GameEvent::CountdownArmed);
        }
        Ok(player)
    }

    /// Removes a seat. Between hands this is immediate; during a hand the
    /// seat is folded on the spot and removed once the hand ends.
    pub fn remove_seat(&mut self, seat: &SeatId) -> Result<(), GameError> {
        let idx = self
            .state
            .seat_index(seat)
            .ok_or_else(|| GameError::SeatNotFound(seat.clone()))?;

        if !self.state.public.is_started {
            self.state.public.seats.remove(idx);
            let blinds = &mut self.state.public.blinds;
            if blinds.small.seat.as_ref() == Some(seat) {
                // The seat that inherited the index is next in line.
                let seats = &self.state.public.seats;
                blinds.small.seat = (!seats.is_empty()).then(|| seats[idx % seats.len()].id.clone());
            }
            if blinds.big.seat.as_ref() == Some(seat) {
                blinds.big.seat = None;
            }
            self.events.push_back(GameEvent::Left(seat.clone()));
            if self.state.public.seats.len() < MIN_SEATS
                && self.state.public.phase == Phase::Starting
            {
                self.reset();
            }
            return Ok(());
        }

        if self.to_remove.insert(seat.clone()) {
            self.events.push_back(GameEvent::LeaveQueued(seat.clone()));
        }
        if self.state.public.seats[idx].folded {
            return Ok(());
        }

        let player = &mut self.state.public.seats[idx];
        player.folded = true;
        player.last_action = ActionKind::Fold;
        self.state.recompute_current_bet();
        self.events.push_back(GameEvent::AutoFolded(seat.clone()));

        // Rescan from the actor itself since the fold may have lowered the
        // bet they were facing.
        let num_seats = self.state.public.seats.len();
        let anchor = match &self.state.public.current_actor {
            Some(actor) if actor == seat => idx,
            Some(actor) => {
                let actor_idx = self.state.seat_index(actor).unwrap_or(idx);
                (actor_idx + num_seats - 1) % num_seats
            }
            None => idx,
        };
        let outcome = TurnSequencer::advance_from(&mut self.state, anchor);
        self.settle(&outcome)
    }

    /// Starts a hand from `STARTING`, or straight from `WAITING_FOR_PLAYERS`
    /// when someone asks to skip the countdown.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        self.start_hand_with(&mut rand::rng())
    }

    pub fn start_hand_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        let phase = self.state.public.phase;
        if self.state.public.is_started {
            return Err(GameError::InvalidPhase(phase.to_string()));
        }
        if self.state.public.seats.len() < MIN_SEATS {
            return Err(GameError::NotEnoughPlayers);
        }
        if !matches!(phase, Phase::WaitingForPlayers | Phase::Starting) {
            return Err(GameError::InvalidPhase(phase.to_string()));
        }

        BlindsManager::post_blinds(&mut self.state)?;
        let public = &mut self.state.public;
        public.is_started = true;
        public.community_cards.clear();
        public.showdown.clear();
        public.phase = Phase::Starting.next();
        DealingCoordinator::deal_hole_cards(&mut self.state, rng)?;
        self.state.public.phase = self.state.public.phase.next();

        self.hands_played += 1;
        log::info!(
            "Hand #{} dealt to {} seats, pot {}",
            self.hands_played,
            self.state.public.seats.len(),
            self.state.public.pot
        );
        self.events.push_back(GameEvent::HandStarted(self.hands_played));
        self.events.push_back(GameEvent::HoleCardsDealt);
        Ok(())
    }

    pub fn take_action(&mut self, seat: &SeatId, action: Action) -> Result<AppliedAction, GameError> {
        let phase = self.state.public.phase;
        if !phase.is_betting_street() {
            return Err(GameError::InvalidPhase(phase.to_string()));
        }
        let applied = BettingEngine::apply(&mut self.state, seat, action)
            .inspect_err(|e| log::debug!("{seat} {action} rejected: {e}"))?;
        log::debug!("{seat} {action} moved {} chips", applied.chips);
        self.events.push_back(GameEvent::Acted {
            seat: seat.clone(),
            action,
        });
        self.settle(&applied.outcome)?;
        Ok(applied)
    }

    fn settle(&mut self, outcome: &TurnOutcome) -> Result<(), GameError> {
        if self.state.contenders().count() <= 1 {
            self.conclude_uncontested();
            return Ok(());
        }
        match outcome {
            TurnOutcome::NextActor(_) => Ok(()),
            TurnOutcome::StreetComplete => self.advance_street(),
        }
    }

    fn advance_street(&mut self) -> Result<(), GameError> {
        loop {
            let phase = self.state.public.phase.next();
            self.state.public.phase = phase;
            let cards = DealingCoordinator::deal_community(&mut self.state, phase.community_cards_dealt())?;
            for player in &mut self.state.public.seats {
                player.reset_street();
            }
            self.state.public.current_bet = 0;

            if phase == Phase::Showdown {
                self.showdown();
                return Ok(());
            }
            log::info!("{} dealt, pot {}", phase, self.state.public.pot);
            self.events
                .push_back(GameEvent::StreetDealt { phase, cards });

            let anchor = self.first_actor_anchor();
            if let TurnOutcome::NextActor(_) = TurnSequencer::advance_from(&mut self.state, anchor) {
                return Ok(());
            }
        }
    }

    /// Post-flop action starts with the first contender at or after the
    /// small blind, so the scan anchors on the seat before it.
    fn first_actor_anchor(&self) -> usize {
        let num_seats = self.state.public.seats.len();
        self.state
            .public
            .blinds
            .small
            .seat
            .as_ref()
            .and_then(|seat| self.state.seat_index(seat))
            .map_or(num_seats.saturating_sub(1), |idx| {
                (idx + num_seats - 1) % num_seats
            })
    }

    /// Reveals the contenders' hole cards. There's no hand ranking, so the
    /// pot stays put and seeds the next hand.
    fn showdown(&mut self) {
        let shown: Vec<ShownHand> = self
            .state
            .contenders()
            .filter_map(|player| {
                self.state.hole_cards(&player.id).map(|cards| ShownHand {
                    seat: player.id.clone(),
                    cards,
                })
            })
            .collect();
        self.state.public.showdown = shown.clone();
        self.events.push_back(GameEvent::Showdown(shown));
        self.events.push_back(GameEvent::PotCarried(self.state.public.pot));
        self.state.public.phase = self.state.public.phase.next();
        self.end_hand();
    }

    fn conclude_uncontested(&mut self) {
        let winner = self.state.contenders().next().map(|player| player.id.clone());
        if let Some(seat) = winner {
            let amount = std::mem::take(&mut self.state.public.pot);
            if let Some(player) = self.state.player_mut(&seat) {
                player.stack += amount;
            }
            self.events.push_back(GameEvent::PotAwarded { seat, amount });
        }
        while self.state.public.phase != Phase::GameOver {
            self.state.public.phase = self.state.public.phase.next();
        }
        self.end_hand();
    }

    /// Clears the hand, rotates the small blind, drops departed and busted
    /// seats, and arms the next countdown if enough seats remain.
    fn end_hand(&mut self) {
        self.events.push_back(GameEvent::HandEnded(self.hands_played));
        self.state.public.phase = self.state.public.phase.next();

        let big_blind = self.state.public.blinds.big.amount;
        let to_remove = std::mem::take(&mut self.to_remove);
        let stays = |player: &Player| !to_remove.contains(&player.id) && player.stack >= big_blind;

        let seats = &self.state.public.seats;
        let num_seats = seats.len();
        let small_idx = self
            .state
            .public
            .blinds
            .small
            .seat
            .as_ref()
            .and_then(|seat| self.state.seat_index(seat))
            .unwrap_or(0);
        let next_small = (1..=num_seats)
            .map(|offset| &seats[(small_idx + offset) % num_seats])
            .find(|player| stays(player))
            .map(|player| player.id.clone());
        self.state.public.blinds.small.seat = next_small;
        self.state.public.blinds.big.seat = None;

        let events = &mut self.events;
        self.state.public.seats.retain(|player| {
            if to_remove.contains(&player.id) {
                events.push_back(GameEvent::Left(player.id.clone()));
                false
            } else if player.stack < big_blind {
                events.push_back(GameEvent::Busted(player.id.clone()));
                false
            } else {
                true
            }
        });
        for player in &mut self.state.public.seats {
            player.reset_hand();
        }

        let public = &mut self.state.public;
        public.current_actor = None;
        public.available_actions.clear();
        public.current_bet = 0;
        public.is_started = false;
        public.phase = public.phase.next();
        self.state.private.hole_cards.clear();

        if self.can_start() {
            self.state.public.phase = self.state.public.phase.next();
            self.events.push_back(GameEvent::CountdownArmed);
        }
    }

    pub fn drain_events(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn state(&self) -> &TableState {
        &self.state
    }

    #[must_use]
    pub fn public_view(&self) -> &PublicState {
        &self.state.public
    }

    #[must_use]
    pub fn hole_cards(&self, seat: &SeatId) -> Option<[Card; 2]> {
        self.state.hole_cards(seat)
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.state.public.seats.len()
    }

    #[must_use]
    pub fn is_seated(&self, seat: &SeatId) -> bool {
        self.state.seat_index(seat).is_some() && !self.to_remove.contains(seat)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn settings() -> GameSettings {
        GameSettings::new(50, 100, 1000, 6)
    }

    fn seat(id: &str) -> SeatId {
        SeatId::new(id)
    }

    fn game_with(ids: &[&str]) -> Game {
        let mut game = Game::new(settings());
        for id in ids {
            game.add_seat(Identity::new(*id, id.to_uppercase())).unwrap();
        }
        game.drain_events();
        game
    }

    fn started(ids: &[&str]) -> Game {
        let mut game = game_with(ids);
        game.start_hand_with(&mut StdRng::seed_from_u64(11)).unwrap();
        game.drain_events();
        game
    }

    fn actor(game: &Game) -> SeatId {
        game.public_view().current_actor.clone().unwrap()
    }

    #[test]
    fn new_game_waits_for_players() {
        let game = Game::new(settings());
        assert_eq!(game.public_view().phase, Phase::WaitingForPlayers);
        assert!(!game.can_start());
    }

    #[test]
    fn second_seat_arms_the_countdown() {
        let mut game = Game::new(settings());
        game.add_seat(Identity::new("a", "A")).unwrap();
        assert_eq!(game.public_view().phase, Phase::WaitingForPlayers);
        game.add_seat(Identity::new("b", "B")).unwrap();
        assert_eq!(game.public_view().phase, Phase::Starting);
        assert!(game.drain_events().contains(&GameEvent::CountdownArmed));
    }

    #[test]
    fn duplicate_and_overflow_seats_are_rejected() {
        let mut game = game_with(&["a", "b", "c", "d", "e", "f"]);
        assert_eq!(
            game.add_seat(Identity::new("a", "A")),
            Err(GameError::SeatTaken(seat("a")))
        );
        assert_eq!(
            game.add_seat(Identity::new("g", "G")),
            Err(GameError::TableFull)
        );
    }

    #[test]
    fn leaving_during_countdown_cancels_it() {
        let mut game = game_with(&["a", "b"]);
        game.remove_seat(&seat("b")).unwrap();
        assert_eq!(game.public_view().phase, Phase::WaitingForPlayers);
        assert!(game.drain_events().contains(&GameEvent::CountdownCancelled));
    }

    #[test]
    fn start_requires_two_seats() {
        let mut game = game_with(&["a"]);
        assert_eq!(game.start_hand(), Err(GameError::NotEnoughPlayers));
        assert_eq!(game.public_view().phase, Phase::WaitingForPlayers);
    }

    #[test]
    fn start_posts_blinds_and_deals() {
        let game = started(&["a", "b", "c"]);
        let view = game.public_view();
        assert!(view.is_started);
        assert_eq!(view.phase, Phase::PreFlop);
        assert_eq!(view.pot, 150);
        assert_eq!(view.current_bet, 100);
        assert_eq!(view.current_actor, Some(seat("c")));
        for id in ["a", "b", "c"] {
            assert!(game.hole_cards(&seat(id)).is_some());
        }
        assert_eq!(game.state().private.deck.len(), 52 - 6);
    }

    #[test]
    fn starting_twice_is_rejected() {
        let mut game = started(&["a", "b"]);
        assert_eq!(
            game.start_hand(),
            Err(GameError::InvalidPhase("PRE_FLOP".to_string()))
        );
    }

    #[test]
    fn action_outside_a_street_is_rejected() {
        let mut game = game_with(&["a", "b"]);
        assert_eq!(
            game.take_action(&seat("a"), Action::Check),
            Err(GameError::InvalidPhase("STARTING".to_string()))
        );
    }

    #[test]
    fn folding_to_one_player_awards_the_pot() {
        let mut game = started(&["a", "b", "c"]);
        game.take_action(&seat("c"), Action::Fold).unwrap();
        game.take_action(&seat("a"), Action::Fold).unwrap();
        let view = game.public_view();
        assert!(!view.is_started);
        assert_eq!(view.pot, 0);
        let stacks: Vec<Chips> = view.seats.iter().map(|p| p.stack).collect();
        assert_eq!(stacks, vec![950, 1050, 1000]);
        // Small blind rotates to b and the next countdown is armed.
        assert_eq!(view.blinds.small.seat, Some(seat("b")));
        assert_eq!(view.phase, Phase::Starting);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::PotAwarded {
            seat: seat("b"),
            amount: 150
        }));
        assert!(events.contains(&GameEvent::CountdownArmed));
    }

    #[test]
    fn calling_closes_preflop_and_deals_the_flop() {
        let mut game = started(&["a", "b", "c"]);
        game.take_action(&seat("c"), Action::Call).unwrap();
        game.take_action(&seat("a"), Action::Call).unwrap();
        assert_eq!(game.public_view().phase, Phase::PreFlop);
        // Big blind has the option.
        assert_eq!(actor(&game), seat("b"));
        game.take_action(&seat("b"), Action::Check).unwrap();
        let view = game.public_view();
        assert_eq!(view.phase, Phase::Flop);
        assert_eq!(view.community_cards.len(), 3);
        assert_eq!(view.current_bet, 0);
        assert_eq!(view.pot, 300);
        assert!(view.seats.iter().all(|p| p.street_bet == 0));
        // Small blind acts first after the flop.
        assert_eq!(actor(&game), seat("a"));
    }

    #[test]
    fn checked_down_hand_reaches_showdown_and_carries_the_pot() {
        let mut game = started(&["a", "b"]);
        game.take_action(&seat("a"), Action::Call).unwrap();
        game.take_action(&seat("b"), Action::Check).unwrap();
        for _ in 0..3 {
            let first = actor(&game);
            game.take_action(&first, Action::Check).unwrap();
            let second = actor(&game);
            game.take_action(&second, Action::Check).unwrap();
        }
        let view = game.public_view();
        assert!(!view.is_started);
        assert_eq!(view.pot, 200);
        assert_eq!(view.showdown.len(), 2);
        assert_eq!(view.community_cards.len(), 5);
        assert_eq!(view.phase, Phase::Starting);
        assert!(game.hole_cards(&seat("a")).is_none());

        // The carried pot seeds the next hand.
        game.start_hand_with(&mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(game.public_view().pot, 350);
        assert!(game.public_view().showdown.is_empty());
    }

    #[test]
    fn leaving_mid_hand_folds_and_removes_after_the_hand() {
        let mut game = started(&["a", "b", "c"]);
        game.remove_seat(&seat("a")).unwrap();
        assert!(game.public_view().seats[0].folded);
        assert_eq!(actor(&game), seat("c"));
        assert!(!game.is_seated(&seat("a")));

        game.take_action(&seat("c"), Action::Fold).unwrap();
        let view = game.public_view();
        assert!(!view.is_started);
        let ids: Vec<_> = view.seats.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![seat("b"), seat("c")]);
        assert!(game.drain_events().contains(&GameEvent::Left(seat("a"))));
    }

    #[test]
    fn actor_leaving_passes_the_turn() {
        let mut game = started(&["a", "b", "c"]);
        game.remove_seat(&seat("c")).unwrap();
        assert_eq!(actor(&game), seat("a"));
        assert!(game.public_view().available_actions.contains(ActionKind::Call));
    }

    #[test]
    fn heads_up_departure_ends_the_hand() {
        let mut game = started(&["a", "b"]);
        game.remove_seat(&seat("a")).unwrap();
        let view = game.public_view();
        assert!(!view.is_started);
        assert_eq!(view.seats.len(), 1);
        assert_eq!(view.seats[0].stack, 1050);
        assert_eq!(view.phase, Phase::WaitingForPlayers);
    }

    #[test]
    fn mid_hand_joiner_sits_out() {
        let mut game = started(&["a", "b"]);
        let player = game.add_seat(Identity::new("c", "C")).unwrap();
        assert!(player.folded);
        assert!(game.hole_cards(&seat("c")).is_none());
        game.take_action(&seat("a"), Action::Fold).unwrap();
        let view = game.public_view();
        assert_eq!(view.seats.len(), 3);
        assert!(view.seats.iter().all(|p| !p.folded));
    }

    #[test]
    fn rejoining_waits_for_the_hand_to_end() {
        let mut game = started(&["a", "b", "c"]);
        game.remove_seat(&seat("a")).unwrap();
        assert_eq!(
            game.add_seat(Identity::new("a", "A")),
            Err(GameError::SeatTaken(seat("a")))
        );
        game.take_action(&seat("c"), Action::Fold).unwrap();
        assert_eq!(game.seat_count(), 2);

        let player = game.add_seat(Identity::new("a", "A")).unwrap();
        assert_eq!(player.stack, 1000);
        assert!(!player.folded);
    }

    #[test]
    fn short_stacks_are_dropped_between_hands() {
        let mut game = Game::new(GameSettings::new(50, 100, 150, 6));
        for id in ["a", "b"] {
            game.add_seat(Identity::new(id, id)).unwrap();
        }
        game.start_hand_with(&mut StdRng::seed_from_u64(2)).unwrap();
        // a posts 50 and folds, keeping 100; b takes the pot for 200.
        game.take_action(&seat("a"), Action::Fold).unwrap();
        assert_eq!(game.seat_count(), 2);

        game.start_hand_with(&mut StdRng::seed_from_u64(3)).unwrap();
        // b posts the small blind and shoves; a is left with nothing to call.
        game.take_action(&seat("b"), Action::Raise(100)).unwrap();
        game.take_action(&seat("a"), Action::Fold).unwrap();
        let view = game.public_view();
        assert_eq!(view.seats.len(), 1);
        assert_eq!(view.seats[0].id, seat("b"));
        assert_eq!(view.seats[0].stack, 300);
        assert_eq!(view.phase, Phase::WaitingForPlayers);
        assert!(game.drain_events().contains(&GameEvent::Busted(seat("a"))));
    }

    #[test]
    fn removing_the_recorded_small_blind_passes_it_on() {
        let mut game = started(&["a", "b", "c"]);
        game.take_action(&seat("c"), Action::Fold).unwrap();
        game.take_action(&seat("a"), Action::Fold).unwrap();
        assert_eq!(game.public_view().blinds.small.seat, Some(seat("b")));
        game.remove_seat(&seat("b")).unwrap();
        assert_eq!(game.public_view().blinds.small.seat, Some(seat("c")));
    }
}
