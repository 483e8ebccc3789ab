use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

use super::errors::GameError;
use crate::auth::Identity;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Hearts => "♥",
            Self::Diamonds => "♦",
            Self::Clubs => "♣",
            Self::Spades => "♠",
        };
        write!(f, "{repr}")
    }
}

/// Card ranks in deck order. The ace sits at index 0; there is no hand
/// ranking, so its high/low duality never matters here.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        };
        write!(f, "{repr}")
    }
}

/// An immutable playing card. Renders as rank followed by suit symbol,
/// e.g. `A♥` or `10♠`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Builds a card from its numeric suit (0..=3) and rank (0..=12) indices.
    #[must_use]
    pub fn from_indices(suit: u8, rank: u8) -> Option<Self> {
        Some(Self::new(Rank::from_index(rank)?, Suit::from_index(suit)?))
    }

    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

pub const DECK_SIZE: usize = 52;

/// Ordered sequence of cards. The top of the deck is the end of the
/// sequence, so drawing is a pop.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Returns a fresh deck holding each of the 52 suit/rank pairs exactly once.
    #[must_use]
    pub fn full() -> Self {
        let cards = Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    pub fn reset(&mut self) {
        *self = Self::full();
    }

    /// Uniform in-place Fisher-Yates permutation.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::full()
    }
}

/// Whole chips. Stacks, bets, and the pot are never fractional.
pub type Chips = u64;

/// Stable identifier of a seated participant. Equal to the id of the
/// identity that took the seat.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SeatId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SeatId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The kind of the last action a seat took on the current street. `None`
/// means the seat hasn't acted yet.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    #[default]
    None,
    Check,
    Call,
    Bet,
    Raise,
    Fold,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::None => "none",
            Self::Check => "check",
            Self::Call => "call",
            Self::Bet => "bet",
            Self::Raise => "raise",
            Self::Fold => "fold",
        };
        write!(f, "{repr}")
    }
}

/// A validated betting action. Bet and raise carry their chip amount.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Action {
    Check,
    Call,
    Bet(Chips),
    Raise(Chips),
    Fold,
}

impl Action {
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Check => ActionKind::Check,
            Self::Call => ActionKind::Call,
            Self::Bet(_) => ActionKind::Bet,
            Self::Raise(_) => ActionKind::Raise,
            Self::Fold => ActionKind::Fold,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Check => "checks",
            Self::Call => "calls",
            Self::Bet(amount) => &format!("bets {amount}"),
            Self::Raise(amount) => &format!("raises {amount}"),
            Self::Fold => "folds",
        };
        write!(f, "{repr}")
    }
}

/// Untrusted action payload as it arrives from a client. Converting it into
/// an [`Action`] rejects `NONE` and non-positive or missing amounts before
/// anything reaches the betting engine. Amounts on check, call, and fold
/// are ignored.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActionRequest {
    pub action: ActionKind,
    #[serde(default)]
    pub amount: Option<i64>,
}

impl TryFrom<ActionRequest> for Action {
    type Error = GameError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        let positive = |amount: Option<i64>| {
            amount
                .and_then(|amount| Chips::try_from(amount).ok())
                .filter(|amount| *amount > 0)
                .ok_or(GameError::ZeroOrNegativeAmount)
        };
        match request.action {
            ActionKind::None => Err(GameError::InvalidAction),
            ActionKind::Check => Ok(Self::Check),
            ActionKind::Call => Ok(Self::Call),
            ActionKind::Bet => positive(request.amount).map(Self::Bet),
            ActionKind::Raise => positive(request.amount).map(Self::Raise),
            ActionKind::Fold => Ok(Self::Fold),
        }
    }
}

/// Set of action kinds the current actor may legally choose.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ActionChoices(BTreeSet<ActionKind>);

impl ActionChoices {
    #[must_use]
    pub fn contains(&self, kind: ActionKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn insert(&mut self, kind: ActionKind) -> bool {
        self.0.insert(kind)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for ActionChoices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_options = self.0.len();
        let repr = self
            .0
            .iter()
            .enumerate()
            .map(|(i, kind)| match i {
                0 if num_options == 1 => kind.to_string(),
                0 if num_options == 2 => format!("{kind} "),
                i if i == num_options - 1 => format!("or {kind}"),
                _ => format!("{kind}, "),
            })
            .collect::<String>();
        write!(f, "{repr}")
    }
}

impl<I> From<I> for ActionChoices
where
    I: IntoIterator<Item = ActionKind>,
{
    fn from(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A seated participant and their per-street betting state.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: SeatId,
    pub display_name: String,
    pub avatar: Option<String>,
    pub stack: Chips,
    /// Chips committed on the current street.
    pub street_bet: Chips,
    pub last_action: ActionKind,
    pub folded: bool,
}

impl Player {
    #[must_use]
    pub fn new(identity: Identity, stack: Chips) -> Self {
        Self {
            id: identity.id,
            display_name: identity.display_name,
            avatar: identity.avatar,
            stack,
            street_bet: 0,
            last_action: ActionKind::None,
            folded: false,
        }
    }

    /// A seat is settled once it has acted on this street and matched the
    /// current bet. Folded seats never need to act again.
    #[must_use]
    pub fn is_settled(&self, current_bet: Chips) -> bool {
        self.folded || (self.last_action != ActionKind::None && self.street_bet >= current_bet)
    }

    pub fn reset_street(&mut self) {
        self.street_bet = 0;
        if !self.folded {
            self.last_action = ActionKind::None;
        }
    }

    pub fn reset_hand(&mut self) {
        self.street_bet = 0;
        self.last_action = ActionKind::None;
        self.folded = false;
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.stack)
    }
}

/// One forced bet: its fixed amount and the seat that posted it this hand.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BlindPosition {
    pub amount: Chips,
    pub seat: Option<SeatId>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub small: BlindPosition,
    pub big: BlindPosition,
}

impl Blinds {
    #[must_use]
    pub const fn new(small: Chips, big: Chips) -> Self {
        Self {
            small: BlindPosition {
                amount: small,
                seat: None,
            },
            big: BlindPosition {
                amount: big,
                seat: None,
            },
        }
    }
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.small.amount, self.big.amount)
    }
}

/// Hole cards revealed by a contender at showdown.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ShownHand {
    pub seat: SeatId,
    pub cards: [Card; 2],
}
