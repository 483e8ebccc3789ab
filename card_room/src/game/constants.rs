use super::entities::Chips;

pub const MIN_SEATS: usize = 2;
/// Ten seats deal at most 20 hole cards and 5 board cards, well within a
/// single deck.
pub const MAX_SEATS: usize = 10;

pub const DEFAULT_SMALL_BLIND: Chips = 50;
pub const DEFAULT_BIG_BLIND: Chips = 100;
pub const DEFAULT_STARTING_STACK: Chips = 100_000;
pub const DEFAULT_START_COUNTDOWN_SECS: u64 = 5;
