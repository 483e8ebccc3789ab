use rand::Rng;
use std::collections::HashMap;

use super::{
    entities::{Card, Deck},
    errors::GameError,
    state::TableState,
};

/// Draws cards from the private deck into hole cards and the board.
pub struct DealingCoordinator;

impl DealingCoordinator {
    /// Resets and shuffles the deck, then deals two passes of one card per
    /// seat in seat order.
    pub fn deal_hole_cards<R: Rng + ?Sized>(
        state: &mut TableState,
        rng: &mut R,
    ) -> Result<(), GameError> {
        let mut deck = Deck::full();
        deck.shuffle(rng);

        let mut first_pass = Vec::with_capacity(state.public.seats.len());
        for _ in &state.public.seats {
            first_pass.push(deck.draw().ok_or(GameError::DeckExhausted)?);
        }
        let mut hole_cards = HashMap::with_capacity(first_pass.len());
        for (player, first) in state.public.seats.iter().zip(first_pass) {
            let second = deck.draw().ok_or(GameError::DeckExhausted)?;
            hole_cards.insert(player.id.clone(), [first, second]);
        }

        state.private.deck = deck;
        state.private.hole_cards = hole_cards;
        Ok(())
    }

    /// Moves `count` cards from the deck to the board.
    pub fn deal_community(state: &mut TableState, count: usize) -> Result<Vec<Card>, GameError> {
        if state.private.deck.len() < count {
            log::error!(
                "Deck holds {} cards but {} are needed",
                state.private.deck.len(),
                count
            );
            return Err(GameError::DeckExhausted);
        }
        let mut dealt = Vec::with_capacity(count);
        for _ in 0..count {
            dealt.extend(state.private.deck.draw());
        }
        state.public.community_cards.extend_from_slice(&dealt);
        Ok(dealt)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    use super::*;
    use crate::game::{entities::DECK_SIZE, test_support::table_with_stacks};

    #[test]
    fn every_seat_gets_two_distinct_cards() {
        let mut state = table_with_stacks(&[1000; 10]);
        DealingCoordinator::deal_hole_cards(&mut state, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(state.private.hole_cards.len(), 10);
        let dealt: HashSet<Card> = state
            .private
            .hole_cards
            .values()
            .flat_map(|cards| cards.iter().copied())
            .collect();
        assert_eq!(dealt.len(), 20);
        assert_eq!(state.private.deck.len(), DECK_SIZE - 20);
        assert!(state.private.deck.cards().iter().all(|c| !dealt.contains(c)));
    }

    #[test]
    fn cards_are_dealt_in_two_passes() {
        let mut state = table_with_stacks(&[1000, 1000, 1000]);
        let mut expected = Deck::full();
        expected.shuffle(&mut StdRng::seed_from_u64(9));
        DealingCoordinator::deal_hole_cards(&mut state, &mut StdRng::seed_from_u64(9)).unwrap();
        let mut order = expected.cards().to_vec();
        let draws: Vec<Card> = (0..6).filter_map(|_| order.pop()).collect();
        for (idx, player) in state.public.seats.iter().enumerate() {
            let cards = state.hole_cards(&player.id).unwrap();
            assert_eq!(cards, [draws[idx], draws[idx + 3]]);
        }
    }

    #[test]
    fn community_cards_come_off_the_same_deck() {
        let mut state = table_with_stacks(&[1000, 1000]);
        DealingCoordinator::deal_hole_cards(&mut state, &mut StdRng::seed_from_u64(1)).unwrap();
        let flop = DealingCoordinator::deal_community(&mut state, 3).unwrap();
        assert_eq!(flop.len(), 3);
        assert_eq!(state.public.community_cards, flop);
        assert_eq!(state.private.deck.len(), DECK_SIZE - 7);
    }

    #[test]
    fn exhausted_deck_is_reported_without_changes() {
        let mut state = table_with_stacks(&[1000, 1000]);
        state.private.deck = Deck::full();
        while state.private.deck.len() > 2 {
            state.private.deck.draw();
        }
        assert_eq!(
            DealingCoordinator::deal_community(&mut state, 3),
            Err(GameError::DeckExhausted)
        );
        assert_eq!(state.private.deck.len(), 2);
        assert!(state.public.community_cards.is_empty());
    }
}
