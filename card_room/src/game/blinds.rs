use super::{
    entities::ActionKind,
    errors::GameError,
    state::TableState,
    turns::{TurnOutcome, TurnSequencer},
};

/// Posts the forced bets that open a hand.
pub struct BlindsManager;

impl BlindsManager {
    /// The small blind falls on the recorded small-blind seat (or the first
    /// seat if none is recorded yet) and the big blind on the seat clockwise
    /// of it. Both stacks are checked before either is debited. On success
    /// the turn goes to the seat after the big blind.
    pub fn post_blinds(state: &mut TableState) -> Result<TurnOutcome, GameError> {
        let num_seats = state.public.seats.len();
        if num_seats < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        let small_idx = match &state.public.blinds.small.seat {
            Some(seat) => state
                .seat_index(seat)
                .ok_or_else(|| GameError::SeatNotFound(seat.clone()))?,
            None => 0,
        };
        let big_idx = (small_idx + 1) % num_seats;
        let small_amount = state.public.blinds.small.amount;
        let big_amount = state.public.blinds.big.amount;

        for (idx, amount) in [(small_idx, small_amount), (big_idx, big_amount)] {
            let player = &state.public.seats[idx];
            if player.stack < amount {
                return Err(GameError::InsufficientFunds(player.id.clone()));
            }
        }

        for (idx, amount) in [(small_idx, small_amount), (big_idx, big_amount)] {
            let player = &mut state.public.seats[idx];
            player.stack -= amount;
            player.street_bet = amount;
            player.last_action = ActionKind::None;
        }
        state.public.pot += small_amount + big_amount;
        state.public.current_bet = big_amount.max(small_amount);
        state.public.blinds.small.seat = Some(state.public.seats[small_idx].id.clone());
        state.public.blinds.big.seat = Some(state.public.seats[big_idx].id.clone());
        log::debug!(
            "blinds {} posted by {} and {}",
            state.public.blinds,
            state.public.seats[small_idx].id,
            state.public.seats[big_idx].id
        );

        Ok(TurnSequencer::advance_from(state, big_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::table_with_stacks;

    #[test]
    fn first_hand_posts_from_the_first_seat() {
        let mut state = table_with_stacks(&[1000, 1000, 1000]);
        let outcome = BlindsManager::post_blinds(&mut state).unwrap();
        let ids: Vec<_> = state.public.seats.iter().map(|p| p.id.clone()).collect();
        assert_eq!(state.public.blinds.small.seat, Some(ids[0].clone()));
        assert_eq!(state.public.blinds.big.seat, Some(ids[1].clone()));
        assert_eq!(state.public.seats[0].stack, 950);
        assert_eq!(state.public.seats[1].stack, 900);
        assert_eq!(state.public.pot, 150);
        assert_eq!(state.public.current_bet, 100);
        assert_eq!(outcome, TurnOutcome::NextActor(ids[2].clone()));
        assert_eq!(state.public.current_actor, Some(ids[2].clone()));
    }

    #[test]
    fn heads_up_action_returns_to_the_small_blind() {
        let mut state = table_with_stacks(&[1000, 1000]);
        let outcome = BlindsManager::post_blinds(&mut state).unwrap();
        assert_eq!(state.public.seats[0].stack, 950);
        assert_eq!(state.public.seats[1].stack, 900);
        assert_eq!(state.public.pot, 150);
        assert_eq!(state.public.current_bet, 100);
        let small = state.public.seats[0].id.clone();
        assert_eq!(outcome, TurnOutcome::NextActor(small.clone()));
        assert_eq!(state.public.current_actor, Some(small));
    }

    #[test]
    fn big_blind_wraps_around_the_table() {
        let mut state = table_with_stacks(&[1000, 1000, 1000]);
        state.public.blinds.small.seat = Some(state.public.seats[2].id.clone());
        BlindsManager::post_blinds(&mut state).unwrap();
        assert_eq!(
            state.public.blinds.big.seat,
            Some(state.public.seats[0].id.clone())
        );
        assert_eq!(state.public.seats[0].street_bet, 100);
        assert_eq!(state.public.seats[2].street_bet, 50);
    }

    #[test]
    fn short_big_blind_leaves_state_untouched() {
        let mut state = table_with_stacks(&[1000, 60]);
        let before = state.public.clone();
        assert_eq!(
            BlindsManager::post_blinds(&mut state),
            Err(GameError::InsufficientFunds(
                state.public.seats[1].id.clone()
            ))
        );
        assert_eq!(state.public, before);
    }

    #[test]
    fn needs_two_seats() {
        let mut state = table_with_stacks(&[1000]);
        assert_eq!(
            BlindsManager::post_blinds(&mut state),
            Err(GameError::NotEnoughPlayers)
        );
    }

    #[test]
    fn unknown_small_blind_seat_is_reported() {
        let mut state = table_with_stacks(&[1000, 1000]);
        state.public.blinds.small.seat = Some("ghost".into());
        assert_eq!(
            BlindsManager::post_blinds(&mut state),
            Err(GameError::SeatNotFound("ghost".into()))
        );
    }
}
