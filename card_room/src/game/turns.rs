use super::{
    entities::{ActionChoices, ActionKind, Player, SeatId},
    state::TableState,
};

/// Result of moving the turn along after an action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TurnOutcome {
    NextActor(SeatId),
    /// Every contender has acted and matched the current bet.
    StreetComplete,
}

/// Decides who acts next and what they may do.
pub struct TurnSequencer;

impl TurnSequencer {
    /// Scans clockwise from the seat after `anchor`, wrapping around and
    /// visiting `anchor` itself last, for a contender that still owes an
    /// action on this street.
    #[must_use]
    pub fn next_active_index(state: &TableState, anchor: usize) -> Option<usize> {
        let seats = &state.public.seats;
        let num_seats = seats.len();
        if num_seats == 0 {
            return None;
        }
        (1..=num_seats)
            .map(|offset| (anchor + offset) % num_seats)
            .find(|&idx| !seats[idx].is_settled(state.public.current_bet))
    }

    /// The next seat to act after the current actor. Without a current
    /// actor the scan starts from the first seat.
    #[must_use]
    pub fn next_active_seat(state: &TableState) -> Option<SeatId> {
        let num_seats = state.public.seats.len();
        let anchor = state
            .public
            .current_actor
            .as_ref()
            .and_then(|seat| state.seat_index(seat))
            .unwrap_or(num_seats.saturating_sub(1));
        Self::next_active_index(state, anchor).map(|idx| state.public.seats[idx].id.clone())
    }

    #[must_use]
    pub fn available_actions(state: &TableState, player: &Player) -> ActionChoices {
        let current_bet = state.public.current_bet;
        let big_blind = state.public.blinds.big.amount;
        let mut choices = ActionChoices::from([ActionKind::Fold]);
        if current_bet == player.street_bet {
            choices.insert(ActionKind::Check);
        }
        if current_bet > 0 && player.stack >= current_bet {
            choices.insert(ActionKind::Call);
        }
        if current_bet == 0 && player.stack >= big_blind {
            choices.insert(ActionKind::Bet);
        }
        // Offered on twice the current bet even though the engine accepts
        // any raise the stack covers.
        if current_bet > 0 && player.stack >= current_bet.saturating_mul(2) {
            choices.insert(ActionKind::Raise);
        }
        choices
    }

    /// Hands the turn to the next unsettled seat after `anchor`, or closes
    /// the street when there is none.
    pub fn advance_from(state: &mut TableState, anchor: usize) -> TurnOutcome {
        match Self::next_active_index(state, anchor) {
            Some(idx) => {
                let player = &state.public.seats[idx];
                let choices = Self::available_actions(state, player);
                let seat = player.id.clone();
                state.public.current_actor = Some(seat.clone());
                state.public.available_actions = choices;
                TurnOutcome::NextActor(seat)
            }
            None => {
                state.public.current_actor = None;
                state.public.available_actions.clear();
                TurnOutcome::StreetComplete
            }
        }
    }
}
