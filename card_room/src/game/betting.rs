use super::{
    entities::{Action, ActionRequest, Chips, SeatId},
    errors::GameError,
    state::TableState,
    turns::{TurnOutcome, TurnSequencer},
};

/// An action the engine accepted, with the chips it moved into the pot and
/// where the turn went afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppliedAction {
    pub seat: SeatId,
    pub action: Action,
    pub chips: Chips,
    pub outcome: TurnOutcome,
}

/// Validates and applies betting actions. Validation happens in full before
/// any field is touched, so a rejected action never leaves a partial write.
pub struct BettingEngine;

impl BettingEngine {
    pub fn apply(
        state: &mut TableState,
        seat: &SeatId,
        action: Action,
    ) -> Result<AppliedAction, GameError> {
        if state.public.current_actor.as_ref() != Some(seat) {
            return Err(GameError::OutOfTurn);
        }
        let idx = state
            .seat_index(seat)
            .ok_or_else(|| GameError::SeatNotFound(seat.clone()))?;
        let chips = Self::chips_for(state, idx, action)?;

        let player = &mut state.public.seats[idx];
        player.stack -= chips;
        player.street_bet += chips;
        player.last_action = action.kind();
        let street_bet = player.street_bet;
        state.public.pot += chips;
        match action {
            Action::Bet(_) | Action::Raise(_) => state.public.current_bet = street_bet,
            Action::Fold => {
                state.public.seats[idx].folded = true;
                state.recompute_current_bet();
            }
            Action::Check | Action::Call => {}
        }

        let outcome = TurnSequencer::advance_from(state, idx);
        Ok(AppliedAction {
            seat: seat.clone(),
            action,
            chips,
            outcome,
        })
    }

    /// Same as [`BettingEngine::apply`] for an unvalidated client payload.
    pub fn apply_request(
        state: &mut TableState,
        seat: &SeatId,
        request: ActionRequest,
    ) -> Result<AppliedAction, GameError> {
        Self::apply(state, seat, Action::try_from(request)?)
    }

    /// Chips the action moves from the seat's stack into the pot.
    fn chips_for(state: &TableState, idx: usize, action: Action) -> Result<Chips, GameError> {
        let current_bet = state.public.current_bet;
        let player = &state.public.seats[idx];
        let insufficient = || GameError::InsufficientFunds(player.id.clone());
        match action {
            Action::Check => {
                if player.street_bet < current_bet {
                    return Err(GameError::IllegalCheck);
                }
                Ok(0)
            }
            Action::Call => {
                let to_call = current_bet.saturating_sub(player.street_bet);
                if to_call == 0 {
                    return Err(GameError::NothingToCall);
                }
                if player.stack < to_call {
                    return Err(insufficient());
                }
                Ok(to_call)
            }
            Action::Bet(amount) => {
                if amount == 0 {
                    return Err(GameError::ZeroOrNegativeAmount);
                }
                if player.street_bet > 0 {
                    return Err(GameError::AlreadyBet(player.id.clone()));
                }
                if current_bet > 0 {
                    return Err(GameError::BettingAlreadyOpen);
                }
                if player.stack < amount {
                    return Err(insufficient());
                }
                Ok(amount)
            }
            Action::Raise(amount) => {
                if amount == 0 {
                    return Err(GameError::ZeroOrNegativeAmount);
                }
                let total = current_bet
                    .saturating_sub(player.street_bet)
                    .checked_add(amount)
                    .ok_or_else(insufficient)?;
                if player.stack < total {
                    return Err(insufficient());
                }
                Ok(total)
            }
            Action::Fold => Ok(0),
        }
    }
}
