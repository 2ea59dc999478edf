//! Contract-based validation for rolls.
//!
//! Contracts formalize Hoare-style reasoning: {P} roll {Q}. Preconditions
//! are always checked before a roll touches state; postconditions run in
//! debug builds once the roll is completed, against the part of the state
//! captured before it.

use crate::dice::DieValue;
use crate::error::GameError;
use crate::invariants::{InvariantSet, LadderInvariants};
use crate::phase::TurnState;
use crate::{Game, GamePhase};
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// State recorded before the action for the postcondition.
    type Before;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Records what the postcondition needs from the state before the action.
    fn capture(state: &S) -> Self::Before;

    /// Checks postconditions after applying the action.
    fn post(before: &Self::Before, after: &S) -> Result<(), GameError>;
}

/// Precondition: the game is being played.
pub struct GameIsPlaying;

impl GameIsPlaying {
    /// Fails with [`GameError::NoActivePlayer`] outside the playing phase.
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> Result<(), GameError> {
        if game.phase() == GamePhase::Playing && !game.roster().is_empty() {
            Ok(())
        } else {
            Err(GameError::NoActivePlayer)
        }
    }
}

/// Precondition: the previous roll has been completed.
pub struct NoRollPending;

impl NoRollPending {
    /// Fails with [`GameError::DuplicateRollInFlight`] while a roll is pending.
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> Result<(), GameError> {
        if *game.turn().roll_in_flight() {
            warn!("Roll rejected, previous roll still in flight");
            Err(GameError::DuplicateRollInFlight)
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for issuing a roll.
pub struct LegalRoll;

impl LegalRoll {
    /// Validates all preconditions for a roll.
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> Result<(), GameError> {
        GameIsPlaying::check(game)?;
        NoRollPending::check(game)?;
        Ok(())
    }
}

/// Contract for rolls.
///
/// Preconditions:
/// - The game is in the playing phase
/// - No roll is in flight
/// - The die value is a face of the die
///
/// Postconditions:
/// - Every position is on the board
/// - The turn index points into the roster
/// - Finished exactly when a single winner stands on square 100
/// - Non-winning turns advance by exactly one slot
pub struct RollContract;

impl Contract<Game, u8> for RollContract {
    type Before = TurnState;

    fn pre(game: &Game, die: &u8) -> Result<(), GameError> {
        LegalRoll::check(game)?;
        DieValue::new(*die)?;
        Ok(())
    }

    fn capture(game: &Game) -> TurnState {
        *game.turn()
    }

    fn post(before: &TurnState, after: &Game) -> Result<(), GameError> {
        LadderInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            GameError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        if after.phase() == GamePhase::Playing {
            let expected = (*before.current_player_index() + 1) % after.roster().len().max(1);
            if *after.turn().current_player_index() != expected {
                return Err(GameError::InvariantViolation(
                    "Postcondition failed: turn did not advance by one".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    #[test]
    fn test_precondition_requires_playing() {
        let game = Game::with_players(Board::standard(), ["a", "b"]);
        assert_eq!(
            RollContract::pre(&game, &3),
            Err(GameError::NoActivePlayer)
        );
    }

    #[test]
    fn test_precondition_rejects_pending_roll() {
        let mut game = Game::with_players(Board::standard(), ["a", "b"]);
        game.start().unwrap();
        assert!(RollContract::pre(&game, &3).is_ok());

        game.begin_roll(3).unwrap();
        assert_eq!(
            RollContract::pre(&game, &3),
            Err(GameError::DuplicateRollInFlight)
        );
    }

    #[test]
    fn test_postcondition_holds_after_roll() {
        let mut game = Game::with_players(Board::standard(), ["a", "b"]);
        game.start().unwrap();
        let before = RollContract::capture(&game);
        game.roll(4).unwrap();
        assert!(RollContract::post(&before, &game).is_ok());
    }

    #[test]
    fn test_precondition_rejects_bad_faces_after_phase_checks() {
        let mut game = Game::with_players(Board::standard(), ["a", "b"]);
        assert_eq!(RollContract::pre(&game, &9), Err(GameError::NoActivePlayer));
        game.start().unwrap();
        assert_eq!(
            RollContract::pre(&game, &9),
            Err(GameError::InvalidDieValue(9))
        );
    }

    #[test]
    fn test_postcondition_detects_skipped_turn() {
        let mut game = Game::with_players(Board::standard(), ["a", "b", "c"]);
        game.start().unwrap();
        let before = RollContract::capture(&game);
        game.roll(4).unwrap();
        game.turn.set_index(2);
        assert!(matches!(
            RollContract::post(&before, &game),
            Err(GameError::InvariantViolation(_))
        ));
    }
}
