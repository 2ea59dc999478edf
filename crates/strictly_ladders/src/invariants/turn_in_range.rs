//! The current turn points at a real player.

use super::Invariant;
use crate::{Game, GamePhase};

/// Invariant: outside setup, the turn index is a valid roster slot.
pub struct TurnInRangeInvariant;

impl Invariant<Game> for TurnInRangeInvariant {
    fn holds(game: &Game) -> bool {
        match game.phase() {
            GamePhase::Setup => *game.turn().current_player_index() == 0,
            GamePhase::Playing | GamePhase::Finished => {
                *game.turn().current_player_index() < game.roster().len()
            }
        }
    }

    fn description() -> &'static str {
        "Turn index points into the roster"
    }
}
