//! Finished games have exactly one winner, standing on the winning square.

use super::Invariant;
use crate::board::WINNING_SQUARE;
use crate::{Game, GamePhase};

/// Invariant: the phase is `Finished` exactly when a winner is latched, and
/// the winner stands on the winning square.
///
/// Under [`WinRule::ExactRoll`](crate::WinRule::ExactRoll) a ladder can leave
/// a player on the winning square without a win, so other players may share
/// it.
pub struct WinnerLatchedInvariant;

impl Invariant<Game> for WinnerLatchedInvariant {
    fn holds(game: &Game) -> bool {
        let on_winning_square = game
            .players()
            .filter(|p| *p.position() == WINNING_SQUARE)
            .count();

        let stranding = game.board().strands_on_goal();

        match (game.phase(), game.winner()) {
            (GamePhase::Finished, Some(winner)) => {
                *winner.position() == WINNING_SQUARE && (on_winning_square == 1 || stranding)
            }
            (GamePhase::Finished, None) => false,
            (_, Some(_)) => false,
            // A winning roll may be applied but not yet completed.
            (GamePhase::Playing, None) => {
                on_winning_square == 0 || stranding || *game.turn().roll_in_flight()
            }
            (GamePhase::Setup, None) => on_winning_square == 0,
        }
    }

    fn description() -> &'static str {
        "Finished iff a latched winner stands on square 100"
    }
}
