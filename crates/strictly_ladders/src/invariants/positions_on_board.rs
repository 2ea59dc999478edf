//! Every token is off the board (0) or on a square in `[1, 100]`.

use super::Invariant;
use crate::Game;
use crate::board::BOARD_SIZE;

/// Invariant: no position exceeds the board size.
pub struct PositionsOnBoardInvariant;

impl Invariant<Game> for PositionsOnBoardInvariant {
    fn holds(game: &Game) -> bool {
        game.players().all(|p| *p.position() <= BOARD_SIZE)
    }

    fn description() -> &'static str {
        "Every position lies in 0..=100"
    }
}
