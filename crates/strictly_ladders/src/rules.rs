//! Move resolution.
//!
//! Given a starting square and a die value, computes where the token ends
//! up. The order of checks matters:
//!
//! 1. An exact landing on the winning square wins outright, before any
//!    overshoot check or link lookup.
//! 2. Anything past the winning square is an overshoot and the token stays.
//! 3. Otherwise the token moves and at most one link is applied. The link
//!    destination is never looked up again in the same roll. A ladder onto
//!    the winning square only wins under [`WinRule::ReachGoal`].

use crate::board::{Board, LinkKind, WINNING_SQUARE, WinRule};
use crate::dice::DieValue;
use crate::error::GameError;
use crate::roster::{PlayerId, Roster};
use crate::square::SquareKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A link applied during a roll, with its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transfer {
    /// Climbed a ladder.
    Shortcut(u8),
    /// Slid down a snake.
    Setback(u8),
}

impl Transfer {
    /// Square the player was moved to.
    pub fn destination(self) -> u8 {
        match self {
            Transfer::Shortcut(square) | Transfer::Setback(square) => square,
        }
    }

    /// Which kind of link was taken.
    pub fn kind(self) -> LinkKind {
        match self {
            Transfer::Shortcut(_) => LinkKind::Shortcut,
            Transfer::Setback(_) => LinkKind::Setback,
        }
    }
}

impl std::fmt::Display for Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transfer::Shortcut(to) => write!(f, "climbed a ladder to {}", to),
            Transfer::Setback(to) => write!(f, "slid down a snake to {}", to),
        }
    }
}

/// Result of resolving one roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Player who rolled.
    pub player: PlayerId,
    /// Value rolled.
    pub die: DieValue,
    /// Square before the roll.
    pub start: u8,
    /// Square after the roll, including any transfer.
    pub final_position: u8,
    /// Link applied, if any.
    pub transfer: Option<Transfer>,
    /// The roll would have passed the winning square and was forfeited.
    pub overshot: bool,
    /// The player reached the winning square.
    pub won: bool,
}

impl MoveOutcome {
    /// Square reached by the die alone, before any transfer.
    ///
    /// Equal to `start` on an overshoot.
    pub fn landed_on(&self) -> u8 {
        if self.overshot {
            self.start
        } else {
            self.start.saturating_add(self.die.get())
        }
    }
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {} rolled {}", self.player, self.die)?;
        if self.overshot {
            return write!(f, ", overshot and stays on {}", self.start);
        }
        write!(f, ", landed on {}", self.landed_on())?;
        if let Some(transfer) = self.transfer {
            write!(f, ", {}", transfer)?;
        }
        if self.won {
            write!(f, " and wins")?;
        }
        Ok(())
    }
}

/// Computes the outcome of rolling `die` from `start` without touching state.
///
/// # Errors
///
/// Returns [`GameError::InvalidSquare`] if `start` is past the winning square.
#[instrument(skip(board))]
pub fn resolve_move(
    board: &Board,
    player: PlayerId,
    start: u8,
    die: DieValue,
) -> Result<MoveOutcome, GameError> {
    if start > WINNING_SQUARE {
        return Err(GameError::InvalidSquare(start));
    }

    let outcome = MoveOutcome {
        player,
        die,
        start,
        final_position: start,
        transfer: None,
        overshot: false,
        won: false,
    };

    let tentative = start + die.get();

    if tentative == WINNING_SQUARE {
        return Ok(MoveOutcome {
            final_position: tentative,
            won: true,
            ..outcome
        });
    }

    if tentative > WINNING_SQUARE {
        debug!(tentative, "Overshoot, position unchanged");
        return Ok(MoveOutcome {
            overshot: true,
            ..outcome
        });
    }

    // Single lookup on the landing square; the destination is not re-resolved.
    let info = board.classify(tentative)?;
    let transfer = match info.kind {
        SquareKind::Normal => None,
        SquareKind::Shortcut => Some(Transfer::Shortcut(info.destination)),
        SquareKind::Setback => Some(Transfer::Setback(info.destination)),
    };

    Ok(MoveOutcome {
        final_position: info.destination,
        transfer,
        won: info.destination == WINNING_SQUARE && board.win_rule() == WinRule::ReachGoal,
        ..outcome
    })
}

/// Resolves a roll for the player in turn-order slot `index` and writes the
/// final position into the roster.
///
/// # Errors
///
/// Returns [`GameError::NoActivePlayer`] if the slot is empty.
#[instrument(skip(board, roster))]
pub fn apply_roll(
    board: &Board,
    roster: &mut Roster,
    index: usize,
    die: DieValue,
) -> Result<MoveOutcome, GameError> {
    let player = roster.by_index(index).ok_or(GameError::NoActivePlayer)?;
    let outcome = resolve_move(board, *player.id(), *player.position(), die)?;
    roster.set_position(index, outcome.final_position);
    info!(
        player = %outcome.player,
        die = %outcome.die,
        from = outcome.start,
        to = outcome.final_position,
        overshot = outcome.overshot,
        won = outcome.won,
        "Roll applied"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(board: &Board, start: u8, die: u8) -> MoveOutcome {
        let mut roster = Roster::from_names(["a"]);
        roster.set_position(0, start);
        apply_roll(board, &mut roster, 0, DieValue::new(die).unwrap()).unwrap()
    }

    #[test]
    fn test_plain_move() {
        let outcome = roll(&Board::standard(), 2, 3);
        assert_eq!(outcome.final_position, 5);
        assert_eq!(outcome.transfer, None);
        assert!(!outcome.overshot && !outcome.won);
    }

    #[test]
    fn test_shortcut_from_start() {
        let outcome = roll(&Board::standard(), 0, 1);
        assert_eq!(outcome.final_position, 38);
        assert_eq!(outcome.transfer, Some(Transfer::Shortcut(38)));
    }

    #[test]
    fn test_setback() {
        let outcome = roll(&Board::standard(), 95, 3);
        assert_eq!(outcome.final_position, 78);
        assert_eq!(outcome.transfer, Some(Transfer::Setback(78)));
        assert_eq!(outcome.landed_on(), 98);
    }

    #[test]
    fn test_overshoot_keeps_position() {
        let outcome = roll(&Board::standard(), 97, 4);
        assert!(outcome.overshot);
        assert_eq!(outcome.final_position, 97);
        assert_eq!(outcome.landed_on(), 97);
    }

    #[test]
    fn test_exact_landing_wins_past_snakes() {
        let outcome = roll(&Board::standard(), 94, 6);
        assert!(outcome.won);
        assert_eq!(outcome.final_position, 100);
        assert_eq!(outcome.transfer, None);
    }

    #[test]
    fn test_ladder_to_winning_square_strands_without_win() {
        let outcome = roll(&Board::standard(), 77, 3);
        assert_eq!(outcome.transfer, Some(Transfer::Shortcut(100)));
        assert_eq!(outcome.final_position, 100);
        assert!(!outcome.won);
    }

    #[test]
    fn test_ladder_to_winning_square_wins_when_reaching_goal_counts() {
        let board = Board::standard().with_win_rule(WinRule::ReachGoal);
        let outcome = roll(&board, 77, 3);
        assert_eq!(outcome.transfer, Some(Transfer::Shortcut(100)));
        assert!(outcome.won);
    }

    #[test]
    fn test_stranded_player_overshoots_every_roll() {
        for die in 1..=6 {
            let outcome = roll(&Board::standard(), 100, die);
            assert!(outcome.overshot);
            assert!(!outcome.won);
            assert_eq!(outcome.final_position, 100);
        }
    }

    #[test]
    fn test_landed_on_saturates_for_deserialized_outcomes() {
        let outcome: MoveOutcome = serde_json::from_str(
            r#"{"player":1,"die":6,"start":253,"final_position":253,"transfer":null,"overshot":false,"won":false}"#,
        )
        .unwrap();
        assert_eq!(outcome.landed_on(), u8::MAX);
    }

    #[test]
    fn test_transfer_is_not_chained() {
        // 3 -> 10 -> 50: only the first link may fire.
        let board = Board::new([(3, 10), (10, 50)]).unwrap();
        let outcome = roll(&board, 1, 2);
        assert_eq!(outcome.final_position, 10);
        assert_eq!(outcome.transfer, Some(Transfer::Shortcut(10)));
    }

    #[test]
    fn test_resolve_move_rejects_positions_past_the_end() {
        let id = Roster::new().register("a");
        let die = DieValue::new(1).unwrap();
        let result = resolve_move(&Board::standard(), id, 101, die);
        assert_eq!(result, Err(GameError::InvalidSquare(101)));
    }

    #[test]
    fn test_outcome_display() {
        let outcome = roll(&Board::standard(), 95, 3);
        assert_eq!(
            outcome.to_string(),
            "Player #1 rolled 3, landed on 98, slid down a snake to 78"
        );
    }
}
