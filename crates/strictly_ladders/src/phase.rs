//! Game phases and turn bookkeeping.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a game.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum GamePhase {
    /// Roster can be edited; no rolls.
    #[default]
    Setup,
    /// Players take turns rolling.
    Playing,
    /// A player reached the winning square.
    Finished,
}

/// Whose turn it is and whether a roll is being resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TurnState {
    /// Slot in the roster's turn order.
    current_player_index: usize,
    /// Set between issuing a roll and completing it.
    roll_in_flight: bool,
}

impl TurnState {
    pub(crate) fn begin(&mut self) {
        self.roll_in_flight = true;
    }

    pub(crate) fn complete(&mut self) {
        self.roll_in_flight = false;
    }

    /// Moves to the next slot, wrapping at `player_count`.
    pub(crate) fn advance(&mut self, player_count: usize) {
        if player_count > 0 {
            self.current_player_index = (self.current_player_index + 1) % player_count;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_index(&mut self, index: usize) {
        self.current_player_index = index;
    }
}

/// How the roster is treated when a finished game is reset.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Replace the roster with two default players.
    #[default]
    RestoreDefaults,
    /// Keep the current players and names; only positions are cleared.
    KeepRoster,
}

/// What completing a roll did to the turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnResult {
    /// The game goes on with the given player to roll.
    Continue {
        /// Next player to roll.
        next_player: crate::roster::PlayerId,
    },
    /// The roll won the game.
    Won {
        /// The latched winner.
        winner: crate::roster::PlayerId,
    },
}
