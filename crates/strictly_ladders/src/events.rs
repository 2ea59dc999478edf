//! Notifications queued for observers.
//!
//! The game records events as it transitions; presentation layers drain
//! them with [`Game::drain_events`](crate::Game::drain_events) and decide
//! how (and how slowly) to show them.

use crate::phase::GamePhase;
use crate::roster::PlayerId;
use crate::rules::MoveOutcome;
use serde::{Deserialize, Serialize};

/// Something observable that happened in a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The game moved between phases.
    PhaseChanged {
        /// Phase before the transition.
        from: GamePhase,
        /// Phase after the transition.
        to: GamePhase,
    },
    /// A player joined the roster.
    PlayerRegistered {
        /// New player.
        player: PlayerId,
        /// Normalized display name.
        name: String,
    },
    /// A player changed their display name.
    PlayerRenamed {
        /// Renamed player.
        player: PlayerId,
        /// Normalized display name.
        name: String,
    },
    /// A roll was applied to the roster (transfer included).
    Rolled(MoveOutcome),
    /// The turn passed to another player.
    TurnAdvanced {
        /// Next player to roll.
        next_player: PlayerId,
    },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::PhaseChanged { from, to } => write!(f, "{} -> {}", from, to),
            GameEvent::PlayerRegistered { player, name } => {
                write!(f, "{} joined as {}", name, player)
            }
            GameEvent::PlayerRenamed { player, name } => {
                write!(f, "{} is now {}", player, name)
            }
            GameEvent::Rolled(outcome) => write!(f, "{}", outcome),
            GameEvent::TurnAdvanced { next_player } => {
                write!(f, "Player {} to roll", next_player)
            }
        }
    }
}
