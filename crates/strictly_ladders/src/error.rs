//! Error types for the ladders engine.
//!
//! Every variant is a recoverable condition returned to the caller. A call
//! that fails leaves the game untouched.

use crate::roster::PlayerId;

/// Error returned by board lookups, roster edits and turn transitions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The square lies outside `[1, 100]`.
    #[display("Square {} is not on the board (1-100)", _0)]
    InvalidSquare(u8),

    /// The die value lies outside `[1, 6]`.
    #[display("Die value {} is not a face of a six-sided die", _0)]
    InvalidDieValue(u8),

    /// A roll was attempted while the game is not being played.
    #[display("No active player: the game is not in progress")]
    NoActivePlayer,

    /// A player was added after the game started.
    #[display("Roster is locked once the game has started")]
    RosterLocked,

    /// A roll was attempted before the previous one was completed.
    #[display("A roll is already in flight")]
    DuplicateRollInFlight,

    /// A roll completion was requested with no roll in flight.
    #[display("No roll is in flight")]
    NoRollInFlight,

    /// The game was started with too few players.
    #[display("At least {} players are required, {} registered", required, registered)]
    NotEnoughPlayers {
        /// Minimum roster size.
        required: usize,
        /// Current roster size.
        registered: usize,
    },

    /// The game was started while already playing or finished.
    #[display("Game has already been started")]
    AlreadyStarted,

    /// The player id is not part of the roster.
    #[display("Unknown player {}", _0)]
    UnknownPlayer(PlayerId),

    /// A post-condition failed after applying a roll.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GameError {}
