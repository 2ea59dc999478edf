//! Strictly Ladders - type-safe snakes and ladders rules engine
//!
//! The engine owns the rules and nothing else: no rendering, no timers, no
//! random numbers of its own. Callers feed it die values and read back
//! outcomes, events and snapshots.
//!
//! # Architecture
//!
//! - **Board**: immutable 100-square track with its ladder/snake table
//! - **Square resolver**: classifies squares and reports destinations
//! - **Roster**: players in fixed turn order with their positions
//! - **Rules**: resolves a single roll (win, overshoot, one transfer)
//! - **Game**: phase and turn state machine with a roll-in-flight guard
//! - **Contracts**: pre/postconditions and invariants around every roll
//!
//! # Example
//!
//! ```
//! use strictly_ladders::{Board, Game, GamePhase, Transfer};
//!
//! let mut game = Game::with_players(Board::standard(), ["Ada", "Grace"]);
//! game.start()?;
//!
//! let outcome = game.roll(1)?;
//! assert_eq!(outcome.transfer, Some(Transfer::Shortcut(38)));
//! assert_eq!(game.phase(), GamePhase::Playing);
//! # Ok::<(), strictly_ladders::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod config;
mod dice;
mod error;
mod events;
mod game;
mod phase;
mod roster;
mod rules;
mod shared;
mod square;

pub mod contracts;
pub mod invariants;

pub use board::{
    BOARD_SIZE, Board, BoardError, Link, LinkKind, STANDARD_SETBACKS, STANDARD_SHORTCUTS,
    WINNING_SQUARE, WinRule,
};
pub use config::{BoardConfig, ConfigError, GameConfig};
pub use dice::{DIE_FACES, DieSource, DieValue, ScriptedDice, SeededDie};
pub use error::GameError;
pub use events::GameEvent;
pub use game::{DEFAULT_PLAYER_COUNT, Game, GameSnapshot};
pub use phase::{GamePhase, ResetPolicy, TurnResult, TurnState};
pub use roster::{MIN_PLAYERS, Player, PlayerId, Roster, default_label};
pub use rules::{MoveOutcome, Transfer, apply_roll, resolve_move};
pub use shared::SharedGame;
pub use square::{SquareInfo, SquareKind};
