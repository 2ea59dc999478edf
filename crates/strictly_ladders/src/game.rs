//! Turn state machine.
//!
//! A [`Game`] owns the roster, the phase and the turn state. Phases move
//! `Setup -> Playing -> Finished -> Setup`. A roll is two explicit steps:
//! [`Game::begin_roll`] applies the move (transfer included) and raises the
//! in-flight guard, [`Game::complete_roll`] advances the turn or latches the
//! winner and lowers the guard. [`Game::roll`] runs both.

use crate::board::Board;
use crate::contracts::{Contract, LegalRoll, RollContract};
use crate::dice::{DieSource, DieValue};
use crate::error::GameError;
use crate::events::GameEvent;
use crate::phase::{GamePhase, ResetPolicy, TurnResult, TurnState};
use crate::roster::{MIN_PLAYERS, Player, PlayerId, Roster};
use crate::rules::{self, MoveOutcome};
use derive_getters::Getters;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Number of players a reset with [`ResetPolicy::RestoreDefaults`] creates.
pub const DEFAULT_PLAYER_COUNT: usize = 2;

/// A roll that has been applied but not yet completed.
#[derive(Debug, Clone)]
struct PendingRoll {
    outcome: MoveOutcome,
    #[cfg(debug_assertions)]
    before: TurnState,
}

/// A snakes-and-ladders game.
#[derive(Debug, Clone)]
pub struct Game {
    board: Arc<Board>,
    pub(crate) roster: Roster,
    phase: GamePhase,
    pub(crate) turn: TurnState,
    winner: Option<PlayerId>,
    reset_policy: ResetPolicy,
    pending: Option<PendingRoll>,
    events: Vec<GameEvent>,
}

/// Read-only view of a game for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct GameSnapshot {
    /// Current phase.
    phase: GamePhase,
    /// Player to roll, while playing.
    current_player: Option<PlayerId>,
    /// Whether a roll is awaiting completion.
    roll_in_flight: bool,
    /// Latched winner, once finished.
    winner: Option<PlayerId>,
    /// Players in turn order with their positions.
    players: Vec<Player>,
}

impl Game {
    /// Creates a game in setup with the two default players.
    #[instrument(skip(board))]
    pub fn new(board: impl Into<Arc<Board>>) -> Self {
        Self::with_roster(board, Roster::with_default_names(DEFAULT_PLAYER_COUNT))
    }

    /// Creates a game in setup with the given display names in turn order.
    #[instrument(skip(board, names))]
    pub fn with_players<S: AsRef<str>>(
        board: impl Into<Arc<Board>>,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::with_roster(board, Roster::from_names(names))
    }

    /// Creates a game in setup around an existing roster.
    pub fn with_roster(board: impl Into<Arc<Board>>, roster: Roster) -> Self {
        Self {
            board: board.into(),
            roster,
            phase: GamePhase::Setup,
            turn: TurnState::default(),
            winner: None,
            reset_policy: ResetPolicy::default(),
            pending: None,
            events: Vec::new(),
        }
    }

    /// Sets how [`Game::reset`] treats the roster.
    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    // ─────────────────────────────────────────────────────────────
    //  Roster
    // ─────────────────────────────────────────────────────────────

    /// Adds a player. Only allowed during setup.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RosterLocked`] once the game has started.
    #[instrument(skip(self))]
    pub fn register(&mut self, name: &str) -> Result<PlayerId, GameError> {
        if self.phase != GamePhase::Setup {
            warn!(phase = %self.phase, "Registration rejected");
            return Err(GameError::RosterLocked);
        }
        let id = self.roster.register(name);
        let name = self.roster.get(id)?.name().clone();
        self.events.push(GameEvent::PlayerRegistered { player: id, name });
        Ok(id)
    }

    /// Changes a player's display name. Allowed in any phase.
    #[instrument(skip(self))]
    pub fn rename(&mut self, id: PlayerId, name: &str) -> Result<(), GameError> {
        self.roster.rename(id, name)?;
        let name = self.roster.get(id)?.name().clone();
        self.events.push(GameEvent::PlayerRenamed { player: id, name });
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Phase transitions
    // ─────────────────────────────────────────────────────────────

    /// Starts play: every token goes back to 0 and the first player rolls.
    ///
    /// # Errors
    ///
    /// - [`GameError::AlreadyStarted`] outside setup
    /// - [`GameError::NotEnoughPlayers`] with fewer than two players
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Setup {
            return Err(GameError::AlreadyStarted);
        }
        if self.roster.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                required: MIN_PLAYERS,
                registered: self.roster.len(),
            });
        }
        self.roster.reset_positions();
        self.turn = TurnState::default();
        self.pending = None;
        self.winner = None;
        info!(players = self.roster.len(), "Game started");
        self.transition(GamePhase::Playing);
        Ok(())
    }

    /// Returns to setup, clearing the winner and all positions.
    ///
    /// The roster is rebuilt or kept according to the reset policy. A roll
    /// left in flight is discarded.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.winner = None;
        self.turn = TurnState::default();
        if self.pending.take().is_some() {
            debug!("Discarding roll in flight");
        }
        match self.reset_policy {
            ResetPolicy::RestoreDefaults => {
                self.roster = Roster::with_default_names(DEFAULT_PLAYER_COUNT);
            }
            ResetPolicy::KeepRoster => self.roster.reset_positions(),
        }
        info!(policy = %self.reset_policy, "Game reset");
        self.transition(GamePhase::Setup);
    }

    fn transition(&mut self, to: GamePhase) {
        let from = self.phase;
        self.phase = to;
        if from != to {
            debug!(%from, %to, "Phase changed");
            self.events.push(GameEvent::PhaseChanged { from, to });
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Rolling
    // ─────────────────────────────────────────────────────────────

    /// Issues a roll for the current player and applies its move.
    ///
    /// The in-flight guard stays raised until [`Game::complete_roll`].
    ///
    /// # Errors
    ///
    /// - [`GameError::NoActivePlayer`] outside the playing phase
    /// - [`GameError::DuplicateRollInFlight`] while a roll is pending
    /// - [`GameError::InvalidDieValue`] outside `[1, 6]`
    #[instrument(skip(self))]
    pub fn begin_roll(&mut self, die: u8) -> Result<MoveOutcome, GameError> {
        RollContract::pre(self, &die)?;
        let die = DieValue::new(die)?;

        #[cfg(debug_assertions)]
        let before = RollContract::capture(self);

        self.turn.begin();
        let index = *self.turn.current_player_index();
        let outcome = match rules::apply_roll(&self.board, &mut self.roster, index, die) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.turn.complete();
                return Err(e);
            }
        };

        self.pending = Some(PendingRoll {
            outcome,
            #[cfg(debug_assertions)]
            before,
        });
        self.events.push(GameEvent::Rolled(outcome));
        Ok(outcome)
    }

    /// Completes the roll in flight: latches the winner or passes the turn.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoRollInFlight`] if no roll was issued.
    #[instrument(skip(self))]
    pub fn complete_roll(&mut self) -> Result<TurnResult, GameError> {
        let pending = self.pending.take().ok_or(GameError::NoRollInFlight)?;
        self.turn.complete();

        let result = if pending.outcome.won {
            let winner = pending.outcome.player;
            self.winner = Some(winner);
            info!(%winner, "Game won");
            self.transition(GamePhase::Finished);
            TurnResult::Won { winner }
        } else {
            self.turn.advance(self.roster.len());
            let next_player = self.current_player_id().ok_or(GameError::NoActivePlayer)?;
            debug!(%next_player, "Turn advanced");
            self.events.push(GameEvent::TurnAdvanced { next_player });
            TurnResult::Continue { next_player }
        };

        #[cfg(debug_assertions)]
        RollContract::post(&pending.before, self)?;

        Ok(result)
    }

    /// Issues and completes a roll in one call.
    #[instrument(skip(self))]
    pub fn roll(&mut self, die: u8) -> Result<MoveOutcome, GameError> {
        let outcome = self.begin_roll(die)?;
        self.complete_roll()?;
        Ok(outcome)
    }

    /// Draws one value from `source` and rolls it.
    ///
    /// Nothing is drawn if the game cannot accept a roll.
    pub fn roll_with(&mut self, source: &mut impl DieSource) -> Result<MoveOutcome, GameError> {
        LegalRoll::check(self)?;
        let die = source.roll_die();
        self.roll(die)
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Turn index and in-flight guard.
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// The board being played.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Shared handle to the board.
    pub fn board_handle(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    /// The roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Players in turn order.
    pub fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.roster.players()
    }

    /// Position of a player.
    pub fn position_of(&self, id: PlayerId) -> Result<u8, GameError> {
        self.roster.position_of(id)
    }

    /// Player whose turn it is, while playing.
    pub fn current_player(&self) -> Option<&Player> {
        if self.phase == GamePhase::Playing {
            self.roster.by_index(*self.turn.current_player_index())
        } else {
            None
        }
    }

    fn current_player_id(&self) -> Option<PlayerId> {
        self.current_player().map(|p| *p.id())
    }

    /// The latched winner, once finished.
    pub fn winner(&self) -> Option<&Player> {
        self.winner.and_then(|id| self.roster.get(id).ok())
    }

    /// Outcome of the roll in flight, if any.
    pub fn pending_outcome(&self) -> Option<&MoveOutcome> {
        self.pending.as_ref().map(|p| &p.outcome)
    }

    /// How the roster is treated on reset.
    pub fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }

    /// Changes how the roster is treated on reset.
    pub fn set_reset_policy(&mut self, policy: ResetPolicy) {
        self.reset_policy = policy;
    }

    /// Copies the display-relevant state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            current_player: self.current_player_id(),
            roll_in_flight: *self.turn.roll_in_flight(),
            winner: self.winner,
            players: self.roster.players().cloned().collect(),
        }
    }

    /// Events recorded since the last drain, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Takes the recorded events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Board::standard())
    }
}
