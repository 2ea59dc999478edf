//! Thread-safe handle for hosts that drive a game from several threads.

use crate::dice::DieSource;
use crate::error::GameError;
use crate::game::{Game, GameSnapshot};
use crate::rules::MoveOutcome;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{instrument, warn};

/// Shared game whose rolls are applied atomically.
///
/// Each roll holds the lock from issue to completion, so no other thread
/// can observe or start a roll in between.
#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<Game>>,
}

impl SharedGame {
    /// Wraps a game.
    pub fn new(game: Game) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// Locks the game, recovering it if a caller panicked while holding it.
    ///
    /// A roll left in flight by the panic has already moved its token, so
    /// it is completed before the game is handed out again.
    fn lock(&self) -> MutexGuard<'_, Game> {
        match self.inner.lock() {
            Ok(game) => game,
            Err(poisoned) => {
                let mut game = poisoned.into_inner();
                warn!("Recovering game after a panic");
                if game.pending_outcome().is_some() {
                    if let Err(e) = game.complete_roll() {
                        warn!(error = %e, "Completing abandoned roll failed");
                    }
                }
                self.inner.clear_poison();
                game
            }
        }
    }

    /// Issues and completes a roll under the lock.
    #[instrument(skip(self))]
    pub fn roll(&self, die: u8) -> Result<MoveOutcome, GameError> {
        self.lock().roll(die)
    }

    /// Draws from `source` and rolls under the lock.
    pub fn roll_with(&self, source: &mut impl DieSource) -> Result<MoveOutcome, GameError> {
        self.lock().roll_with(source)
    }

    /// Starts the game.
    pub fn start(&self) -> Result<(), GameError> {
        self.lock().start()
    }

    /// Resets the game.
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Copies the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().snapshot()
    }

    /// Runs `f` with exclusive access to the game.
    pub fn with<R>(&self, f: impl FnOnce(&mut Game) -> R) -> R {
        f(&mut self.lock())
    }
}

impl From<Game> for SharedGame {
    fn from(game: Game) -> Self {
        Self::new(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, GamePhase};
    use std::panic::{self, AssertUnwindSafe};
    use std::thread;

    #[test]
    fn test_concurrent_rolls_each_advance_the_turn_once() {
        let shared = SharedGame::new(Game::with_players(Board::empty(), ["a", "b", "c", "d"]));
        shared.start().unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.roll(1))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }

        let snapshot = shared.snapshot();
        assert_eq!(*snapshot.phase(), GamePhase::Playing);
        assert!(snapshot.players().iter().all(|p| *p.position() == 1));
        assert!(!*snapshot.roll_in_flight());
    }

    #[test]
    fn test_panic_mid_roll_does_not_wedge_the_game() {
        let shared = SharedGame::new(Game::with_players(Board::empty(), ["a", "b"]));
        shared.start().unwrap();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            shared.with(|game| {
                if game.begin_roll(2).is_ok() {
                    panic!("host failed between begin and complete");
                }
            })
        }));
        assert!(result.is_err());

        let outcome = shared.roll(3).unwrap();
        assert_eq!(outcome.final_position, 3);

        let snapshot = shared.snapshot();
        let positions: Vec<u8> = snapshot.players().iter().map(|p| *p.position()).collect();
        assert_eq!(positions, [2, 3]);
        assert!(!*snapshot.roll_in_flight());
        assert!(!shared.inner.is_poisoned());
    }

    #[test]
    fn test_with_gives_exclusive_access() {
        let shared = SharedGame::from(Game::default());
        let count = shared.with(|game| game.roster().len());
        assert_eq!(count, 2);
    }
}
