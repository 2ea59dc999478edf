//! Die values and die-value producers.
//!
//! The engine never draws random numbers on its own. Callers hand it a
//! [`DieSource`] (or a plain value), so every game can be replayed from
//! its roll sequence.

use crate::error::GameError;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{instrument, trace};

/// Number of faces on the die.
pub const DIE_FACES: u8 = 6;

/// A validated face of a six-sided die.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieValue(u8);

impl DieValue {
    /// Validates a raw die value.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidDieValue`] outside `[1, 6]`.
    pub fn new(value: u8) -> Result<Self, GameError> {
        if (1..=DIE_FACES).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GameError::InvalidDieValue(value))
        }
    }

    /// The face value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DieValue {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DieValue> for u8 {
    fn from(value: DieValue) -> Self {
        value.0
    }
}

/// Produces raw die values.
///
/// Implementations should return values in `[1, 6]`; anything else is
/// rejected by the game with [`GameError::InvalidDieValue`].
pub trait DieSource {
    /// Draws one value.
    fn roll_die(&mut self) -> u8;
}

impl<F: FnMut() -> u8> DieSource for F {
    fn roll_die(&mut self) -> u8 {
        self()
    }
}

/// Fair die backed by a seeded PCG generator.
#[derive(Debug, Clone)]
pub struct SeededDie {
    seed: u64,
    rng: Pcg32,
}

impl SeededDie {
    /// Creates a die whose sequence is fixed by `seed`.
    #[instrument]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Creates a die seeded from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// The seed this die was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DieSource for SeededDie {
    fn roll_die(&mut self) -> u8 {
        let value = self.rng.random_range(1..=DIE_FACES);
        trace!(value, "Die rolled");
        value
    }
}

/// Replays a fixed sequence of values, cycling when it runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedDice {
    values: VecDeque<u8>,
}

impl ScriptedDice {
    /// Returns `None` for an empty script.
    pub fn new(values: impl IntoIterator<Item = u8>) -> Option<Self> {
        let values: VecDeque<u8> = values.into_iter().collect();
        if values.is_empty() {
            None
        } else {
            Some(Self { values })
        }
    }
}

impl DieSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        let value = self.values.pop_front().unwrap_or(1);
        self.values.push_back(value);
        value
    }
}
