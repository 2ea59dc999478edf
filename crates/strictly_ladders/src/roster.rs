//! Player registry.

use crate::error::GameError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Minimum number of players needed to start a game.
pub const MIN_PLAYERS: usize = 2;

/// Stable identity of a player within a game.
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
#[display("#{}", _0)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Raw numeric id.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// A player and their token's position.
///
/// Position 0 means the token has not entered the board yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Player {
    /// Stable identity.
    id: PlayerId,
    /// Display name, never blank.
    name: String,
    /// Current square (0 before entering the board).
    position: u8,
}

/// Positional label used when a name is blank.
pub fn default_label(slot: usize) -> String {
    format!("Player {}", slot + 1)
}

fn normalize_name(name: &str, slot: usize) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        default_label(slot)
    } else {
        trimmed.to_string()
    }
}

/// Ordered roster of players.
///
/// Registration order is the turn order and never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    players: Vec<Player>,
    next_id: u32,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a roster of `count` players with positional labels.
    pub fn with_default_names(count: usize) -> Self {
        let mut roster = Self::new();
        for _ in 0..count {
            roster.register("");
        }
        roster
    }

    /// Creates a roster from display names in turn order.
    pub fn from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        let mut roster = Self::new();
        for name in names {
            roster.register(name.as_ref());
        }
        roster
    }

    /// Appends a player and returns their id. Blank names become `Player N`.
    #[instrument(skip(self))]
    pub fn register(&mut self, name: &str) -> PlayerId {
        self.next_id += 1;
        let id = PlayerId(self.next_id);
        let name = normalize_name(name, self.players.len());
        debug!(%id, %name, "Player registered");
        self.players.push(Player {
            id,
            name,
            position: 0,
        });
        id
    }

    /// Changes a player's display name. Blank names become `Player N`.
    #[instrument(skip(self))]
    pub fn rename(&mut self, id: PlayerId, name: &str) -> Result<(), GameError> {
        let slot = self.index_of(id)?;
        let name = normalize_name(name, slot);
        debug!(%id, %name, "Player renamed");
        self.players[slot].name = name;
        Ok(())
    }

    /// Looks up a player.
    pub fn get(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(GameError::UnknownPlayer(id))
    }

    /// Returns the position of a player.
    pub fn position_of(&self, id: PlayerId) -> Result<u8, GameError> {
        self.get(id).map(|p| p.position)
    }

    /// Players in registration order.
    pub fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.players.iter()
    }

    /// Number of registered players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns true if nobody is registered.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player at a turn-order slot.
    pub fn by_index(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub(crate) fn index_of(&self, id: PlayerId) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| p.id == id)
            .ok_or(GameError::UnknownPlayer(id))
    }

    pub(crate) fn set_position(&mut self, index: usize, position: u8) {
        if let Some(player) = self.players.get_mut(index) {
            player.position = position;
        }
    }

    pub(crate) fn reset_positions(&mut self) {
        for player in &mut self.players {
            player.position = 0;
        }
    }
}
