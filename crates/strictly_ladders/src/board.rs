//! Board topology: the 100-square track and its link table.
//!
//! Squares are numbered 1 through 100 in boustrophedon order: squares 1-10
//! run left to right along the bottom row, 11-20 run right to left above
//! them, and so on. The engine only reasons about the 1-D square number;
//! callers that place tokens on a grid derive rows and columns themselves.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Number of squares on the board.
pub const BOARD_SIZE: u8 = 100;

/// The square a player must land on exactly to win.
pub const WINNING_SQUARE: u8 = BOARD_SIZE;

/// Ladders in the reference configuration (origin, destination).
pub const STANDARD_SHORTCUTS: [(u8, u8); 9] = [
    (1, 38),
    (4, 14),
    (9, 21),
    (21, 42),
    (28, 84),
    (36, 44),
    (51, 67),
    (71, 91),
    (80, 100),
];

/// Snakes in the reference configuration (origin, destination).
pub const STANDARD_SETBACKS: [(u8, u8); 10] = [
    (16, 6),
    (47, 26),
    (49, 11),
    (56, 53),
    (62, 19),
    (64, 60),
    (87, 24),
    (93, 73),
    (95, 75),
    (98, 78),
];

/// Direction of a link.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum LinkKind {
    /// Ladder: carries the player up the board.
    Shortcut,
    /// Snake: carries the player back down.
    Setback,
}

/// How a player may finish the game.
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
#[serde(rename_all = "snake_case")]
pub enum WinRule {
    /// Only a die roll landing exactly on the winning square wins. A ladder
    /// that ends on the winning square leaves the player there without a win.
    #[default]
    ExactRoll,
    /// Any arrival on the winning square wins, ladders included.
    ReachGoal,
}

/// An outgoing link from a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Whether the link moves forward or backward.
    pub kind: LinkKind,
    /// Square the player is moved to.
    pub destination: u8,
}

/// Reason a link table was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// A link endpoint is outside `[1, 100]`.
    #[display("Link {}->{} leaves the board", origin, destination)]
    OutOfRange {
        /// Link origin.
        origin: u8,
        /// Link destination.
        destination: u8,
    },

    /// A link points at its own origin.
    #[display("Square {} links to itself", _0)]
    SelfLink(u8),

    /// Two links share an origin.
    #[display("Square {} has more than one outgoing link", _0)]
    DuplicateOrigin(u8),

    /// The winning square is used as a link origin.
    #[display("Square {} cannot be a link origin", WINNING_SQUARE)]
    LinkFromWinningSquare,

    /// A shortcut that goes down or a setback that goes up.
    #[display("{} {}->{} points the wrong way", kind, origin, destination)]
    WrongDirection {
        /// Declared kind.
        kind: LinkKind,
        /// Link origin.
        origin: u8,
        /// Link destination.
        destination: u8,
    },
}

impl std::error::Error for BoardError {}

/// Immutable board configuration.
///
/// Construct once with [`Board::standard`] or [`Board::new`] and share it;
/// the engine never mutates the link table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    links: BTreeMap<u8, u8>,
    win_rule: WinRule,
}

impl Board {
    /// Builds a board from `(origin, destination)` pairs.
    ///
    /// Link kinds are derived from direction: upward links are shortcuts,
    /// downward links are setbacks.
    #[instrument(skip(links))]
    pub fn new(links: impl IntoIterator<Item = (u8, u8)>) -> Result<Self, BoardError> {
        let mut table = BTreeMap::new();
        for (origin, destination) in links {
            Self::check_link(origin, destination)?;
            if table.insert(origin, destination).is_some() {
                warn!(origin, "Duplicate link origin");
                return Err(BoardError::DuplicateOrigin(origin));
            }
        }
        debug!(links = table.len(), "Board constructed");
        Ok(Self {
            links: table,
            win_rule: WinRule::default(),
        })
    }

    /// Builds a board from separately declared shortcuts and setbacks,
    /// rejecting any link whose direction contradicts its declaration.
    #[instrument(skip(shortcuts, setbacks))]
    pub fn from_parts(
        shortcuts: impl IntoIterator<Item = (u8, u8)>,
        setbacks: impl IntoIterator<Item = (u8, u8)>,
    ) -> Result<Self, BoardError> {
        let declared = shortcuts
            .into_iter()
            .map(|link| (LinkKind::Shortcut, link))
            .chain(setbacks.into_iter().map(|link| (LinkKind::Setback, link)));

        let mut links = Vec::new();
        for (kind, (origin, destination)) in declared {
            let upward = destination > origin;
            let matches = match kind {
                LinkKind::Shortcut => upward,
                LinkKind::Setback => !upward,
            };
            if origin != destination && !matches {
                return Err(BoardError::WrongDirection {
                    kind,
                    origin,
                    destination,
                });
            }
            links.push((origin, destination));
        }
        Self::new(links)
    }

    /// The reference board: nine ladders and ten snakes.
    pub fn standard() -> Self {
        Self {
            links: STANDARD_SHORTCUTS
                .iter()
                .chain(STANDARD_SETBACKS.iter())
                .copied()
                .collect(),
            win_rule: WinRule::default(),
        }
    }

    /// A board without any links.
    pub fn empty() -> Self {
        Self {
            links: BTreeMap::new(),
            win_rule: WinRule::default(),
        }
    }

    /// Sets how the game can be won on this board.
    pub fn with_win_rule(mut self, win_rule: WinRule) -> Self {
        self.win_rule = win_rule;
        self
    }

    /// How the game can be won on this board.
    pub fn win_rule(&self) -> WinRule {
        self.win_rule
    }

    /// Whether a ladder can put a player on the winning square without a win.
    pub fn strands_on_goal(&self) -> bool {
        self.win_rule == WinRule::ExactRoll
            && self.shortcuts().any(|(_, to)| to == WINNING_SQUARE)
    }

    fn check_link(origin: u8, destination: u8) -> Result<(), BoardError> {
        if !Self::on_board(origin) || !Self::on_board(destination) {
            return Err(BoardError::OutOfRange {
                origin,
                destination,
            });
        }
        if origin == destination {
            return Err(BoardError::SelfLink(origin));
        }
        if origin == WINNING_SQUARE {
            return Err(BoardError::LinkFromWinningSquare);
        }
        Ok(())
    }

    fn on_board(square: u8) -> bool {
        (1..=BOARD_SIZE).contains(&square)
    }

    /// Number of squares.
    pub fn size(&self) -> u8 {
        BOARD_SIZE
    }

    /// Returns the outgoing link from `square`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidSquare`] outside `[1, 100]`.
    pub fn link_for(&self, square: u8) -> Result<Option<Link>, GameError> {
        if !Self::on_board(square) {
            return Err(GameError::InvalidSquare(square));
        }
        Ok(self
            .links
            .get(&square)
            .map(|&destination| Self::link(square, destination)))
    }

    fn link(origin: u8, destination: u8) -> Link {
        let kind = if destination > origin {
            LinkKind::Shortcut
        } else {
            LinkKind::Setback
        };
        Link { kind, destination }
    }

    /// All links in ascending origin order.
    pub fn links(&self) -> impl Iterator<Item = (u8, Link)> + '_ {
        self.links
            .iter()
            .map(|(&origin, &destination)| (origin, Self::link(origin, destination)))
    }

    /// Ladders in ascending origin order.
    pub fn shortcuts(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.links_of(LinkKind::Shortcut)
    }

    /// Snakes in ascending origin order.
    pub fn setbacks(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.links_of(LinkKind::Setback)
    }

    fn links_of(&self, kind: LinkKind) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.links()
            .filter(move |(_, link)| link.kind == kind)
            .map(|(origin, link)| (origin, link.destination))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
