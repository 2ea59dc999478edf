//! Square classification.

use crate::board::{BOARD_SIZE, Board, LinkKind};
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// What happens to a player who lands on a square.
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
pub enum SquareKind {
    /// No link; the player stays put.
    Normal,
    /// Origin of a ladder.
    Shortcut,
    /// Origin of a snake.
    Setback,
}

impl From<LinkKind> for SquareKind {
    fn from(kind: LinkKind) -> Self {
        match kind {
            LinkKind::Shortcut => SquareKind::Shortcut,
            LinkKind::Setback => SquareKind::Setback,
        }
    }
}

/// Classification of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SquareInfo {
    /// The square that was classified.
    pub square: u8,
    /// Its kind.
    pub kind: SquareKind,
    /// Where a player landing here ends up. Equal to `square` for normal squares.
    pub destination: u8,
}

impl SquareInfo {
    /// Returns true if landing here moves the player.
    pub fn is_link(&self) -> bool {
        self.kind != SquareKind::Normal
    }
}

impl Board {
    /// Classifies `square` and reports its effective destination.
    ///
    /// Pure lookup, usable before a game starts.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidSquare`] outside `[1, 100]`.
    pub fn classify(&self, square: u8) -> Result<SquareInfo, GameError> {
        let info = match self.link_for(square)? {
            Some(link) => SquareInfo {
                square,
                kind: link.kind.into(),
                destination: link.destination,
            },
            None => SquareInfo {
                square,
                kind: SquareKind::Normal,
                destination: square,
            },
        };
        Ok(info)
    }

    /// Classifies every square from 1 to 100 in order.
    pub fn describe(&self) -> impl Iterator<Item = SquareInfo> + '_ {
        (1..=BOARD_SIZE).filter_map(|square| self.classify(square).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_square_points_at_itself() {
        let info = Board::standard().classify(50).unwrap();
        assert_eq!(info.kind, SquareKind::Normal);
        assert_eq!(info.destination, 50);
        assert!(!info.is_link());
    }

    #[test]
    fn test_link_squares() {
        let board = Board::standard();
        let ladder = board.classify(1).unwrap();
        assert_eq!((ladder.kind, ladder.destination), (SquareKind::Shortcut, 38));

        let snake = board.classify(98).unwrap();
        assert_eq!((snake.kind, snake.destination), (SquareKind::Setback, 78));
    }

    #[test]
    fn test_winning_square_is_normal() {
        let info = Board::standard().classify(100).unwrap();
        assert_eq!(info.kind, SquareKind::Normal);
    }

    #[test]
    fn test_classify_rejects_off_board() {
        assert_eq!(
            Board::standard().classify(0),
            Err(GameError::InvalidSquare(0))
        );
    }

    #[test]
    fn test_describe_covers_the_board() {
        let board = Board::standard();
        let squares: Vec<_> = board.describe().collect();
        assert_eq!(squares.len(), 100);
        assert_eq!(squares.iter().filter(|s| s.is_link()).count(), 19);
    }
}
