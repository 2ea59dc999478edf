//! Reference-board scenarios.

use strictly_ladders::{Board, Game, GameError, GamePhase, MoveOutcome, Roster, Transfer};
use strictly_ladders::{DieValue, apply_roll};

fn roll_from(start: u8, die: u8) -> (MoveOutcome, u8) {
    let mut roster = Roster::from_names(["solo"]);
    // Walk the token to `start` with plain moves on an empty board.
    let empty = Board::empty();
    let mut remaining = start;
    while remaining > 0 {
        let step = remaining.min(6);
        apply_roll(&empty, &mut roster, 0, DieValue::new(step).unwrap()).unwrap();
        remaining -= step;
    }
    let outcome = apply_roll(&Board::standard(), &mut roster, 0, DieValue::new(die).unwrap())
        .expect("roll applies");
    let position = *roster.by_index(0).unwrap().position();
    (outcome, position)
}

#[test]
fn test_first_square_is_a_ladder() {
    let (outcome, position) = roll_from(0, 1);
    assert_eq!(position, 38);
    assert_eq!(outcome.transfer, Some(Transfer::Shortcut(38)));
    assert!(!outcome.won && !outcome.overshot);
}

#[test]
fn test_snake_on_98() {
    let (outcome, position) = roll_from(95, 3);
    assert_eq!(position, 78);
    assert_eq!(outcome.transfer, Some(Transfer::Setback(78)));
}

#[test]
fn test_overshoot_from_97() {
    let (outcome, position) = roll_from(97, 4);
    assert!(outcome.overshot);
    assert_eq!(position, 97);
    assert_eq!(outcome.final_position, 97);
    assert_eq!(outcome.transfer, None);
}

#[test]
fn test_exact_win_from_94() {
    let (outcome, position) = roll_from(94, 6);
    assert!(outcome.won);
    assert_eq!(position, 100);
    assert_eq!(outcome.transfer, None);
}

#[test]
fn test_two_player_game_finishes_and_locks() {
    // A ladder straight to 99 makes the race short.
    let board = Board::new([(5, 99)]).unwrap();
    let mut game = Game::with_players(board, ["A", "B"]);
    game.start().unwrap();

    game.roll(5).unwrap(); // A -> 99
    game.roll(2).unwrap(); // B -> 2
    let outcome = game.roll(1).unwrap(); // A -> 100
    assert!(outcome.won);
    assert_eq!(game.phase(), GamePhase::Finished);
    assert_eq!(game.winner().unwrap().name(), "A");

    for die in 1..=6 {
        assert_eq!(game.roll(die), Err(GameError::NoActivePlayer));
    }

    game.reset();
    assert_eq!(game.phase(), GamePhase::Setup);
    game.start().unwrap();
    assert_eq!(game.phase(), GamePhase::Playing);
}
