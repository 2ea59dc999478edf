//! Tests for the turn state machine lifecycle.

use strictly_ladders::{
    Board, Game, GameError, GameEvent, GamePhase, ResetPolicy, ScriptedDice, SeededDie,
    TurnResult, WinRule,
};

#[test]
fn test_lifecycle() {
    let mut game = Game::new(Board::standard());
    assert_eq!(game.phase(), GamePhase::Setup);

    let third = game.register("Carol").unwrap();
    game.start().unwrap();
    assert_eq!(game.register("Dave"), Err(GameError::RosterLocked));

    let order: Vec<_> = game.players().map(|p| *p.id()).collect();
    assert_eq!(order.len(), 3);
    assert_eq!(order[2], third);

    game.roll(2).unwrap();
    game.roll(2).unwrap();
    assert_eq!(game.current_player().map(|p| *p.id()), Some(third));
    game.roll(2).unwrap();
    assert_eq!(game.current_player().map(|p| *p.id()), Some(order[0]));
}

#[test]
fn test_reset_then_start_is_fresh() {
    for policy in [ResetPolicy::RestoreDefaults, ResetPolicy::KeepRoster] {
        let mut game = Game::with_players(Board::standard(), ["a", "b", "c"])
            .with_reset_policy(policy);
        game.start().unwrap();
        let mut die = SeededDie::new(11);
        for _ in 0..10 {
            game.roll_with(&mut die).unwrap();
        }

        game.reset();
        game.start().unwrap();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.players().all(|p| *p.position() == 0));
        assert_eq!(*game.turn().current_player_index(), 0);
        assert!(!*game.turn().roll_in_flight());
    }
}

#[test]
fn test_split_roll_orders_transfer_before_turn_change() {
    let mut game = Game::with_players(Board::standard(), ["a", "b"]);
    game.start().unwrap();
    game.drain_events();

    let outcome = game.begin_roll(1).unwrap();
    assert_eq!(game.pending_outcome(), Some(&outcome));
    let events = game.drain_events();
    assert_eq!(events, vec![GameEvent::Rolled(outcome)]);

    let result = game.complete_roll().unwrap();
    let TurnResult::Continue { next_player } = result else {
        panic!("game should continue");
    };
    assert_eq!(
        game.drain_events(),
        vec![GameEvent::TurnAdvanced { next_player }]
    );
}

#[test]
fn test_full_game_with_seeded_die_terminates() {
    let board = Board::standard().with_win_rule(WinRule::ReachGoal);
    let mut game = Game::with_players(board, ["a", "b"]);
    game.start().unwrap();
    let mut die = SeededDie::new(2024);

    let mut turns = 0;
    while game.phase() == GamePhase::Playing {
        game.roll_with(&mut die).unwrap();
        turns += 1;
        assert!(turns < 10_000, "game did not finish");
    }

    let winner = game.winner().expect("finished game has a winner");
    assert_eq!(*winner.position(), 100);
    let events = game.drain_events();
    assert!(matches!(
        events.last(),
        Some(GameEvent::PhaseChanged {
            from: GamePhase::Playing,
            to: GamePhase::Finished
        })
    ));
}

#[test]
fn test_exact_roll_games_are_only_won_by_the_die() {
    for seed in 0..20 {
        let mut game = Game::with_players(Board::standard(), ["a", "b", "c"]);
        game.start().unwrap();
        let mut die = SeededDie::new(seed);

        for _ in 0..2_000 {
            if game.phase() != GamePhase::Playing {
                break;
            }
            let outcome = game.roll_with(&mut die).unwrap();
            if outcome.won {
                assert_eq!(outcome.transfer, None, "seed {seed}");
                assert_eq!(outcome.start + outcome.die.get(), 100);
            }
        }
    }
}

#[test]
fn test_scripted_dice_replay_identically() {
    let play = || {
        let mut game = Game::with_players(Board::standard(), ["a", "b"]);
        game.start().unwrap();
        let mut dice = ScriptedDice::new([3, 6, 2, 5, 1, 4]).unwrap();
        for _ in 0..30 {
            if game.roll_with(&mut dice).is_err() {
                break;
            }
        }
        game.snapshot()
    };
    assert_eq!(play(), play());
}
