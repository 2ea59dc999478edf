//! Strictly Ladders - command-line harness
//!
//! Plays or replays games against the rules engine and prints the result.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use std::path::Path;
use strictly_ladders::{
    Game, GameConfig, GameEvent, GamePhase, GameSnapshot, MoveOutcome, SquareKind,
};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            names,
            seed,
            max_turns,
            json,
        } => run_play(config, names, seed, max_turns, json),
        Command::Script { names, rolls } => run_script(config, names, &rolls),
        Command::Board => run_board(&config),
    }
}

#[instrument]
fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => Ok(GameConfig::from_file(path)?),
        None => {
            debug!("No config file, using defaults");
            Ok(GameConfig::default())
        }
    }
}

fn apply_overrides(config: GameConfig, names: Vec<String>, seed: Option<u64>) -> GameConfig {
    let config = if names.is_empty() {
        config
    } else {
        config.with_players(names)
    };
    match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

/// Final report of a harness run.
#[derive(Debug, Serialize)]
struct Report {
    rolls: Vec<MoveOutcome>,
    state: GameSnapshot,
}

/// Play a full game with the configured die
#[instrument(skip(config, names))]
fn run_play(
    config: GameConfig,
    names: Vec<String>,
    seed: Option<u64>,
    max_turns: usize,
    json: bool,
) -> Result<()> {
    let config = apply_overrides(config, names, seed);
    let mut game = config.build_game()?;
    let mut die = config.build_die();
    info!(seed = die.seed(), "Playing with seeded die");

    game.start()?;
    let mut rolls = Vec::new();
    while game.phase() == GamePhase::Playing && rolls.len() < max_turns {
        rolls.push(game.roll_with(&mut die)?);
        for event in game.drain_events() {
            if !json {
                print_event(&game, &event);
            }
        }
    }

    if game.phase() == GamePhase::Playing {
        warn!(max_turns, "Turn limit reached before anyone won");
    }

    if json {
        let report = Report {
            rolls,
            state: game.snapshot(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_standings(&game);
    }
    Ok(())
}

/// Apply scripted die values and print the state as JSON
#[instrument(skip(config, names))]
fn run_script(config: GameConfig, names: Vec<String>, die_values: &[u8]) -> Result<()> {
    let config = apply_overrides(config, names, None);
    let mut game = config.build_game()?;
    game.start()?;

    let mut rolls = Vec::with_capacity(die_values.len());
    for (turn, &die) in die_values.iter().enumerate() {
        let outcome = game
            .roll(die)
            .with_context(|| format!("Roll #{} ({}) rejected", turn + 1, die))?;
        rolls.push(outcome);
    }

    let report = Report {
        rolls,
        state: game.snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// List the board's links
#[instrument(skip(config))]
fn run_board(config: &GameConfig) -> Result<()> {
    let board = config.build_board()?;
    for info in board.describe().filter(|info| info.is_link()) {
        let symbol = match info.kind {
            SquareKind::Shortcut => "ladder",
            SquareKind::Setback => "snake",
            SquareKind::Normal => continue,
        };
        println!("{:>3} -> {:>3}  {}", info.square, info.destination, symbol);
    }
    Ok(())
}

fn player_name(game: &Game, outcome: &MoveOutcome) -> String {
    game.roster()
        .get(outcome.player)
        .map(|p| p.name().clone())
        .unwrap_or_else(|_| outcome.player.to_string())
}

fn print_event(game: &Game, event: &GameEvent) {
    match event {
        GameEvent::Rolled(outcome) => {
            let name = player_name(game, outcome);
            if outcome.overshot {
                println!("{name} rolled {} and overshot, staying on {}", outcome.die, outcome.start);
            } else if let Some(transfer) = outcome.transfer {
                println!(
                    "{name} rolled {}, landed on {} and {}",
                    outcome.die,
                    outcome.landed_on(),
                    transfer
                );
            } else {
                println!("{name} rolled {} and moved to {}", outcome.die, outcome.final_position);
            }
        }
        GameEvent::PhaseChanged {
            to: GamePhase::Finished,
            ..
        } => {
            if let Some(winner) = game.winner() {
                println!("{} wins!", winner.name());
            }
        }
        other => debug!(event = %other, "Event"),
    }
}

fn print_standings(game: &Game) {
    for player in game.players() {
        println!("{:<16} {:>3}", player.name(), player.position());
    }
}
