//! Command-line interface for strictly_ladders.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Ladders - snakes and ladders rules engine harness
#[derive(Parser, Debug)]
#[command(name = "strictly_ladders")]
#[command(about = "Drive the snakes and ladders engine from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML game configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a full game with a seeded die
    Play {
        /// Player names in turn order (repeat the flag); overrides the config
        #[arg(short, long)]
        names: Vec<String>,

        /// Die seed; overrides the config
        #[arg(short, long)]
        seed: Option<u64>,

        /// Give up after this many rolls
        #[arg(long, default_value = "10000")]
        max_turns: usize,

        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a fixed sequence of die values and print the state as JSON
    Script {
        /// Player names in turn order (repeat the flag); overrides the config
        #[arg(short, long)]
        names: Vec<String>,

        /// Comma-separated die values, e.g. 1,6,3
        #[arg(short, long, value_delimiter = ',', required = true)]
        rolls: Vec<u8>,
    },

    /// List the board's ladders and snakes
    Board,
}
