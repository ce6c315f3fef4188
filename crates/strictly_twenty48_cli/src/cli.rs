//! Command-line interface for twenty48.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Twenty48 - play or replay 2048 games in the terminal
#[derive(Parser, Debug)]
#[command(name = "twenty48")]
#[command(about = "Deterministic 2048 rules engine driver", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every command
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Seed for the tile spawner (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Board edge length (overrides the config file)
    #[arg(long)]
    pub size: Option<usize>,

    /// Path to a TOML game config
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively, one command per line on stdin
    Play {
        #[command(flatten)]
        game: GameArgs,
    },

    /// Replay a move list and print the final position
    Replay {
        #[command(flatten)]
        game: GameArgs,

        /// Moves as letters U, R, D, L (e.g. "ULDR")
        #[arg(short, long)]
        moves: String,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}
