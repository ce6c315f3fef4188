//! Twenty48 - terminal driver for the strictly_twenty48 rules engine.
//!
//! Translates typed commands into moves and prints the board. All rules live
//! in the library.

#![warn(missing_docs)]

mod cli;
mod play;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, GameArgs};
use strictly_twenty48::{Direction, GameConfig, Session};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { game } => {
            let (config, seed) = resolve(&game)?;
            play::run(config, seed)
        }
        Command::Replay { game, moves, json } => run_replay(&game, &moves, json),
    }
}

/// Builds the game config and seed from command-line settings.
#[instrument]
fn resolve(args: &GameArgs) -> Result<(GameConfig, u64)> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(size) = args.size {
        config = config.with_size(size);
        config.validate()?;
    }
    let seed = args.seed.unwrap_or_else(clock_seed);
    debug!(?config, seed, "Resolved game settings");
    Ok((config, seed))
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Replays a move list and prints the result.
#[instrument]
fn run_replay(args: &GameArgs, moves: &str, json: bool) -> Result<()> {
    let (config, seed) = resolve(args)?;
    let moves = Direction::parse_sequence(moves).context("Invalid move list")?;
    let session = Session::replay(config, seed, &moves)?;
    info!(seed, moves = moves.len(), score = session.state().score(), "Replay finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    } else {
        print!("{}", play::render(&session));
    }
    Ok(())
}
