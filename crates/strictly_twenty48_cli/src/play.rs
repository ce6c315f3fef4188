//! Interactive line-based play loop.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;
use strictly_twenty48::{Direction, GameConfig, Session};
use tracing::{info, instrument, warn};

/// One typed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Slide the board.
    Move(Direction),
    /// Start a new game.
    Restart,
    /// Leave.
    Quit,
}

impl Input {
    /// Parses `w/a/s/d`, `up/down/left/right`, `restart` or `quit`.
    pub fn parse(line: &str) -> Option<Input> {
        let line = line.trim().to_ascii_lowercase();
        match line.as_str() {
            "w" | "k" => Some(Input::Move(Direction::Up)),
            "d" | "l" => Some(Input::Move(Direction::Right)),
            "s" | "j" => Some(Input::Move(Direction::Down)),
            "a" | "h" => Some(Input::Move(Direction::Left)),
            "r" | "restart" => Some(Input::Restart),
            "q" | "quit" | "exit" => Some(Input::Quit),
            other => Direction::from_str(other).ok().map(Input::Move),
        }
    }
}

/// Formats the board with score and status.
pub fn render(session: &Session) -> String {
    let state = session.state();
    format!(
        "Score: {}  Status: {}\n{}",
        state.score(),
        state.status(),
        state.board()
    )
}

/// Runs the play loop on stdin/stdout until quit or end of input.
#[instrument]
pub fn run(config: GameConfig, seed: u64) -> Result<()> {
    let mut session = Session::new(config, seed)?;
    info!(seed, "Starting interactive game");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", render(&session))?;
    writeln!(stdout, "Seed {}. Move with w/a/s/d, 'r' restarts, 'q' quits.", seed)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match Input::parse(&line) {
            Some(Input::Move(direction)) => {
                let outcome = session.apply_move(direction)?;
                if !outcome.moved {
                    writeln!(stdout, "Cannot move {}.", direction)?;
                    continue;
                }
            }
            Some(Input::Restart) => session.restart()?,
            Some(Input::Quit) => break,
            None => {
                warn!(input = %line, "Unrecognized command");
                writeln!(stdout, "Unknown command: {}", line.trim())?;
                continue;
            }
        }
        write!(stdout, "{}", render(&session))?;
        if session.state().status().is_terminal() {
            writeln!(stdout, "Game over: {}. Type 'r' to play again.", session.state().status())?;
        }
        stdout.flush()?;
    }
    Ok(())
}
