//! Error types for the 2048 rules engine.

use crate::config::ConfigError;
use crate::position::Position;
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong inside the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// A position outside `[0, size)` reached a board accessor.
    #[display("Position {} is outside a {}x{} board", position, size, size)]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Board edge length.
        size: usize,
    },

    /// A direction value outside the four canonical directions.
    #[display("Invalid direction: {}", _0)]
    InvalidDirection(String),

    /// A spawn was requested while no cell was empty.
    #[display("Cannot spawn a tile on a full board")]
    SpawnOnFullBoard,

    /// A tile was inserted on top of another tile.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),

    /// A tile value that is not a power of two >= 2.
    #[display("Invalid tile value: {}", _0)]
    InvalidTileValue(u32),

    /// Merging two tiles of this value would exceed `u32`.
    #[display("Merging two {} tiles overflows the tile value", _0)]
    TileOverflow(u32),

    /// The points of a single move do not fit in `u32`.
    #[display("Score gained by a single move overflows")]
    ScoreOverflow,

    /// The game configuration failed validation.
    #[display("{}", _0)]
    Config(ConfigError),

    /// A postcondition failed after a move.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// Rows handed to a board constructor do not form a square grid.
    #[display("Invalid board: {}", _0)]
    InvalidBoard(String),

    /// A snapshot could not be turned back into a game state.
    #[display("Invalid snapshot: {}", _0)]
    InvalidSnapshot(String),
}

/// Rules engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct GameError {
    /// The kind of failure.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new error, recording the caller's location.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }
}

impl From<GameErrorKind> for GameError {
    #[track_caller]
    fn from(kind: GameErrorKind) -> Self {
        Self::new(kind)
    }
}
