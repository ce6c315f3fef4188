//! First-class move types for 2048.
//!
//! A move is just a direction. Everything a move did to the board is reported
//! back in a [`MoveOutcome`] so callers never have to diff boards themselves.

use crate::error::{GameError, GameErrorKind};
use crate::position::Vector;
use crate::state::GameStatus;
use crate::tile::Tile;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the four sliding directions.
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
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward the last column.
    Right,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
}

impl Direction {
    /// All four directions, in index order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step vector for this direction.
    pub const fn vector(self) -> Vector {
        match self {
            Direction::Up => Vector::new(0, -1),
            Direction::Right => Vector::new(1, 0),
            Direction::Down => Vector::new(0, 1),
            Direction::Left => Vector::new(-1, 0),
        }
    }

    /// Maps `0..=3` to Up, Right, Down, Left.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Single-letter code used in compact move lists.
    pub fn code(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Right => 'R',
            Direction::Down => 'D',
            Direction::Left => 'L',
        }
    }

    /// Parses a compact move list such as `"ULDR"`.
    ///
    /// Letters are case-insensitive; whitespace and commas are skipped.
    #[instrument]
    pub fn parse_sequence(s: &str) -> Result<Vec<Direction>, GameError> {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| match c.to_ascii_uppercase() {
                'U' => Ok(Direction::Up),
                'R' => Ok(Direction::Right),
                'D' => Ok(Direction::Down),
                'L' => Ok(Direction::Left),
                other => Err(GameError::new(GameErrorKind::InvalidDirection(
                    other.to_string(),
                ))),
            })
            .collect()
    }
}

impl TryFrom<u8> for Direction {
    type Error = GameError;

    #[track_caller]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value)
            .ok_or_else(|| GameError::new(GameErrorKind::InvalidDirection(value.to_string())))
    }
}

/// Everything one call to `apply_move` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Whether any tile moved or merged.
    pub moved: bool,
    /// Points earned from merges in this move.
    pub score_delta: u32,
    /// Whether a merge produced the winning value.
    pub won: bool,
    /// Number of merges performed.
    pub merges: usize,
    /// The tile spawned after the move, if any.
    pub spawned: Option<Tile>,
    /// Game status after the move.
    pub status: GameStatus,
}

impl MoveOutcome {
    /// Outcome of a move that changed nothing.
    pub fn unchanged(status: GameStatus) -> Self {
        Self {
            moved: false,
            score_delta: 0,
            won: false,
            merges: 0,
            spawned: None,
            status,
        }
    }
}
