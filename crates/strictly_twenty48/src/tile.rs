//! Tiles and their per-move annotations.

use crate::error::{GameError, GameErrorKind};
use crate::position::Position;
use serde::{Deserialize, Serialize};

/// Returns true if `value` is a legal tile value (a power of two >= 2).
pub fn is_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// A single tile on the board.
///
/// `previous_position` and `merged_from` describe the last move only. They are
/// reset at the start of every move and never feed back into the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    position: Position,
    value: u32,
    previous_position: Option<Position>,
    merged_from: Option<[TileSnapshot; 2]>,
}

impl Tile {
    /// Creates a tile, rejecting values that are not a power of two >= 2.
    #[track_caller]
    pub fn new(position: Position, value: u32) -> Result<Self, GameError> {
        if !is_tile_value(value) {
            return Err(GameError::new(GameErrorKind::InvalidTileValue(value)));
        }
        Ok(Self {
            position,
            value,
            previous_position: None,
            merged_from: None,
        })
    }

    /// Builds the tile produced by merging `moving` into `stationary`.
    ///
    /// The result sits on the stationary tile's cell with double the value.
    ///
    /// # Errors
    ///
    /// `TileOverflow` if the doubled value does not fit in `u32`.
    #[track_caller]
    pub(crate) fn merged(moving: &Tile, stationary: &Tile) -> Result<Self, GameError> {
        debug_assert_eq!(moving.value, stationary.value);
        let value = moving
            .value
            .checked_mul(2)
            .ok_or_else(|| GameError::new(GameErrorKind::TileOverflow(moving.value)))?;
        Ok(Self {
            position: stationary.position,
            value,
            previous_position: None,
            merged_from: Some([moving.snapshot(), stationary.snapshot()]),
        })
    }

    /// Current cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Face value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Where the tile stood before the last move, if it existed then.
    pub fn previous_position(&self) -> Option<Position> {
        self.previous_position
    }

    /// The two tiles this one was merged from during the last move.
    pub fn merged_from(&self) -> Option<&[TileSnapshot; 2]> {
        self.merged_from.as_ref()
    }

    /// Flat copy of this tile for annotations and rendering.
    pub fn snapshot(&self) -> TileSnapshot {
        TileSnapshot {
            position: self.position,
            value: self.value,
            previous_position: self.previous_position,
        }
    }

    /// Clears merge provenance and remembers the current cell.
    pub(crate) fn save_position(&mut self) {
        self.merged_from = None;
        self.previous_position = Some(self.position);
    }

    pub(crate) fn update_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Restores transient annotations from persisted data.
    pub(crate) fn with_annotations(
        mut self,
        previous_position: Option<Position>,
        merged_from: Option<[TileSnapshot; 2]>,
    ) -> Self {
        self.previous_position = previous_position;
        self.merged_from = merged_from;
        self
    }
}

/// Read-only copy of a tile, used for `merged_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    /// Cell the tile occupied when merged (the merge target).
    pub position: Position,
    /// Face value before the merge.
    pub value: u32,
    /// Cell before the move.
    pub previous_position: Option<Position>,
}
