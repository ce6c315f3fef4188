//! Tile value invariant: every value is a power of two >= 2.

use super::Invariant;
use crate::board::Board;
use crate::tile::is_tile_value;

/// Invariant: every tile value is a power of two >= 2.
pub struct PowerOfTwoValuesInvariant;

impl Invariant<Board> for PowerOfTwoValuesInvariant {
    fn holds(board: &Board) -> bool {
        board.tiles().all(|tile| is_tile_value(tile.value()))
    }

    fn description() -> &'static str {
        "Every tile value is a power of two >= 2"
    }
}
