//! Placement invariant: tiles know where they are.

use super::Invariant;
use crate::board::Board;

/// Invariant: every occupied cell's tile reports that cell as its position.
pub struct PositionsMatchCellsInvariant;

impl Invariant<Board> for PositionsMatchCellsInvariant {
    fn holds(board: &Board) -> bool {
        board
            .cells()
            .all(|(pos, tile)| tile.is_none_or(|t| t.position() == pos))
    }

    fn description() -> &'static str {
        "Every tile's position equals its cell"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::move_tiles;
    use crate::{Direction, Position};

    #[test]
    fn test_holds_after_slides() {
        let mut board = Board::from_rows(&[[0, 2, 0], [4, 0, 4], [0, 0, 8]]).unwrap();
        move_tiles(&mut board, Direction::Right, 2048).unwrap();
        assert!(PositionsMatchCellsInvariant::holds(&board));
        move_tiles(&mut board, Direction::Up, 2048).unwrap();
        assert!(PositionsMatchCellsInvariant::holds(&board));
    }

    #[test]
    fn test_tampered_position_violates() {
        let mut tampered = Board::from_rows(&[[2, 0], [0, 0]]).unwrap();
        for tile in tampered.tiles_mut() {
            tile.update_position(Position::new(1, 0));
        }
        assert!(!PositionsMatchCellsInvariant::holds(&tampered));
    }
}
