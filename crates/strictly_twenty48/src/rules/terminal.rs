//! Terminal-state detection for 2048.

use crate::action::Direction;
use crate::board::Board;
use tracing::instrument;

/// Checks whether any two orthogonal neighbors hold equal values.
pub fn tile_matches_available(board: &Board) -> bool {
    board.tiles().any(|tile| {
        Direction::ALL.iter().any(|dir| {
            board
                .probe(tile.position().step(dir.vector()))
                .is_some_and(|other| other.value() == tile.value())
        })
    })
}

/// Returns true unless the board is full with no adjacent equal pair.
///
/// A `false` here means the game is lost.
#[instrument(skip(board), fields(size = board.size()))]
pub fn moves_available(board: &Board) -> bool {
    board.cells_available() || tile_matches_available(board)
}

/// Returns true if sliding toward `direction` would change the board.
///
/// A slide changes something exactly when some tile has an empty cell or an
/// equal tile right next to it in that direction.
pub fn can_move(board: &Board, direction: Direction) -> bool {
    let vector = direction.vector();
    board.tiles().any(|tile| {
        let next = tile
            .position()
            .step(vector)
            .filter(|p| board.within_bounds(*p));
        match next {
            Some(p) => board.probe(Some(p)).is_none_or(|other| other.value() == tile.value()),
            None => false,
        }
    })
}

/// Directions that would change the board, in index order.
pub fn legal_directions(board: &Board) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|dir| can_move(board, *dir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cells_mean_moves_available() {
        let board = Board::from_rows(&[[2, 4], [8, 0]]).unwrap();
        assert!(moves_available(&board));
        assert!(!tile_matches_available(&board));
    }

    #[test]
    fn test_full_checkerboard_is_lost() {
        let board = Board::from_rows(&[
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ])
        .unwrap();
        assert!(!moves_available(&board));
        assert!(legal_directions(&board).is_empty());
    }

    #[test]
    fn test_horizontal_pair_keeps_game_alive() {
        let board = Board::from_rows(&[
            [2, 2, 4, 8],
            [4, 8, 16, 32],
            [8, 16, 32, 64],
            [16, 32, 64, 128],
        ])
        .unwrap();
        assert!(moves_available(&board));
        assert_eq!(legal_directions(&board), vec![Direction::Right, Direction::Left]);
    }

    #[test]
    fn test_vertical_pair_keeps_game_alive() {
        let board = Board::from_rows(&[
            [2, 4, 8, 16],
            [2, 8, 16, 32],
            [4, 16, 32, 64],
            [8, 32, 64, 128],
        ])
        .unwrap();
        assert!(moves_available(&board));
        assert_eq!(legal_directions(&board), vec![Direction::Up, Direction::Down]);
    }

    #[test]
    fn test_can_move_into_gap() {
        let board = Board::from_rows(&[[2, 0, 0], [0, 0, 0], [0, 0, 0]]).unwrap();
        assert!(!can_move(&board, Direction::Up));
        assert!(!can_move(&board, Direction::Left));
        assert!(can_move(&board, Direction::Right));
        assert!(can_move(&board, Direction::Down));
    }
}
