//! Read-only view of a game for renderers and persistence.

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{GameError, GameErrorKind};
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::position::Position;
use crate::rules;
use crate::state::{GameState, GameStatus};
use crate::tile::{Tile, is_tile_value};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Board contents, score and status at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board edge length.
    pub size: usize,
    /// Cells in row-major order.
    pub cells: Vec<Option<Tile>>,
    /// Score so far.
    pub score: u64,
    /// Game status.
    pub status: GameStatus,
}

impl Snapshot {
    /// Tile values as rows, `0` for empty cells.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|c| c.as_ref().map_or(0, Tile::value)).collect())
            .collect()
    }
}

impl GameState {
    /// Captures the current board, score and status.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.board().size(),
            cells: self.board().cells().map(|(_, tile)| tile.cloned()).collect(),
            score: self.score(),
            status: self.status(),
        }
    }

    /// Rebuilds a game from a snapshot taken under `config`.
    ///
    /// # Errors
    ///
    /// `InvalidSnapshot` if the snapshot does not fit the configured board,
    /// carries tiles or merge annotations that could never occur in play, or
    /// reports a status the board contradicts.
    #[instrument(skip(snapshot), fields(size = snapshot.size, status = %snapshot.status))]
    pub fn restore(config: GameConfig, snapshot: Snapshot) -> Result<Self, GameError> {
        let size = *config.size();
        if snapshot.size != size {
            return Err(invalid(format!(
                "snapshot size {} does not match configured size {}",
                snapshot.size, size
            )));
        }
        if snapshot.cells.len() != size * size {
            return Err(invalid(format!(
                "expected {} cells, found {}",
                size * size,
                snapshot.cells.len()
            )));
        }

        let mut board = Board::new(size);
        for (i, cell) in snapshot.cells.into_iter().enumerate() {
            let Some(tile) = cell else { continue };
            let expected = Position::new(i % size, i / size);
            if tile.position() != expected {
                return Err(invalid(format!(
                    "tile at cell {} claims position {}",
                    expected,
                    tile.position()
                )));
            }
            if !is_tile_value(tile.value()) {
                return Err(invalid(format!("tile value {} at {}", tile.value(), expected)));
            }
            let mut previous = tile
                .previous_position()
                .into_iter()
                .chain(tile.merged_from().into_iter().flatten().flat_map(|s| s.previous_position));
            if let Some(off) = previous.find(|p| !board.within_bounds(*p)) {
                return Err(invalid(format!("tile at {} came from off-board {}", expected, off)));
            }
            let restored = Tile::new(expected, tile.value())?
                .with_annotations(tile.previous_position(), tile.merged_from().copied());
            board.insert_tile(restored)?;
        }

        BoardInvariants::check_all(&board).map_err(|violations| {
            let broken: Vec<_> = violations.into_iter().map(|v| v.description).collect();
            invalid(broken.join("; "))
        })?;
        check_status(&board, snapshot.status, *config.winning_value())?;

        debug!(tiles = board.tile_count(), "Snapshot restored");
        Ok(GameState::from_parts(config, board, snapshot.score, snapshot.status))
    }
}

/// Rejects a status the board could not have produced.
#[track_caller]
fn check_status(board: &Board, status: GameStatus, winning_value: u32) -> Result<(), GameError> {
    let alive = rules::moves_available(board);
    match status {
        GameStatus::Won if board.max_value() < winning_value => Err(invalid(format!(
            "marked won without a {} tile",
            winning_value
        ))),
        GameStatus::Lost if alive => Err(invalid("marked lost with moves left".to_string())),
        GameStatus::Playing if !alive => {
            Err(invalid("marked playing with no moves left".to_string()))
        }
        _ => Ok(()),
    }
}

#[track_caller]
fn invalid(message: String) -> GameError {
    GameError::new(GameErrorKind::InvalidSnapshot(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;
    use crate::tile::TileSnapshot;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_snapshot_reflects_board() {
        let board = Board::from_rows(&[[2, 0], [0, 4]]).unwrap();
        let game = GameState::from_board(GameConfig::new(2, 0), board).unwrap();
        let snap = game.snapshot();

        assert_eq!(snap.size, 2);
        assert_eq!(snap.rows(), vec![vec![2, 0], vec![0, 4]]);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.status, GameStatus::Playing);
    }

    #[test]
    fn test_restore_through_json() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = GameState::new_game(GameConfig::default(), &mut rng).unwrap();
        for dir in [Direction::Left, Direction::Up, Direction::Right] {
            game.apply_move(dir, &mut rng).unwrap();
        }

        let json = serde_json::to_string(&game.snapshot()).unwrap();
        let snap: Snapshot = serde_json::from_str(&json).unwrap();
        let restored = GameState::restore(GameConfig::default(), snap).unwrap();

        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.score(), game.score());
        assert_eq!(restored.status(), game.status());
    }

    #[test]
    fn test_restore_rejects_size_mismatch() {
        let game = GameState::from_board(GameConfig::new(2, 0), Board::new(2)).unwrap();
        let err = GameState::restore(GameConfig::default(), game.snapshot()).unwrap_err();
        assert!(matches!(err.kind, GameErrorKind::InvalidSnapshot(_)));
    }

    #[test]
    fn test_restore_rejects_misplaced_tile() {
        let board = Board::from_rows(&[[2, 0], [0, 0]]).unwrap();
        let game = GameState::from_board(GameConfig::new(2, 0), board).unwrap();
        let mut snap = game.snapshot();
        snap.cells.swap(0, 3);
        let err = GameState::restore(GameConfig::new(2, 0), snap).unwrap_err();
        assert!(matches!(err.kind, GameErrorKind::InvalidSnapshot(_)));
    }

    fn snapshot_of<const N: usize>(rows: [[u32; N]; N], status: GameStatus) -> Snapshot {
        let board = Board::from_rows(&rows).unwrap();
        let mut snap = GameState::from_board(GameConfig::new(N, 0), board).unwrap().snapshot();
        snap.status = status;
        snap
    }

    fn assert_rejected(result: Result<GameState, GameError>) {
        let err = result.unwrap_err();
        assert!(matches!(err.kind, GameErrorKind::InvalidSnapshot(_)), "got {err}");
    }

    #[test]
    fn test_restore_rejects_truncated_cells() {
        let json = r#"{"size":4,"cells":[null],"score":0,"status":"Playing"}"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert_rejected(GameState::restore(GameConfig::default(), snap));
    }

    #[test]
    fn test_restore_rejects_lost_with_moves_left() {
        let snap = snapshot_of([[2, 0], [0, 0]], GameStatus::Lost);
        assert_rejected(GameState::restore(GameConfig::new(2, 0), snap));
    }

    #[test]
    fn test_restore_rejects_playing_on_dead_board() {
        let snap = snapshot_of([[2, 4], [4, 2]], GameStatus::Playing);
        assert_rejected(GameState::restore(GameConfig::new(2, 0), snap));
    }

    #[test]
    fn test_restore_accepts_lost_on_dead_board() {
        let snap = snapshot_of([[2, 4], [4, 2]], GameStatus::Lost);
        let game = GameState::restore(GameConfig::new(2, 0), snap).unwrap();
        assert_eq!(game.status(), GameStatus::Lost);
        assert!(!game.moves_available());
    }

    #[test]
    fn test_restore_rejects_won_without_winning_tile() {
        let snap = snapshot_of([[1024, 0], [0, 0]], GameStatus::Won);
        assert_rejected(GameState::restore(GameConfig::new(2, 0), snap));
    }

    #[test]
    fn test_restore_accepts_won_with_winning_tile() {
        let snap = snapshot_of([[2048, 0], [0, 0]], GameStatus::Won);
        let game = GameState::restore(GameConfig::new(2, 0), snap).unwrap();
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_restore_rejects_inconsistent_merge_annotation() {
        let half = TileSnapshot {
            position: Position::new(0, 0),
            value: 4,
            previous_position: None,
        };
        let tile = Tile::new(Position::new(0, 0), 4)
            .unwrap()
            .with_annotations(None, Some([half, half]));
        let mut snap = snapshot_of([[0, 0], [0, 0]], GameStatus::Playing);
        snap.cells[0] = Some(tile);
        assert_rejected(GameState::restore(GameConfig::new(2, 0), snap));
    }

    #[test]
    fn test_restore_rejects_off_board_previous_position() {
        let tile = Tile::new(Position::new(1, 0), 2)
            .unwrap()
            .with_annotations(Some(Position::new(5, 0)), None);
        let mut snap = snapshot_of([[0, 0], [0, 0]], GameStatus::Playing);
        snap.cells[1] = Some(tile);
        assert_rejected(GameState::restore(GameConfig::new(2, 0), snap));
    }

    #[test]
    fn test_restored_game_accepts_moves() {
        let mut rng = StdRng::seed_from_u64(4);
        let snap = snapshot_of([[2, 0], [2, 0]], GameStatus::Playing);
        let mut game = GameState::restore(GameConfig::new(2, 0), snap).unwrap();
        let outcome = game.apply_move(Direction::Up, &mut rng).unwrap();
        assert!(outcome.moved);
        assert_eq!(game.score(), 4);
    }
}
