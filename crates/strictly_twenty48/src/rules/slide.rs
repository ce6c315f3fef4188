//! Sliding and merging tiles in one direction.

use crate::action::Direction;
use crate::board::Board;
use crate::error::{GameError, GameErrorKind};
use crate::position::{Position, Vector};
use crate::tile::Tile;
use tracing::{debug, instrument};

/// Visiting order for one move: every `x` in `xs`, then every `y` in `ys`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversals {
    /// Column order.
    pub xs: Vec<usize>,
    /// Row order.
    pub ys: Vec<usize>,
}

/// Where a tile would stop, and what stopped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarthestPosition {
    /// Last empty cell along the vector (the start cell if it cannot move).
    pub farthest: Position,
    /// The cell that blocked the walk, or `None` if the walk hit the edge.
    pub next: Option<Position>,
}

/// Tile movement produced by [`move_tiles`], before any spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveSummary {
    /// Whether any tile changed cell.
    pub moved: bool,
    /// Sum of all merged values.
    pub score_delta: u32,
    /// Whether a merge produced the winning value.
    pub won: bool,
    /// Number of merges performed.
    pub merges: usize,
}

/// Builds the traversal order for `vector` on a board of edge `size`.
///
/// Each axis is reversed when the vector points toward its far end, so the
/// tiles nearest the destination edge settle first.
pub fn build_traversals(size: usize, vector: Vector) -> Traversals {
    let mut xs: Vec<usize> = (0..size).collect();
    let mut ys: Vec<usize> = (0..size).collect();
    if vector.dx == 1 {
        xs.reverse();
    }
    if vector.dy == 1 {
        ys.reverse();
    }
    Traversals { xs, ys }
}

/// Walks from `pos` along `vector` while the cells ahead are empty.
pub fn find_farthest_position(board: &Board, pos: Position, vector: Vector) -> FarthestPosition {
    let mut farthest = pos;
    loop {
        let next = farthest.step(vector).filter(|p| board.within_bounds(*p));
        match next {
            Some(p) if board.cell_available(p) => farthest = p,
            _ => return FarthestPosition { farthest, next },
        }
    }
}

/// Clears merge provenance and records the current cell on every tile.
pub fn prepare_tiles(board: &mut Board) {
    for tile in board.tiles_mut() {
        tile.save_position();
    }
}

/// Slides every tile on `board` toward `direction`, merging equal pairs.
///
/// A tile produced by a merge does not merge again during the same move.
/// No tile is spawned here.
///
/// # Errors
///
/// `TileOverflow` or `ScoreOverflow` when a merge or the move's points would
/// exceed `u32`; the board is left half-moved, so callers work on a copy.
/// Anything else means a broken board invariant (an off-board cell in the
/// traversal or a cell occupied twice) and indicates a bug.
#[instrument(skip(board), fields(size = board.size()))]
pub fn move_tiles(
    board: &mut Board,
    direction: Direction,
    winning_value: u32,
) -> Result<MoveSummary, GameError> {
    let vector = direction.vector();
    let traversals = build_traversals(board.size(), vector);
    let mut summary = MoveSummary::default();

    prepare_tiles(board);

    for &x in &traversals.xs {
        for &y in &traversals.ys {
            let pos = Position::new(x, y);
            let Some(value) = board.cell_content(pos)?.map(Tile::value) else {
                continue;
            };

            let FarthestPosition { farthest, next } = find_farthest_position(board, pos, vector);
            let partner = board
                .probe(next)
                .filter(|other| other.value() == value && other.merged_from().is_none())
                .map(Tile::position);

            match partner {
                Some(target) => {
                    let mut moving = take_tile(board, pos)?;
                    let stationary = take_tile(board, target)?;
                    moving.update_position(target);

                    let merged = Tile::merged(&moving, &stationary)?;
                    let merged_value = merged.value();
                    board.insert_tile(merged)?;

                    summary.score_delta = summary
                        .score_delta
                        .checked_add(merged_value)
                        .ok_or_else(|| GameError::new(GameErrorKind::ScoreOverflow))?;
                    summary.merges += 1;
                    summary.moved = true;
                    if merged_value == winning_value {
                        summary.won = true;
                    }
                    debug!(from = %pos, into = %target, value = merged_value, "Merged tiles");
                }
                None if farthest != pos => {
                    board.move_tile(pos, farthest)?;
                    summary.moved = true;
                }
                None => {}
            }
        }
    }

    debug!(
        moved = summary.moved,
        merges = summary.merges,
        score_delta = summary.score_delta,
        "Move applied"
    );
    Ok(summary)
}

#[track_caller]
fn take_tile(board: &mut Board, pos: Position) -> Result<Tile, GameError> {
    board.remove_tile(pos)?.ok_or_else(|| {
        GameError::new(GameErrorKind::InvariantViolation(format!(
            "expected a tile at {}",
            pos
        )))
    })
}
