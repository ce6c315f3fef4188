//! Contract-based validation for moves.
//!
//! Contracts state what must be true before a move is applied and what the
//! move must have preserved afterwards: {P} move {Q}.

use crate::action::{Direction, MoveOutcome};
use crate::board::Board;
use crate::error::{GameError, GameErrorKind};
use crate::invariants::{BoardInvariants, InvariantSet, InvariantViolation};
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A, O> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions given the states around the transition and its outcome.
    fn post(before: &S, after: &S, outcome: &O) -> Result<(), GameError>;
}

/// Postcondition: tile values are conserved by sliding and merging.
///
/// Merging two `v` tiles into one `2v` tile leaves the value sum unchanged, so
/// the only change in the sum is the spawned tile, and every merge removes
/// exactly one tile.
pub struct MassConserved;

impl MassConserved {
    /// Returns true if the value sum and tile count changed as the outcome claims.
    #[instrument(skip_all)]
    pub fn holds(before: &Board, after: &Board, outcome: &MoveOutcome) -> bool {
        let spawned_value = outcome.spawned.as_ref().map_or(0, |t| u64::from(t.value()));
        let spawned_count = usize::from(outcome.spawned.is_some());

        let sum_ok = after.value_sum() == before.value_sum() + spawned_value;
        let count_ok = after.tile_count() + outcome.merges == before.tile_count() + spawned_count;

        if !(sum_ok && count_ok) {
            warn!(
                before_sum = before.value_sum(),
                after_sum = after.value_sum(),
                before_count = before.tile_count(),
                after_count = after.tile_count(),
                merges = outcome.merges,
                "Mass conservation violated"
            );
        }
        sum_ok && count_ok
    }
}

/// Postcondition: no tile merged twice in one move.
///
/// Each merge leaves exactly one annotated tile behind and adds that tile's
/// value to the score. A chained merge would consume an annotated tile and
/// break both counts.
pub struct MergedOnce;

impl MergedOnce {
    /// Returns true if the annotated tiles account for every merge and every point.
    #[instrument(skip_all)]
    pub fn holds(after: &Board, outcome: &MoveOutcome) -> bool {
        let merged: Vec<_> = after.tiles().filter(|t| t.merged_from().is_some()).collect();
        let merged_points: u64 = merged.iter().map(|t| u64::from(t.value())).sum();

        let valid = merged.len() == outcome.merges
            && merged_points == u64::from(outcome.score_delta);
        if !valid {
            warn!(
                annotated = merged.len(),
                merges = outcome.merges,
                merged_points,
                score_delta = outcome.score_delta,
                "Merge-once violated"
            );
        }
        valid
    }
}

/// Contract for a single move on a board.
///
/// Preconditions:
/// - Board invariants hold
///
/// Postconditions:
/// - Board invariants still hold
/// - Nothing changed at all when nothing moved
/// - Mass is conserved
/// - No tile merged twice
pub struct MoveContract;

impl Contract<Board, Direction, MoveOutcome> for MoveContract {
    fn pre(board: &Board, _direction: &Direction) -> Result<(), GameError> {
        BoardInvariants::check_all(board).map_err(|v| violation("Precondition failed", &v))
    }

    fn post(before: &Board, after: &Board, outcome: &MoveOutcome) -> Result<(), GameError> {
        BoardInvariants::check_all(after).map_err(|v| violation("Postcondition failed", &v))?;

        if !outcome.moved {
            if before.rows() != after.rows() {
                return Err(GameError::new(GameErrorKind::InvariantViolation(
                    "Board changed although nothing moved".to_string(),
                )));
            }
            return Ok(());
        }

        if !MassConserved::holds(before, after, outcome) {
            return Err(GameError::new(GameErrorKind::InvariantViolation(
                "Tile values were not conserved".to_string(),
            )));
        }
        if !MergedOnce::holds(after, outcome) {
            return Err(GameError::new(GameErrorKind::InvariantViolation(
                "A tile merged more than once".to_string(),
            )));
        }
        Ok(())
    }
}

#[track_caller]
fn violation(context: &str, violations: &[InvariantViolation]) -> GameError {
    let descriptions = violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    GameError::new(GameErrorKind::InvariantViolation(format!(
        "{}: {}",
        context, descriptions
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::move_tiles;
    use crate::state::GameStatus;

    fn outcome_for(before: &Board, direction: Direction) -> (Board, MoveOutcome) {
        let mut after = before.clone();
        let summary = move_tiles(&mut after, direction, 2048).unwrap();
        let outcome = MoveOutcome {
            moved: summary.moved,
            score_delta: summary.score_delta,
            won: summary.won,
            merges: summary.merges,
            spawned: None,
            status: GameStatus::Playing,
        };
        (after, outcome)
    }

    #[test]
    fn test_precondition_holds_for_valid_board() {
        let board = Board::from_rows(&[[2, 4], [0, 8]]).unwrap();
        assert!(MoveContract::pre(&board, &Direction::Left).is_ok());
    }

    #[test]
    fn test_postcondition_holds_after_merge() {
        let before = Board::from_rows(&[[2, 2, 2, 0], [4, 4, 0, 4], [0; 4], [0; 4]]).unwrap();
        let (after, outcome) = outcome_for(&before, Direction::Left);
        assert!(MoveContract::post(&before, &after, &outcome).is_ok());
    }

    #[test]
    fn test_postcondition_detects_inflated_score() {
        let before = Board::from_rows(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let (after, mut outcome) = outcome_for(&before, Direction::Left);
        outcome.score_delta += 4;
        let err = MoveContract::post(&before, &after, &outcome).unwrap_err();
        assert!(matches!(err.kind, GameErrorKind::InvariantViolation(_)));
    }

    #[test]
    fn test_postcondition_detects_lost_tile() {
        let before = Board::from_rows(&[[2, 0, 4, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let (mut after, outcome) = outcome_for(&before, Direction::Left);
        after.remove_tile(crate::Position::new(1, 0)).unwrap();
        assert!(!MassConserved::holds(&before, &after, &outcome));
        assert!(MoveContract::post(&before, &after, &outcome).is_err());
    }

    #[test]
    fn test_postcondition_detects_change_without_move() {
        let before = Board::from_rows(&[[2, 0], [0, 0]]).unwrap();
        let (mut after, outcome) = outcome_for(&before, Direction::Left);
        assert!(!outcome.moved);
        after
            .insert_tile(crate::Tile::new(crate::Position::new(1, 1), 2).unwrap())
            .unwrap();
        assert!(MoveContract::post(&before, &after, &outcome).is_err());
    }
}
