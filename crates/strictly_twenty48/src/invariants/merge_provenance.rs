//! Merge provenance invariant: a merged tile is the sum of its two sources.

use super::Invariant;
use crate::board::Board;

/// Invariant: every merged tile has two equal sources of half its value, and
/// both sources ended on the merged tile's cell.
pub struct MergeProvenanceInvariant;

impl Invariant<Board> for MergeProvenanceInvariant {
    fn holds(board: &Board) -> bool {
        board.tiles().all(|tile| match tile.merged_from() {
            Some(sources) => sources
                .iter()
                .all(|s| s.value * 2 == tile.value() && s.position == tile.position()),
            None => true,
        })
    }

    fn description() -> &'static str {
        "Merged tiles are built from two equal halves on their cell"
    }
}
