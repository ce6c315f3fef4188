//! Game rules for 2048.
//!
//! Pure functions over a [`Board`](crate::Board): sliding and merging live in
//! [`slide`], terminal-state detection in [`terminal`]. Rules are kept apart
//! from board storage so contracts can reason about them separately.

pub mod slide;
pub mod terminal;

pub use slide::{
    FarthestPosition, MoveSummary, Traversals, build_traversals, find_farthest_position,
    move_tiles, prepare_tiles,
};
pub use terminal::{can_move, legal_directions, moves_available, tile_matches_available};
