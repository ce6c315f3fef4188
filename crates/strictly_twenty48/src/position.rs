//! Grid coordinates and step vectors.

use serde::{Deserialize, Serialize};

/// A cell coordinate on the board, `0 <= x, y < size`.
///
/// `x` grows to the right, `y` grows downward, so `(0, 0)` is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl Position {
    /// Creates a position.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Takes one step along `vector`.
    ///
    /// Returns `None` when the step would leave the board through the top or
    /// left edge. The bottom and right edges depend on the board size and are
    /// checked by [`Board::within_bounds`](crate::Board::within_bounds).
    pub fn step(self, vector: Vector) -> Option<Position> {
        let x = self.x.checked_add_signed(isize::from(vector.dx))?;
        let y = self.y.checked_add_signed(isize::from(vector.dy))?;
        Some(Position { x, y })
    }

    /// Row-major index of this position on a board of edge `size`.
    pub(crate) fn index(self, size: usize) -> usize {
        self.y * size + self.x
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Per-step coordinate delta for a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    /// Column delta.
    pub dx: i8,
    /// Row delta.
    pub dy: i8,
}

impl Vector {
    /// Creates a vector.
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_right_and_down() {
        let pos = Position::new(1, 1);
        assert_eq!(pos.step(Vector::new(1, 0)), Some(Position::new(2, 1)));
        assert_eq!(pos.step(Vector::new(0, 1)), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_step_past_origin_edge() {
        let pos = Position::new(0, 0);
        assert_eq!(pos.step(Vector::new(-1, 0)), None);
        assert_eq!(pos.step(Vector::new(0, -1)), None);
    }

    #[test]
    fn test_row_major_index() {
        assert_eq!(Position::new(0, 0).index(4), 0);
        assert_eq!(Position::new(3, 0).index(4), 3);
        assert_eq!(Position::new(0, 1).index(4), 4);
        assert_eq!(Position::new(3, 3).index(4), 15);
    }
}
