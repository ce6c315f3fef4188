//! The square grid of tiles.

use crate::error::{GameError, GameErrorKind};
use crate::position::Position;
use crate::tile::Tile;
use serde::Serialize;
use tracing::instrument;

/// An `N x N` board. Each cell holds at most one [`Tile`].
///
/// The board owns its tiles exclusively; moving a tile means taking it out of
/// one cell and putting it into another. Cells are stored in row-major order.
///
/// Boards serialize for display but never deserialize; persisted games come
/// back through [`GameState::restore`](crate::GameState::restore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Board {
    /// Creates an empty board of edge `size`.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Builds a board from rows of values, `0` meaning empty.
    ///
    /// Rows run top to bottom, values within a row left to right.
    #[instrument(skip(rows))]
    pub fn from_rows<const N: usize>(rows: &[[u32; N]]) -> Result<Self, GameError> {
        if rows.len() != N {
            return Err(GameError::new(GameErrorKind::InvalidBoard(format!(
                "{} rows of {} cells is not square",
                rows.len(),
                N
            ))));
        }
        let mut board = Self::new(N);
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value != 0 {
                    board.insert_tile(Tile::new(Position::new(x, y), value)?)?;
                }
            }
        }
        Ok(board)
    }

    /// Edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if `pos` lies on the board.
    pub fn within_bounds(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    #[track_caller]
    fn index(&self, pos: Position) -> Result<usize, GameError> {
        if self.within_bounds(pos) {
            Ok(pos.index(self.size))
        } else {
            Err(GameError::new(GameErrorKind::OutOfBounds {
                position: pos,
                size: self.size,
            }))
        }
    }

    /// Returns the tile at `pos`.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `pos` is not on the board. Use [`Board::probe`] when
    /// stepping past the edge is expected.
    #[track_caller]
    pub fn cell_content(&self, pos: Position) -> Result<Option<&Tile>, GameError> {
        let idx = self.index(pos)?;
        Ok(self.cells[idx].as_ref())
    }

    /// Looks at a cell that may lie off the board; off-board reads as empty.
    pub fn probe(&self, pos: Option<Position>) -> Option<&Tile> {
        let pos = pos.filter(|p| self.within_bounds(*p))?;
        self.cells[pos.index(self.size)].as_ref()
    }

    /// Returns true if `pos` is on the board and empty.
    pub fn cell_available(&self, pos: Position) -> bool {
        self.within_bounds(pos) && self.cells[pos.index(self.size)].is_none()
    }

    /// Places `tile` at its own position.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` for an off-board position, `CellOccupied` if the cell
    /// already holds a tile.
    #[track_caller]
    pub fn insert_tile(&mut self, tile: Tile) -> Result<(), GameError> {
        let pos = tile.position();
        let idx = self.index(pos)?;
        if self.cells[idx].is_some() {
            return Err(GameError::new(GameErrorKind::CellOccupied(pos)));
        }
        self.cells[idx] = Some(tile);
        Ok(())
    }

    /// Clears the cell at `pos`, handing back whatever tile was there.
    #[track_caller]
    pub fn remove_tile(&mut self, pos: Position) -> Result<Option<Tile>, GameError> {
        let idx = self.index(pos)?;
        Ok(self.cells[idx].take())
    }

    /// Moves the tile at `from` to the empty cell `to`.
    #[track_caller]
    pub(crate) fn move_tile(&mut self, from: Position, to: Position) -> Result<(), GameError> {
        if from == to {
            return Ok(());
        }
        let to_idx = self.index(to)?;
        if self.cells[to_idx].is_some() {
            return Err(GameError::new(GameErrorKind::CellOccupied(to)));
        }
        if let Some(mut tile) = self.remove_tile(from)? {
            tile.update_position(to);
            self.cells[to_idx] = Some(tile);
        }
        Ok(())
    }

    /// All empty cells in row-major order.
    pub fn available_positions(&self) -> Vec<Position> {
        self.cells()
            .filter(|(_, tile)| tile.is_none())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Returns true if at least one cell is empty.
    pub fn cells_available(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Option<&Tile>)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Position::new(i % size, i / size), cell.as_ref()))
    }

    /// Calls `visit(x, y, tile)` for every cell in row-major order.
    pub fn each_cell<F>(&self, mut visit: F)
    where
        F: FnMut(usize, usize, Option<&Tile>),
    {
        for (pos, tile) in self.cells() {
            visit(pos.x, pos.y, tile);
        }
    }

    /// Iterates the tiles on the board in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> + '_ {
        self.cells.iter_mut().flatten()
    }

    /// Number of tiles on the board.
    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    /// Sum of all tile values.
    pub fn value_sum(&self) -> u64 {
        self.tiles().map(|t| u64::from(t.value())).sum()
    }

    /// Largest tile value, or 0 on an empty board.
    pub fn max_value(&self) -> u32 {
        self.tiles().map(Tile::value).max().unwrap_or(0)
    }

    /// Tile values as rows, `0` for empty cells.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        (0..self.size)
            .map(|y| {
                (0..self.size)
                    .map(|x| {
                        self.cells[Position::new(x, y).index(self.size)]
                            .as_ref()
                            .map_or(0, Tile::value)
                    })
                    .collect()
            })
            .collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let border = format!("+{}", "------+".repeat(self.size));
        writeln!(f, "{}", border)?;
        for row in self.rows() {
            write!(f, "|")?;
            for value in row {
                if value == 0 {
                    write!(f, "      |")?;
                } else {
                    write!(f, "{:^6}|", value)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{}", border)?;
        }
        Ok(())
    }
}
