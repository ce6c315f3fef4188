//! Random tile spawning.
//!
//! The random source is always passed in, so a seeded generator reproduces a
//! game exactly.

use crate::board::Board;
use crate::error::{GameError, GameErrorKind};
use crate::tile::Tile;
use rand::Rng;
use tracing::{debug, instrument};

/// Chance that a spawned tile is a 4 rather than a 2.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// Places new tiles on random empty cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomSpawner {
    four_probability: f64,
}

impl RandomSpawner {
    /// Creates a spawner that yields a 4 with probability `four_probability`.
    ///
    /// Out-of-range probabilities are clamped to `[0, 1]`; NaN counts as 0.
    pub fn new(four_probability: f64) -> Self {
        let four_probability = if four_probability.is_nan() {
            0.0
        } else {
            four_probability.clamp(0.0, 1.0)
        };
        Self { four_probability }
    }

    /// Picks a tile value: 4 with the configured probability, else 2.
    pub fn pick_value<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if rng.gen_bool(self.four_probability) { 4 } else { 2 }
    }

    /// Spawns one tile on a uniformly chosen empty cell and returns a copy.
    ///
    /// # Errors
    ///
    /// `SpawnOnFullBoard` if no cell is empty.
    #[instrument(skip(self, board, rng), fields(size = board.size()))]
    pub fn spawn<R: Rng + ?Sized>(&self, board: &mut Board, rng: &mut R) -> Result<Tile, GameError> {
        let available = board.available_positions();
        if available.is_empty() {
            return Err(GameError::new(GameErrorKind::SpawnOnFullBoard));
        }

        let position = available[rng.gen_range(0..available.len())];
        let value = self.pick_value(rng);
        let tile = Tile::new(position, value)?;
        board.insert_tile(tile.clone())?;

        debug!(%position, value, "Spawned tile");
        Ok(tile)
    }
}

impl Default for RandomSpawner {
    fn default() -> Self {
        Self::new(DEFAULT_FOUR_PROBABILITY)
    }
}
