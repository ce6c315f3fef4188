//! Strictly Twenty48 - the 2048 move/merge rules engine
//!
//! Tiles carrying powers of two slide across a square board; equal neighbors
//! merge into a doubled tile and a new tile spawns after every move that
//! changed something.
//!
//! # Architecture
//!
//! - **Board**: owns the grid of tiles, bounds checks and empty-cell queries
//! - **Rules**: sliding/merging ([`rules::move_tiles`]) and terminal detection
//!   ([`rules::moves_available`])
//! - **Spawner**: random tile placement from an injected random source
//! - **State**: score and status around a board, with atomic moves
//! - **Contracts**: postconditions checked after every move in debug builds
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use strictly_twenty48::{Direction, GameConfig, GameState};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = GameState::new_game(GameConfig::default(), &mut rng)?;
//! let outcome = game.apply_move(Direction::Left, &mut rng)?;
//! println!("moved: {}, score: {}", outcome.moved, game.score());
//! # Ok::<(), strictly_twenty48::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod config;
pub mod contracts;
mod error;
pub mod invariants;
mod position;
pub mod rules;
mod session;
mod snapshot;
mod spawner;
mod state;
mod tile;

pub use action::{Direction, MoveOutcome};
pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use error::{GameError, GameErrorKind};
pub use position::{Position, Vector};
pub use session::Session;
pub use snapshot::Snapshot;
pub use spawner::{DEFAULT_FOUR_PROBABILITY, RandomSpawner};
pub use state::{GameState, GameStatus};
pub use tile::{Tile, TileSnapshot, is_tile_value};
