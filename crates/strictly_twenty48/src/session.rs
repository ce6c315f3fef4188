//! A game paired with its own seeded random source.

use crate::action::{Direction, MoveOutcome};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::snapshot::Snapshot;
use crate::state::GameState;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

/// One player's game plus the generator that feeds its spawns.
///
/// The same config, seed and move list always produce the same game.
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    rng: StdRng,
    seed: u64,
}

impl Session {
    /// Starts a game seeded with `seed`.
    #[instrument]
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = GameState::new_game(config, &mut rng)?;
        info!(seed, "Session started");
        Ok(Self { state, rng, seed })
    }

    /// Replays `moves` from a fresh game seeded with `seed`.
    #[instrument(skip(moves), fields(move_count = moves.len()))]
    pub fn replay(config: GameConfig, seed: u64, moves: &[Direction]) -> Result<Self, GameError> {
        let mut session = Self::new(config, seed)?;
        for &direction in moves {
            let outcome = session.apply_move(direction)?;
            if outcome.status.is_terminal() {
                debug!(%direction, status = %outcome.status, "Replay reached a finished game");
            }
        }
        Ok(session)
    }

    /// Applies one move, spawning from this session's generator.
    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveOutcome, GameError> {
        self.state.apply_move(direction, &mut self.rng)
    }

    /// Starts over with the same configuration.
    ///
    /// The generator is not reseeded, so the new game differs from the first.
    #[instrument(skip(self), fields(seed = self.seed))]
    pub fn restart(&mut self) -> Result<(), GameError> {
        let config = self.state.config().clone();
        self.state = GameState::new_game(config, &mut self.rng)?;
        Ok(())
    }

    /// Returns the game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Captures the current board, score and status.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// The seed this session started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
