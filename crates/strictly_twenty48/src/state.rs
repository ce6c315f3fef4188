//! Game state: board, score and terminal status.

use crate::action::{Direction, MoveOutcome};
use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{GameError, GameErrorKind};
use crate::rules;
use crate::spawner::RandomSpawner;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Where a game stands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum GameStatus {
    /// Moves are accepted.
    #[default]
    Playing,
    /// A merge produced the winning value.
    Won,
    /// The board is full and no adjacent pair can merge.
    Lost,
}

impl GameStatus {
    /// Returns true for `Won` and `Lost`; both are absorbing.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Complete state of one game.
///
/// Owned by a single caller; every move is applied atomically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    score: u64,
    status: GameStatus,
    moves: u64,
}

impl GameState {
    /// Starts a game: an empty board with `start_tiles` spawned tiles.
    ///
    /// # Errors
    ///
    /// `Config` if the configuration does not validate.
    #[instrument(skip(rng))]
    pub fn new_game<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self, GameError> {
        config
            .validate()
            .map_err(|e| GameError::new(GameErrorKind::Config(e)))?;

        let spawner = RandomSpawner::new(*config.four_probability());
        let mut board = Board::new(*config.size());
        for _ in 0..*config.start_tiles() {
            spawner.spawn(&mut board, rng)?;
        }

        info!(size = config.size(), tiles = board.tile_count(), "New game");
        Ok(Self {
            config,
            board,
            score: 0,
            status: GameStatus::Playing,
            moves: 0,
        })
    }

    /// Wraps an existing board in a fresh, in-progress game.
    ///
    /// # Errors
    ///
    /// `InvalidBoard` if the board size differs from the configured size.
    #[instrument(skip(board))]
    pub fn from_board(config: GameConfig, board: Board) -> Result<Self, GameError> {
        if board.size() != *config.size() {
            return Err(GameError::new(GameErrorKind::InvalidBoard(format!(
                "board size {} does not match configured size {}",
                board.size(),
                config.size()
            ))));
        }
        Ok(Self {
            config,
            board,
            score: 0,
            status: GameStatus::Playing,
            moves: 0,
        })
    }

    pub(crate) fn from_parts(
        config: GameConfig,
        board: Board,
        score: u64,
        status: GameStatus,
    ) -> Self {
        Self {
            config,
            board,
            score,
            status,
            moves: 0,
        }
    }

    /// Discards board and score and starts over with the same configuration.
    #[instrument(skip(self, rng), fields(score = self.score))]
    pub fn restart<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Self, GameError> {
        info!("Restarting game");
        Self::new_game(self.config, rng)
    }

    /// Slides the board toward `direction`.
    ///
    /// When at least one tile moves, one tile is spawned and the status is
    /// re-evaluated. When nothing moves, or the game is already over, the
    /// state is left untouched and the outcome reports `moved == false`.
    ///
    /// # Errors
    ///
    /// Only on a broken internal invariant; the state is unchanged in that case.
    #[instrument(skip(self, rng), fields(score = self.score, status = %self.status))]
    pub fn apply_move<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> Result<MoveOutcome, GameError> {
        if self.status.is_terminal() {
            debug!("Ignoring move on finished game");
            return Ok(MoveOutcome::unchanged(self.status));
        }

        #[cfg(debug_assertions)]
        {
            use crate::contracts::{Contract, MoveContract};
            MoveContract::pre(&self.board, &direction)?;
        }

        let mut next = self.board.clone();
        let summary = rules::move_tiles(&mut next, direction, *self.config.winning_value())?;
        if !summary.moved {
            debug!("Nothing moved");
            return Ok(MoveOutcome::unchanged(self.status));
        }

        debug_assert!(next.cells_available(), "a successful move leaves a free cell");
        let spawned = self.spawner().spawn(&mut next, rng)?;

        let status = if summary.won {
            GameStatus::Won
        } else if !rules::moves_available(&next) {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        };

        let outcome = MoveOutcome {
            moved: true,
            score_delta: summary.score_delta,
            won: summary.won,
            merges: summary.merges,
            spawned: Some(spawned),
            status,
        };

        #[cfg(debug_assertions)]
        {
            use crate::contracts::{Contract, MoveContract};
            MoveContract::post(&self.board, &next, &outcome)?;
        }

        self.board = next;
        self.score += u64::from(summary.score_delta);
        self.status = status;
        self.moves += 1;

        match status {
            GameStatus::Won => info!(score = self.score, moves = self.moves, "Game won"),
            GameStatus::Lost => info!(score = self.score, moves = self.moves, "Game lost"),
            GameStatus::Playing => {}
        }
        Ok(outcome)
    }

    /// Returns true unless the board is full with no adjacent equal pair.
    pub fn moves_available(&self) -> bool {
        rules::moves_available(&self.board)
    }

    /// Directions that would change the board right now.
    pub fn legal_directions(&self) -> Vec<Direction> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        rules::legal_directions(&self.board)
    }

    fn spawner(&self) -> RandomSpawner {
        RandomSpawner::new(*self.config.four_probability())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the score.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of successful moves since the game started.
    pub fn moves(&self) -> u64 {
        self.moves
    }
}
