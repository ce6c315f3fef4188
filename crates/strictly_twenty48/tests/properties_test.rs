//! Property checks over many seeded random games.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strictly_twenty48::invariants::{BoardInvariants, InvariantSet};
use strictly_twenty48::{Direction, GameConfig, GameState, GameStatus, is_tile_value};

const GAMES: u64 = 40;
const MAX_MOVES: usize = 400;

/// Plays random moves, handing each (before, after, outcome) to `check`.
fn play_random<F>(config: GameConfig, mut check: F)
where
    F: FnMut(&GameState, &GameState, &strictly_twenty48::MoveOutcome),
{
    for seed in 0..GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = GameState::new_game(config.clone(), &mut rng).unwrap();
        for _ in 0..MAX_MOVES {
            let direction = Direction::ALL[rng.gen_range(0..4)];
            let before = game.clone();
            let outcome = game.apply_move(direction, &mut rng).unwrap();
            check(&before, &game, &outcome);
            if game.status().is_terminal() {
                break;
            }
        }
    }
}

#[test]
fn test_values_stay_powers_of_two() {
    play_random(GameConfig::default(), |_, after, _| {
        assert!(after.board().tiles().all(|t| is_tile_value(t.value())));
        assert!(BoardInvariants::check_all(after.board()).is_ok());
    });
}

#[test]
fn test_mass_conservation() {
    play_random(GameConfig::default(), |before, after, outcome| {
        if !outcome.moved {
            return;
        }
        let spawned = outcome.spawned.as_ref().unwrap();
        assert_eq!(
            after.board().value_sum(),
            before.board().value_sum() + u64::from(spawned.value())
        );
        assert_eq!(
            after.board().tile_count(),
            before.board().tile_count() - outcome.merges + 1
        );
        assert_eq!(after.score(), before.score() + u64::from(outcome.score_delta));
    });
}

#[test]
fn test_merge_once() {
    play_random(GameConfig::default(), |_, after, outcome| {
        let merged: Vec<_> = after
            .board()
            .tiles()
            .filter(|t| t.merged_from().is_some())
            .collect();
        if outcome.moved {
            assert_eq!(merged.len(), outcome.merges);
            let points: u32 = merged.iter().map(|t| t.value()).sum();
            assert_eq!(points, outcome.score_delta);
        }
    });
}

#[test]
fn test_noop_is_idempotent() {
    play_random(GameConfig::default(), |before, after, outcome| {
        if !outcome.moved {
            assert_eq!(before, after);
            assert_eq!(outcome.score_delta, 0);
            assert!(outcome.spawned.is_none());
        }
    });
}

#[test]
fn test_terminal_states_are_absorbing() {
    play_random(GameConfig::new(3, 2).with_winning_value(64), |before, after, _| {
        if before.status().is_terminal() {
            assert_eq!(before, after);
        }
    });

    // Keep hammering a finished game.
    let mut rng = StdRng::seed_from_u64(77);
    let config = GameConfig::new(2, 2).with_winning_value(4096);
    let mut game = GameState::new_game(config, &mut rng).unwrap();
    while !game.status().is_terminal() {
        let dir = Direction::ALL[rng.gen_range(0..4)];
        game.apply_move(dir, &mut rng).unwrap();
    }
    assert_eq!(game.status(), GameStatus::Lost);
    let finished = game.clone();
    for dir in Direction::ALL {
        let outcome = game.apply_move(dir, &mut rng).unwrap();
        assert!(!outcome.moved);
    }
    assert_eq!(game, finished);
}

#[test]
fn test_lost_iff_no_moves_available() {
    play_random(GameConfig::new(3, 2), |_, after, outcome| {
        if outcome.moved {
            let dead = !after.moves_available();
            assert_eq!(after.status() == GameStatus::Lost, dead && !outcome.won);
            assert_eq!(after.legal_directions().is_empty(), after.status().is_terminal() || dead);
        }
    });
}

#[test]
fn test_score_never_decreases() {
    play_random(GameConfig::default(), |before, after, _| {
        assert!(after.score() >= before.score());
    });
}
