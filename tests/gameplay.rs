use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use snake::{Coords, Direction, GameState, GameStatus, Grid, Modes, MoveResult, Snake, SCORE_PER_FOOD};

fn grid_5x5() -> Grid {
    Grid::new(5, 5).unwrap()
}

fn body_of(state: &GameState) -> Vec<Coords> {
    state.snake().body().iter().copied().collect()
}

#[test]
fn wall_collision_ends_the_game() {
    let modes = Modes { wall_collision_enabled: true, ..Modes::easy() };
    let snake = Snake::from_cells(vec![(4, 2), (3, 2)], Direction::Up);
    let mut state = GameState::with_seed(grid_5x5(), snake, modes, 1).unwrap();
    state.set_direction(Direction::Right);
    let before = body_of(&state);

    assert_eq!(state.tick(), MoveResult::Crashed(GameStatus::LostByWallCollision));
    assert_eq!(state.status(), GameStatus::LostByWallCollision);
    assert_eq!(body_of(&state), before);
}

#[test]
fn no_walls_wraps_around() {
    let snake = Snake::new((4, 2), 2, Direction::Right);
    let mut state = GameState::with_seed(grid_5x5(), snake, Modes::easy(), 1).unwrap();
    state.place_food((0, 0)).unwrap();

    state.tick();
    assert_eq!(state.snake().head(), (0, 2));
    assert_eq!(state.status(), GameStatus::Running);
}

#[test]
fn eating_grows_and_scores() {
    let snake = Snake::new((1, 2), 1, Direction::Right);
    let mut state = GameState::with_seed(grid_5x5(), snake, Modes::classic(), 11).unwrap();
    state.place_food((2, 2)).unwrap();

    state.tick();
    assert_eq!(state.snake().head(), (2, 2));
    assert_eq!(state.snake().len(), 2);
    assert_eq!(state.score(), SCORE_PER_FOOD);
    let food = state.food().unwrap();
    assert!(!state.snake().contains(food));
}

#[test]
fn self_collision_counts_only_occupied_cells() {
    let modes = Modes { body_collision_enabled: true, ..Modes::easy() };
    let snake = Snake::from_cells(vec![(2, 2), (2, 1), (2, 0)], Direction::Down);
    let mut state = GameState::with_seed(grid_5x5(), snake, modes, 1).unwrap();
    state.place_food((0, 4)).unwrap();

    // Loop round: (2, 1) was vacated by the tail two ticks ago
    state.set_direction(Direction::Right);
    state.tick();
    state.set_direction(Direction::Up);
    state.tick();
    assert_eq!(body_of(&state), vec![(3, 1), (3, 2), (2, 2)]);
    state.set_direction(Direction::Left);
    assert_eq!(state.tick(), MoveResult::Moved { new_head: (2, 1), old_head: (3, 1), old_tail: Some((2, 2)) });

    // A longer snake still covers (2, 1) when turning up into it
    let modes = Modes { body_collision_enabled: true, ..Modes::easy() };
    let snake = Snake::from_cells(vec![(2, 2), (3, 2), (3, 1), (2, 1), (1, 1)], Direction::Left);
    let mut state = GameState::with_seed(grid_5x5(), snake, modes, 1).unwrap();
    state.place_food((0, 4)).unwrap();
    state.set_direction(Direction::Up);

    assert_eq!(state.tick(), MoveResult::Crashed(GameStatus::LostBySelfCollision));
    assert_eq!(state.status(), GameStatus::LostBySelfCollision);
}

#[test]
fn reverse_direction_is_ignored() {
    let snake = Snake::new((2, 2), 2, Direction::Right);
    let mut state = GameState::with_seed(grid_5x5(), snake, Modes::easy(), 1).unwrap();
    state.place_food((0, 4)).unwrap();

    state.set_direction(Direction::Left);
    state.tick();
    assert_eq!(state.snake().head(), (3, 2));
    assert_eq!(state.snake().heading(), Direction::Right);
}

#[test]
fn single_cell_snake_may_reverse() {
    let snake = Snake::new((2, 2), 1, Direction::Right);
    let mut state = GameState::with_seed(grid_5x5(), snake, Modes::classic(), 1).unwrap();
    state.place_food((0, 4)).unwrap();

    state.set_direction(Direction::Left);
    state.tick();
    assert_eq!(state.snake().head(), (1, 2));
}

/// Drives a game with random steering and checks the invariants after every tick.
fn random_walk(modes: Modes, seed: u64) {
    let grid = Grid::new(8, 6).unwrap();
    let mut state = GameState::with_seed(grid, Snake::coiled(grid.center(), 3), modes, seed).unwrap();
    let mut steering = StdRng::seed_from_u64(seed ^ 0x5eed);
    let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    for _ in 0..2_000 {
        if !state.status().is_running() {
            break;
        }

        if steering.gen_bool(0.3) {
            state.set_direction(directions[steering.gen_range(0..directions.len())]);
        }

        let (score, len) = (state.score(), state.snake().len());
        let res = state.tick();

        let grew = matches!(res, MoveResult::Moved { old_tail: None, .. });
        match res {
            MoveResult::Moved { .. } if grew => {
                assert_eq!(state.score(), score + SCORE_PER_FOOD);
                assert_eq!(state.snake().len(), len + 1);
            }
            _ => {
                assert_eq!(state.score(), score);
                assert_eq!(state.snake().len(), len);
            }
        }

        for &cell in state.snake().body() {
            assert!(grid.contains(cell));
        }
        if let Some(food) = state.food() {
            assert!(!state.snake().contains(food));
        }
        if modes.body_collision_enabled && state.status().is_running() {
            let unique: HashSet<&Coords> = state.snake().body().iter().collect();
            assert_eq!(unique.len(), state.snake().len());
        }
    }
}

#[test]
fn invariants_hold_in_easy_mode() {
    for seed in 0..20 {
        random_walk(Modes::easy(), seed);
    }
}

#[test]
fn invariants_hold_in_classic_mode() {
    for seed in 0..20 {
        random_walk(Modes::classic(), seed);
    }
}

#[test]
fn invariants_hold_with_body_collision_and_wrapping() {
    let modes = Modes { body_collision_enabled: true, ..Modes::easy() };
    for seed in 0..20 {
        random_walk(modes, seed);
    }
}
