use std::collections::{HashSet, VecDeque};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Modes;
use crate::error::EngineError;
use crate::grid::Grid;
use crate::snake::{Direction, Snake};
use crate::Coords;
use GameStatus::*;

pub const SCORE_PER_FOOD: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    LostBySelfCollision,
    LostByWallCollision,
    /// The snake filled every cell of the grid.
    Won,
}

impl GameStatus {
    pub fn is_running(self) -> bool {
        self == Running
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// `old_tail` is `None` when the snake grew this tick.
    Moved { new_head: Coords, old_head: Coords, old_tail: Option<Coords> },
    /// The tick ended the game; nothing but the status changed.
    Crashed(GameStatus),
    /// The game was already over.
    Idle,
}

/// Read-only view handed to renderers after each tick.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: Grid,
    pub body: &'a VecDeque<Coords>,
    pub heading: Direction,
    pub food: Option<Coords>,
    pub score: u32,
    pub status: GameStatus,
}

/// The whole game. Advances one cell per `tick()` and freezes once the status
/// leaves `Running`, until `reset()`.
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    grid: Grid,
    modes: Modes,
    initial_snake: Snake,
    snake: Snake,
    food: Option<Coords>,
    score: u32,
    status: GameStatus,
    rng: R,
}

impl GameState<StdRng> {
    pub fn with_seed(grid: Grid, snake: Snake, modes: Modes, seed: u64) -> Result<Self, EngineError> {
        GameState::new(grid, snake, modes, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    pub fn new(grid: Grid, snake: Snake, modes: Modes, rng: R) -> Result<Self, EngineError> {
        validate_snake(&grid, &snake, &modes)?;

        let mut state = GameState {
            grid,
            modes,
            initial_snake: snake.clone(),
            snake,
            food: None,
            score: 0,
            status: Running,
            rng,
        };
        state.food = Some(state.spawn_food().ok_or(EngineError::NoRoomForFood)?);

        Ok(state)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Coords> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            body: self.snake.body(),
            heading: self.snake.heading(),
            food: self.food,
            score: self.score,
            status: self.status,
        }
    }

    /// Buffers the heading for the next tick. Only the last accepted call before
    /// a tick counts; a reversal onto the neck is dropped.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.status.is_running() {
            return;
        }

        if !self.snake.set_direction(direction) {
            debug!("ignoring reverse direction {:?}", direction);
        }
    }

    pub fn tick(&mut self) -> MoveResult {
        if !self.status.is_running() {
            return MoveResult::Idle;
        }

        self.snake.apply_buffered();
        let mut next_head = self.snake.next_head();

        if !self.grid.contains(next_head) {
            if self.modes.wall_collision_enabled {
                info!("hit the wall heading to {:?}, score {}", next_head, self.score);
                self.status = LostByWallCollision;
                return MoveResult::Crashed(self.status);
            }
            next_head = self.grid.wrap(next_head);
        }

        let grows = self.food == Some(next_head);

        if self.modes.body_collision_enabled && self.bites_itself(next_head, grows) {
            info!("ran into own body at {:?}, score {}", next_head, self.score);
            self.status = LostBySelfCollision;
            return MoveResult::Crashed(self.status);
        }

        let old_head = self.snake.head();
        let old_tail = self.snake.advance(next_head, grows);

        if grows {
            self.score += SCORE_PER_FOOD;
            info!("ate food at {:?}, score {}, length {}", next_head, self.score, self.snake.len());

            self.food = self.spawn_food();
            if self.food.is_none() {
                info!("grid is full, score {}", self.score);
                self.status = Won;
            }
        }

        MoveResult::Moved { new_head: next_head, old_head, old_tail }
    }

    /// Moves the food onto a chosen free cell.
    pub fn place_food(&mut self, cell: Coords) -> Result<(), EngineError> {
        if !self.grid.contains(cell) {
            return Err(EngineError::CellOutOfBounds(cell));
        }
        if self.snake.contains(cell) {
            return Err(EngineError::CellOccupied(cell));
        }

        self.food = Some(cell);
        Ok(())
    }

    /// Back to the starting snake with a fresh apple. The RNG stream carries on.
    pub fn reset(&mut self) {
        self.snake = self.initial_snake.clone();
        self.score = 0;
        self.status = Running;
        // The initial snake left room for food when the game was built
        self.food = self.spawn_food();
        info!("game reset");
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Whether `next_head` lands on the body, not counting the tail that moves away
    /// this tick unless the snake is growing.
    fn bites_itself(&self, next_head: Coords, grows: bool) -> bool {
        let body = self.snake.body();
        let checked = if grows { body.len() } else { body.len() - 1 };
        body.iter().take(checked).any(|&pos| pos == next_head)
    }

    fn spawn_food(&mut self) -> Option<Coords> {
        let occupied: HashSet<Coords> = self.snake.body().iter().copied().collect();
        let free = self.grid.area().saturating_sub(occupied.len());
        if free == 0 {
            return None;
        }

        // Walk to the chosen free cell instead of collecting them all
        let pick = self.rng.gen_range(0..free);
        self.grid.cells().filter(|pos| !occupied.contains(pos)).nth(pick)
    }
}

fn validate_snake(grid: &Grid, snake: &Snake, modes: &Modes) -> Result<(), EngineError> {
    if snake.is_empty() {
        return Err(EngineError::EmptySnake);
    }

    let body = snake.body();
    let mut seen = HashSet::with_capacity(body.len());
    for (index, &pos) in body.iter().enumerate() {
        if !grid.contains(pos) {
            return Err(EngineError::CellOutOfBounds(pos));
        }
        if !seen.insert(pos) {
            return Err(EngineError::SelfOverlap(pos));
        }
        if index > 0 && !grid.are_adjacent(body[index - 1], pos, !modes.wall_collision_enabled) {
            return Err(EngineError::NotContiguous { index });
        }
    }

    let next_head = snake.next_head();
    if !grid.contains(next_head) && modes.wall_collision_enabled {
        return Err(EngineError::HeadingLeavesGrid(next_head));
    }
    if body.len() > 1 && grid.wrap(next_head) == body[1] {
        return Err(EngineError::ReverseHeading);
    }

    Ok(())
}
