use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::GameState;
use crate::error::EngineError;
use crate::grid::Grid;
use crate::snake::Snake;
use crate::GridInt;

pub const BASE_TICKS_PER_SECOND: u32 = 10;
pub const DEFAULT_GRID_SIZE: GridInt = 20;
/// Largest width or height the command line accepts.
pub const MAX_GRID_SIZE: GridInt = 1000;

/// Rule switches, fixed for the lifetime of a game. All off is "easy mode",
/// all on is "classic mode".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modes {
    pub wall_collision_enabled: bool,
    pub body_collision_enabled: bool,
    pub speed_increase_enabled: bool,
}

impl Modes {
    pub fn easy() -> Self {
        Modes::default()
    }

    pub fn classic() -> Self {
        Modes { wall_collision_enabled: true, body_collision_enabled: true, speed_increase_enabled: true }
    }

    /// Time between two ticks at the given score. Constant unless speed increase is on,
    /// in which case every point adds one tick per second.
    pub fn tick_interval(&self, score: u32) -> Duration {
        let rate = if self.speed_increase_enabled {
            BASE_TICKS_PER_SECOND.saturating_add(score)
        } else {
            BASE_TICKS_PER_SECOND
        };

        Duration::from_secs(1) / rate
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "snake", version, about = "The classic snake game, in your terminal")]
pub struct Cli {
    /// Die when hitting a wall instead of wrapping around
    #[arg(short, long)]
    pub wall: bool,

    /// Die when the snake runs into its own body
    #[arg(short, long)]
    pub body: bool,

    /// Speed up with every apple eaten
    #[arg(short, long)]
    pub speed: bool,

    /// Initial length of the snake
    #[arg(short = 'z', long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub size: u16,

    /// Grid width in cells
    #[arg(
        long,
        default_value_t = DEFAULT_GRID_SIZE,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(GridInt).range(1..=MAX_GRID_SIZE as i64),
    )]
    pub width: GridInt,

    /// Grid height in cells
    #[arg(
        long,
        default_value_t = DEFAULT_GRID_SIZE,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(GridInt).range(1..=MAX_GRID_SIZE as i64),
    )]
    pub height: GridInt,

    /// Seed for apple placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    /// Log debug events too
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn modes(&self) -> Modes {
        Modes {
            wall_collision_enabled: self.wall,
            body_collision_enabled: self.body,
            speed_increase_enabled: self.speed,
        }
    }
}

/// Everything needed to start (and restart) a game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub grid: Grid,
    pub snake: Snake,
    pub modes: Modes,
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, EngineError> {
        let grid = Grid::new(cli.width, cli.height)?;
        let snake = Snake::coiled(grid.center(), cli.size as usize);

        Ok(GameConfig { grid, snake, modes: cli.modes(), seed: cli.seed })
    }

    pub fn build(&self) -> Result<GameState<StdRng>, EngineError> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        GameState::new(self.grid, self.snake.clone(), self.modes, rng)
    }
}
