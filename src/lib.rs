pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod snake;

pub type GridInt = i32;
pub type Coords = (GridInt, GridInt);

pub use config::{Cli, GameConfig, Modes};
pub use engine::{GameState, GameStatus, MoveResult, Snapshot, SCORE_PER_FOOD};
pub use error::EngineError;
pub use grid::Grid;
pub use snake::{Direction, Snake};
