use thiserror::Error;

use crate::{Coords, GridInt};

/// Reasons a game cannot be set up. Gameplay endings are `GameStatus` values, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    InvalidGridSize { width: GridInt, height: GridInt },
    #[error("snake must have at least one cell")]
    EmptySnake,
    #[error("cell {0:?} is outside the grid")]
    CellOutOfBounds(Coords),
    #[error("snake body is not contiguous at segment {index}")]
    NotContiguous { index: usize },
    #[error("snake body occupies cell {0:?} more than once")]
    SelfOverlap(Coords),
    #[error("initial heading points back into the snake's neck")]
    ReverseHeading,
    #[error("initial heading leaves the grid at {0:?} with wall collision enabled")]
    HeadingLeavesGrid(Coords),
    #[error("no free cell left for food")]
    NoRoomForFood,
    #[error("cell {0:?} is occupied by the snake")]
    CellOccupied(Coords),
}
