use std::collections::VecDeque;

use crate::{Coords, GridInt};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn step(self, pos: Coords) -> Coords {
        let (dx, dy) = self.delta();
        (pos.0 + dx, pos.1 + dy)
    }

    /// How the head is drawn when moving this way.
    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// Body cells are stored head first. The snake knows nothing about the grid;
/// bounds and wrapping are the engine's business.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
    heading: Direction,
    buffered: Option<Direction>,
}

impl Snake {
    /// A straight snake of `size` cells with its head at `head`, the rest trailing behind it.
    pub fn new(head: Coords, size: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();

        let body = (0..size as GridInt)
            .map(|i| (head.0 - dx * i, head.1 - dy * i))
            .collect();
        Snake { body, heading: direction, buffered: None }
    }

    /// A snake of `size` cells rolled up in a square spiral. The tail sits at `tail`
    /// and the head at the outer end, heading along the last turn of the spiral.
    pub fn coiled(tail: Coords, size: usize) -> Self {
        let mut cells = vec![tail];
        let mut heading = Right;
        let turns = [Right, Down, Left, Up];
        let mut run = 2;

        'spiral: loop {
            for (i, dir) in turns.iter().enumerate() {
                for _ in 0..run {
                    if cells.len() >= size {
                        break 'spiral;
                    }
                    let last = cells[cells.len() - 1];
                    cells.push(dir.step(last));
                    heading = *dir;
                }
                if i % 2 == 1 {
                    run += 2;
                }
            }
        }

        cells.reverse();
        Snake::from_cells(cells, heading)
    }

    pub fn from_cells(cells: Vec<Coords>, heading: Direction) -> Self {
        Snake { body: VecDeque::from(cells), heading, buffered: None }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    /// Panics on an empty body; the engine never holds one.
    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn buffered_direction(&self) -> Option<Direction> {
        self.buffered
    }

    /// Buffers the heading for the next step. Returns `false` when the request
    /// would fold a snake longer than one cell back onto its neck.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if self.body.len() > 1 && new_direction == self.heading.opposite() {
            return false;
        }

        self.buffered = Some(new_direction);
        true
    }

    /// Promotes the buffered direction, if any, to the current heading.
    pub fn apply_buffered(&mut self) -> Direction {
        if let Some(dir) = self.buffered.take() {
            self.heading = dir;
        }
        self.heading
    }

    /// Where the head lands after one step along the current heading, unwrapped.
    pub fn next_head(&self) -> Coords {
        self.heading.step(self.head())
    }

    /// Pushes `new_head` and, unless growing, drops the tail. Returns the dropped tail.
    pub fn advance(&mut self, new_head: Coords, grow: bool) -> Option<Coords> {
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }
}
