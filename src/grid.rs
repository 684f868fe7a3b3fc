use crate::error::EngineError;
use crate::{Coords, GridInt};

/// Fixed playing field. Cells are `(x, y)` with `0 <= x < width` and `0 <= y < height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: GridInt,
    height: GridInt,
}

impl Grid {
    pub fn new(width: GridInt, height: GridInt) -> Result<Self, EngineError> {
        if width <= 0 || height <= 0 {
            return Err(EngineError::InvalidGridSize { width, height });
        }

        Ok(Grid { width, height })
    }

    pub fn width(&self) -> GridInt {
        self.width
    }

    pub fn height(&self) -> GridInt {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(&self) -> Coords {
        (self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: Coords) -> bool {
        (0..self.width).contains(&pos.0) && (0..self.height).contains(&pos.1)
    }

    /// Maps any cell back onto the grid as if the edges were glued together.
    pub fn wrap(&self, pos: Coords) -> Coords {
        (pos.0.rem_euclid(self.width), pos.1.rem_euclid(self.height))
    }

    /// Whether two cells share an edge. With `toroidal`, cells on opposite borders count too.
    pub fn are_adjacent(&self, a: Coords, b: Coords, toroidal: bool) -> bool {
        let (dx, dy) = ((a.0 - b.0).abs(), (a.1 - b.1).abs());
        if dx + dy == 1 {
            return true;
        }

        if !toroidal {
            return false;
        }

        let wrap_x = dx == self.width - 1 && self.width > 2;
        let wrap_y = dy == self.height - 1 && self.height > 2;
        (wrap_x && dy == 0) || (wrap_y && dx == 0)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coords> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_or_negative_dimensions() {
        assert_eq!(Grid::new(0, 5), Err(EngineError::InvalidGridSize { width: 0, height: 5 }));
        assert_eq!(Grid::new(5, -1), Err(EngineError::InvalidGridSize { width: 5, height: -1 }));
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn wraps_both_axes() {
        let grid = Grid::new(5, 4).unwrap();
        assert_eq!(grid.wrap((5, 2)), (0, 2));
        assert_eq!(grid.wrap((-1, 2)), (4, 2));
        assert_eq!(grid.wrap((3, -1)), (3, 3));
        assert_eq!(grid.wrap((3, 4)), (3, 0));
        assert_eq!(grid.wrap((2, 2)), (2, 2));
    }

    #[test]
    fn adjacency_across_edges_only_when_toroidal() {
        let grid = Grid::new(5, 5).unwrap();
        assert!(grid.are_adjacent((1, 1), (1, 2), false));
        assert!(!grid.are_adjacent((1, 1), (2, 2), false));
        assert!(!grid.are_adjacent((0, 3), (4, 3), false));
        assert!(grid.are_adjacent((0, 3), (4, 3), true));
        assert!(grid.are_adjacent((2, 0), (2, 4), true));
        assert!(!grid.are_adjacent((0, 0), (4, 4), true));
    }

    #[test]
    fn enumerates_cells_row_major() {
        let grid = Grid::new(3, 2).unwrap();
        let cells: Vec<Coords> = grid.cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(grid.area(), 6);
        assert_eq!(grid.center(), (1, 1));
    }
}
