pub mod cell;
pub mod grid;
mod matrix;

use std::{fmt, sync::mpsc::Sender};

pub use cell::{Coord, Tile};
use grid::{Grid, GridEvent};
pub use matrix::parse_rows;

use crate::error::{MazeError, Result};

/// A rectangular maze of passable and blocked tiles, together with the start and
/// end cells it was built for.
///
/// The start and end cells are kept passable by every constructor and by the
/// generator, so a solver can always be initialized on them.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    start: Coord,
    end: Coord,
}

impl Maze {
    /// Creates an all-passable maze with the start at the top-left corner and the
    /// end at the bottom-right corner.
    ///
    /// Panics if either height or width is 0.
    pub fn new(height: u16, width: u16, sender: Option<Sender<GridEvent>>) -> Self {
        assert!(height > 0 && width > 0, "maze dimensions must be non-zero");
        Maze {
            grid: Grid::new(height, width, Tile::Passable, sender),
            start: (0, 0),
            end: (height - 1, width - 1),
        }
    }

    /// Creates an all-passable maze with explicit start and end cells.
    pub fn with_endpoints(
        height: u16,
        width: u16,
        start: Coord,
        end: Coord,
        sender: Option<Sender<GridEvent>>,
    ) -> Result<Self> {
        let mut maze = Maze::new(height, width, sender);
        maze.check_bounds(start)?;
        maze.check_bounds(end)?;
        maze.start = start;
        maze.end = end;
        Ok(maze)
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn end(&self) -> Coord {
        self.end
    }

    /// Read-only access to the underlying tile storage.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        self.grid.is_in_bounds(coord)
    }

    fn check_bounds(&self, coord: Coord) -> Result<()> {
        if self.is_in_bounds(coord) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                coord,
                height: self.height(),
                width: self.width(),
            })
        }
    }

    /// Returns the tile at `coord`, failing with [`MazeError::OutOfBounds`] instead
    /// of clamping.
    pub fn at(&self, coord: Coord) -> Result<Tile> {
        self.check_bounds(coord)?;
        Ok(self.grid[coord])
    }

    /// In-bounds and passable. Out-of-bounds coordinates are simply not passable.
    pub fn is_passable(&self, coord: Coord) -> bool {
        self.is_in_bounds(coord) && self.grid[coord].is_passable()
    }

    /// Sets a tile. Mutation is reserved for generation and carving.
    pub(crate) fn set(&mut self, coord: Coord, tile: Tile) -> Result<Tile> {
        self.check_bounds(coord)?;
        Ok(self.grid.set(coord, tile))
    }

    /// Resets every tile to passable.
    pub(crate) fn clear(&mut self) {
        self.grid.fill(Tile::Passable);
    }

    /// Forces the start and end cells passable. Returns `true` if either had to change.
    pub(crate) fn clear_endpoints(&mut self) -> bool {
        let start_old = self.grid.set(self.start, Tile::Passable);
        let end_old = self.grid.set(self.end, Tile::Passable);
        start_old == Tile::Blocked || end_old == Tile::Blocked
    }

    /// Stops streaming grid events.
    pub fn detach_events(&mut self) {
        self.grid.detach();
    }

    /// Number of blocked tiles.
    pub fn blocked_count(&self) -> usize {
        self.grid()
            .tiles()
            .iter()
            .filter(|tile| **tile == Tile::Blocked)
            .count()
    }

    /// The maze as a matrix of 0 (passable) / 1 (blocked) rows.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.grid()
            .tiles()
            .chunks(self.width() as usize)
            .map(|row| row.iter().map(|tile| tile.as_digit()).collect())
            .collect()
    }
}

/// Get the orthogonal neighbors of a cell, in the order up, down, left, right.
/// Only in-bounds cells are yielded; passability is not checked.
pub fn neighbors4(coord: Coord, maze: &Maze) -> impl Iterator<Item = Coord> + '_ {
    let (row, col) = coord;
    let neighbors = if maze.is_in_bounds(coord) {
        // NOTE: wrapping_sub turns 0 - 1 into u16::MAX and saturating_add caps at u16::MAX.
        // Both land outside any maze (the largest index is u16::MAX - 1) and are
        // filtered out by the bounds check below.
        vec![
            (row.wrapping_sub(1), col),
            (row.saturating_add(1), col),
            (row, col.wrapping_sub(1)),
            (row, col.saturating_add(1)),
        ]
    } else {
        // No neighbors if the coordinate is out of bounds
        vec![]
    };

    neighbors.into_iter().filter(move |&c| maze.is_in_bounds(c))
}

impl fmt::Display for Maze {
    /// One `[0, 1, ...]` line per row, the same format [`Maze::from_text`] reads.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.grid().tiles().chunks(self.width() as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (j, tile) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{tile}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maze_endpoints() {
        let maze = Maze::new(10, 10, None);
        assert_eq!(maze.start(), (0, 0));
        assert_eq!(maze.end(), (9, 9));
        assert_eq!(maze.height(), 10);
        assert_eq!(maze.width(), 10);
    }

    #[test]
    fn test_at_out_of_bounds() {
        let maze = Maze::new(3, 4, None);
        assert_eq!(maze.at((2, 3)), Ok(Tile::Passable));
        assert_eq!(
            maze.at((3, 0)),
            Err(MazeError::OutOfBounds {
                coord: (3, 0),
                height: 3,
                width: 4
            })
        );
        assert!(maze.at((0, 4)).is_err());
    }

    #[test]
    fn test_with_endpoints_out_of_bounds() {
        assert!(Maze::with_endpoints(3, 3, (0, 0), (3, 3), None).is_err());
        let maze = Maze::with_endpoints(3, 3, (1, 1), (0, 2), None).unwrap();
        assert_eq!(maze.start(), (1, 1));
        assert_eq!(maze.end(), (0, 2));
    }

    #[test]
    fn test_neighbors_order() {
        let maze = Maze::new(5, 5, None);
        let neighbors = neighbors4((2, 2), &maze).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(1, 2), (3, 2), (2, 1), (2, 3)]);
    }

    #[test]
    fn test_neighbors_counts() {
        let maze = Maze::new(4, 6, None);
        for row in 0..maze.height() {
            for col in 0..maze.width() {
                let neighbors = neighbors4((row, col), &maze).collect::<Vec<_>>();
                assert!(neighbors.iter().all(|&c| maze.is_in_bounds(c)));
                let on_row_edge = row == 0 || row == maze.height() - 1;
                let on_col_edge = col == 0 || col == maze.width() - 1;
                let expected = match (on_row_edge, on_col_edge) {
                    (true, true) => 2,
                    (true, false) | (false, true) => 3,
                    (false, false) => 4,
                };
                assert_eq!(neighbors.len(), expected, "at {:?}", (row, col));
            }
        }
        assert_eq!(neighbors4((4, 0), &maze).count(), 0);
    }

    #[test]
    fn test_neighbors_single_cell() {
        let maze = Maze::new(1, 1, None);
        assert_eq!(neighbors4((0, 0), &maze).count(), 0);
    }

    #[test]
    fn test_display_matches_matrix() {
        let mut maze = Maze::new(2, 3, None);
        maze.set((0, 1), Tile::Blocked).unwrap();
        assert_eq!(maze.to_string(), "[0, 1, 0]\n[0, 0, 0]");
        assert_eq!(maze.to_matrix(), vec![vec![0, 1, 0], vec![0, 0, 0]]);
        assert_eq!(maze.blocked_count(), 1);
    }

    #[test]
    fn test_grid_view() {
        let mut maze = Maze::new(2, 3, None);
        maze.set((1, 2), Tile::Blocked).unwrap();
        let grid = maze.grid();
        assert_eq!((grid.height(), grid.width()), (2, 3));
        assert_eq!(grid.tiles().len(), 6);
        assert_eq!(grid[(1, 2)], Tile::Blocked);
        assert!(!grid.is_in_bounds((2, 0)));
    }

    #[test]
    fn test_clear_endpoints() {
        let mut maze = Maze::new(2, 2, None);
        maze.set((0, 0), Tile::Blocked).unwrap();
        assert!(maze.clear_endpoints());
        assert!(!maze.clear_endpoints());
        assert_eq!(maze.at((0, 0)), Ok(Tile::Passable));
    }
}
