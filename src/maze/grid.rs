use std::sync::mpsc::Sender;

use super::cell::{Coord, Tile};

/// A change to the grid, streamed to an optional listener so callers can animate
/// block scattering and carving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// The grid was (re)filled with a single tile.
    Initial { tile: Tile, height: u16, width: u16 },
    /// A single cell changed.
    Update { coord: Coord, old: Tile, new: Tile },
}

/// Flat row-major tile storage.
#[derive(Debug, Clone)]
pub struct Grid {
    data: Box<[Tile]>,
    height: u16,
    width: u16,
    sender: Option<Sender<GridEvent>>,
}

impl Grid {
    pub fn new(height: u16, width: u16, tile: Tile, sender: Option<Sender<GridEvent>>) -> Self {
        let data = vec![tile; height as usize * width as usize].into_boxed_slice();
        if let Some(s) = &sender {
            let _ = s.send(GridEvent::Initial {
                tile,
                height,
                width,
            });
        }
        Grid {
            data,
            height,
            width,
            sender,
        }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.height && coord.1 < self.width
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        // Overflow-safe since height and width are u16 (assuming usize is at least 32 bits)
        coord.0 as usize * self.width as usize + coord.1 as usize
    }

    /// Resets every cell to `tile`, notifying the listener once.
    pub fn fill(&mut self, tile: Tile) {
        self.data.fill(tile);
        if let Some(s) = &self.sender {
            let _ = s.send(GridEvent::Initial {
                tile,
                height: self.height,
                width: self.width,
            });
        }
    }

    /// Sets a cell, notifying the listener only if the tile actually changed.
    /// Returns the previous tile.
    ///
    /// Panics if `coord` is out of bounds; callers check bounds first.
    pub fn set(&mut self, coord: Coord, tile: Tile) -> Tile {
        let idx = self.ravel_index(coord);
        let old = self.data[idx];
        if old != tile {
            self.data[idx] = tile;
            if let Some(sender) = &self.sender {
                let _ = sender.send(GridEvent::Update {
                    coord,
                    old,
                    new: tile,
                });
            }
        }
        old
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.data
    }

    /// Drops the event listener, e.g. before handing the grid to a solver.
    pub fn detach(&mut self) {
        self.sender = None;
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Tile;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_grid_indexing() {
        let mut grid = Grid::new(3, 4, Tile::Passable, None);
        grid.set((2, 3), Tile::Blocked);
        assert_eq!(grid[(2, 3)], Tile::Blocked);
        assert_eq!(grid[(3 - 1, 0)], Tile::Passable);
        assert_eq!(grid.tiles().len(), 12);
    }

    #[test]
    fn test_events_only_on_change() {
        let (tx, rx) = mpsc::channel();
        let mut grid = Grid::new(2, 2, Tile::Passable, Some(tx));
        grid.set((0, 1), Tile::Blocked);
        // Same tile again should not produce an event
        grid.set((0, 1), Tile::Blocked);
        drop(grid);
        let events = rx.iter().collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![
                GridEvent::Initial {
                    tile: Tile::Passable,
                    height: 2,
                    width: 2
                },
                GridEvent::Update {
                    coord: (0, 1),
                    old: Tile::Passable,
                    new: Tile::Blocked
                },
            ]
        );
    }
}
