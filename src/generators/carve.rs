//! Depth-first reachability probe that can double as a path carver.
//!
//! In [`ProbeMode::Carve`] the walk ignores tile states entirely: every in-bounds
//! unvisited neighbor is pushed, and every visited cell is forced passable. The
//! walk therefore always reaches `end`, clearing whatever blocks lay along the way.
//! In [`ProbeMode::ReadOnly`] only passable cells are entered and nothing is
//! written.

use std::collections::HashSet;

use rand::{RngCore, seq::SliceRandom};

use crate::{
    error::{MazeError, Result},
    maze::{Coord, Maze, Tile, neighbors4},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMode {
    /// Force every visited cell passable.
    Carve,
    /// Pure reachability check over passable cells.
    ReadOnly,
}

/// Runs the depth-first probe from `start` toward `end` and reports whether `end`
/// was reached. In carve mode, every cell the walk visited is left passable.
pub fn probe(
    maze: &mut Maze,
    start: Coord,
    end: Coord,
    mode: ProbeMode,
    rng: &mut dyn RngCore,
) -> Result<bool> {
    let (found, visited) = walk(maze, start, end, mode, Some(rng))?;

    if mode == ProbeMode::Carve {
        // The carve walk never consults tile states, so clearing the visited cells
        // afterwards gives the same maze as clearing them during the walk.
        let mut carved = 0usize;
        for coord in visited.iter().copied() {
            if maze.set(coord, Tile::Passable)? == Tile::Blocked {
                carved += 1;
            }
        }
        tracing::debug!(
            "[carve] visited {} cells, cleared {} blocks, reached end: {}",
            visited.len(),
            carved,
            found
        );
    }
    Ok(found)
}

/// Non-mutating check that `end` can be reached from `start` through passable
/// cells with 4-directional moves.
pub fn is_reachable(maze: &Maze, start: Coord, end: Coord) -> Result<bool> {
    if !maze.at(start)?.is_passable() || !maze.at(end)?.is_passable() {
        return Ok(false);
    }
    let (found, _) = walk(maze, start, end, ProbeMode::ReadOnly, None)?;
    Ok(found)
}

/// The shared traversal: a LIFO stack seeded with `start`. Popped cells are skipped
/// if already visited, otherwise recorded; reaching `end` stops the walk. Neighbors
/// are shuffled before being pushed when an rng is given.
fn walk(
    maze: &Maze,
    start: Coord,
    end: Coord,
    mode: ProbeMode,
    mut rng: Option<&mut dyn RngCore>,
) -> Result<(bool, Vec<Coord>)> {
    for coord in [start, end] {
        if !maze.is_in_bounds(coord) {
            return Err(MazeError::OutOfBounds {
                coord,
                height: maze.height(),
                width: maze.width(),
            });
        }
    }

    let mut stack = vec![start];
    let mut visited = HashSet::new();
    let mut order = Vec::new();

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        order.push(current);
        if current == end {
            return Ok((true, order));
        }

        let mut neighbors = neighbors4(current, maze)
            .filter(|c| !visited.contains(c))
            .filter(|&c| mode == ProbeMode::Carve || maze.is_passable(c))
            .collect::<Vec<_>>();
        if let Some(rng) = rng.as_deref_mut() {
            neighbors.shuffle(rng);
        }
        stack.extend(neighbors);
    }

    Ok((false, order))
}
