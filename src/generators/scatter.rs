use rand::{Rng, RngCore};

use crate::{
    error::Result,
    maze::{Coord, Maze, Tile},
};

/// Number of cells that may hold a block: everything except the start and end.
pub fn available_cells(maze: &Maze) -> usize {
    let total = maze.height() as usize * maze.width() as usize;
    let reserved = if maze.start() == maze.end() { 1 } else { 2 };
    total.saturating_sub(reserved)
}

/// Places exactly `blocks` blocked tiles at distinct uniformly random coordinates,
/// never on the start or end cell. A coordinate that is reserved or already
/// blocked is re-rolled.
///
/// Requests beyond [`available_cells`] are clamped, so placement always ends.
pub fn scatter_blocks(maze: &mut Maze, blocks: usize, rng: &mut dyn RngCore) -> Result<()> {
    let blocks = blocks.min(available_cells(maze));
    let reserved = [maze.start(), maze.end()];

    for _ in 0..blocks {
        loop {
            let coord: Coord = (
                rng.random_range(0..maze.height()),
                rng.random_range(0..maze.width()),
            );
            if reserved.contains(&coord) || maze.at(coord)? == Tile::Blocked {
                continue;
            }
            maze.set(coord, Tile::Blocked)?;
            break;
        }
    }
    Ok(())
}
