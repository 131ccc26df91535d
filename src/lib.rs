//! Grid maze generation and steppable pathfinding.
//!
//! A [`maze::Maze`] is a rectangular grid of passable and blocked tiles with a
//! designated start and end cell. [`generators`] scatters random blocks and can
//! carve a guaranteed start-to-end route; [`solvers`] walks the result with
//! depth-first backtracking or A*, one step at a time.

pub mod config;
pub mod error;
pub mod generators;
pub mod maze;
pub mod solvers;

pub use error::{MazeError, Result};
