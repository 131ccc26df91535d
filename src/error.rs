//! Error types shared by the maze, generator and solver modules.

use thiserror::Error;

use crate::maze::Coord;
use crate::solvers::SearchStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A coordinate fell outside `[0, height) x [0, width)`.
    #[error("coordinate {coord:?} is out of bounds for a {height}x{width} maze")]
    OutOfBounds { coord: Coord, height: u16, width: u16 },

    /// A solver was stepped or initialized while in the wrong state.
    #[error("solver is {found:?}, expected {expected}")]
    InvalidState {
        expected: &'static str,
        found: SearchStatus,
    },

    /// An externally supplied maze matrix is structurally invalid.
    #[error("malformed maze matrix: {0}")]
    MalformedInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("maze generation worker panicked")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, MazeError>;
