//! Ingest of externally produced 0/1 maze matrices.
//!
//! External sources (hand-written files, text generators) deliver a maze as text
//! with one `[0, 1, 0, ...]` line per row, sometimes wrapped in unrelated prose.
//! Everything before the first `[` and after the last `]` is ignored; everything
//! in between must be well-formed.

use super::{Coord, Maze, Tile};
use crate::error::{MazeError, Result};

impl Maze {
    /// Builds a maze from a 0/1 matrix, rejecting wrong dimensions, ragged rows and
    /// values other than 0 or 1.
    ///
    /// The start (top-left) and end (bottom-right) cells are forced passable
    /// afterwards; a warning is logged if either had to change.
    pub fn from_matrix(rows: &[Vec<u8>], height: u16, width: u16) -> Result<Maze> {
        if height == 0 || width == 0 {
            return Err(MazeError::MalformedInput(format!(
                "requested dimensions {height}x{width} must be non-zero"
            )));
        }
        if rows.len() != height as usize {
            return Err(MazeError::MalformedInput(format!(
                "expected {height} rows, got {}",
                rows.len()
            )));
        }

        let mut maze = Maze::new(height, width, None);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width as usize {
                return Err(MazeError::MalformedInput(format!(
                    "row {r} has {} columns, expected {width}",
                    row.len()
                )));
            }
            for (c, &value) in row.iter().enumerate() {
                let tile = Tile::from_digit(value).ok_or_else(|| {
                    MazeError::MalformedInput(format!(
                        "value {value} at ({r}, {c}) is neither 0 nor 1"
                    ))
                })?;
                let coord: Coord = (r as u16, c as u16);
                maze.set(coord, tile)?;
            }
        }

        if maze.clear_endpoints() {
            tracing::warn!(
                "[matrix] start {:?} or end {:?} was blocked in the supplied matrix, cleared",
                maze.start(),
                maze.end()
            );
        }
        Ok(maze)
    }

    /// Parses a maze from text and builds it with [`Maze::from_matrix`].
    pub fn from_text(text: &str, height: u16, width: u16) -> Result<Maze> {
        let rows = parse_rows(text)?;
        Maze::from_matrix(&rows, height, width)
    }
}

/// Splits text into rows of integers. Blank lines are skipped; every other line
/// between the first `[` and the last `]` must be a bracketed, comma-separated row.
pub fn parse_rows(text: &str) -> Result<Vec<Vec<u8>>> {
    let (Some(first), Some(last)) = (text.find('['), text.rfind(']')) else {
        return Err(MazeError::MalformedInput(
            "no bracketed rows found".to_string(),
        ));
    };
    if last < first {
        return Err(MazeError::MalformedInput(
            "closing bracket precedes opening bracket".to_string(),
        ));
    }

    text[first..=last]
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| parse_row(i, line))
        .collect()
}

fn parse_row(index: usize, line: &str) -> Result<Vec<u8>> {
    let inner = line
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .ok_or_else(|| {
            MazeError::MalformedInput(format!("row {index} is not enclosed in brackets: {line:?}"))
        })?;

    inner
        .split(',')
        .map(str::trim)
        .map(|token| {
            token.parse::<u8>().map_err(|_| {
                MazeError::MalformedInput(format!("row {index} has non-integer value {token:?}"))
            })
        })
        .collect()
}
