use std::collections::HashSet;

use super::{
    Pathfinder, SearchStatus, StepOutcome, check_endpoints, ensure_not_running, ensure_running,
};
use crate::{
    error::Result,
    maze::{Coord, Maze, neighbors4},
};

/// Stack-based depth-first search, one pop per step.
///
/// The reported path is the visitation order, dead-end detours included. It
/// always starts at `start` and ends at `end`, but it is generally not a shortest
/// path and consecutive cells need not be adjacent. Use [`super::AStar`] when an
/// optimal route is required.
#[derive(Debug, Clone)]
pub struct Backtracker<'a> {
    maze: Option<&'a Maze>,
    end: Coord,
    /// LIFO frontier of cells to visit
    stack: Vec<Coord>,
    visited: HashSet<Coord>,
    /// Cells in the order they were popped and first visited
    path: Vec<Coord>,
    status: SearchStatus,
}

impl Default for Backtracker<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Backtracker<'_> {
    pub fn new() -> Self {
        Backtracker {
            maze: None,
            end: (0, 0),
            stack: Vec::new(),
            visited: HashSet::new(),
            path: Vec::new(),
            status: SearchStatus::Ready,
        }
    }

    /// The cells visited so far, in visitation order.
    pub fn visited_path(&self) -> &[Coord] {
        &self.path
    }

    pub fn frontier(&self) -> &[Coord] {
        &self.stack
    }
}

impl<'a> Pathfinder<'a> for Backtracker<'a> {
    fn initialize(&mut self, maze: &'a Maze, start: Coord, end: Coord) -> Result<()> {
        ensure_not_running(self.status)?;
        check_endpoints(maze, start, end)?;

        self.maze = Some(maze);
        self.end = end;
        self.stack.clear();
        self.stack.push(start);
        self.visited.clear();
        self.path.clear();
        self.status = SearchStatus::Running;
        tracing::debug!("[backtrack] initialized from {:?} to {:?}", start, end);
        Ok(())
    }

    fn step(&mut self) -> Result<StepOutcome> {
        ensure_running(self.status)?;
        let Some(maze) = self.maze else {
            // Running always has a maze attached
            self.status = SearchStatus::Exhausted;
            return Ok(StepOutcome::Exhausted);
        };

        let Some(current) = self.stack.pop() else {
            self.status = SearchStatus::Exhausted;
            tracing::debug!("[backtrack] frontier empty after {} cells", self.path.len());
            return Ok(StepOutcome::Exhausted);
        };

        if !self.visited.insert(current) {
            return Ok(StepOutcome::Skipped { current });
        }
        self.path.push(current);

        if current == self.end {
            self.status = SearchStatus::Found;
            tracing::debug!("[backtrack] reached {:?} after {} cells", current, self.path.len());
            return Ok(StepOutcome::Found);
        }

        let visited = &self.visited;
        self.stack.extend(
            neighbors4(current, maze).filter(|&c| maze.is_passable(c) && !visited.contains(&c)),
        );
        Ok(StepOutcome::Progress { current })
    }

    fn status(&self) -> SearchStatus {
        self.status
    }

    fn path(&self) -> Option<&[Coord]> {
        match self.status {
            SearchStatus::Found => Some(&self.path),
            _ => None,
        }
    }
}
