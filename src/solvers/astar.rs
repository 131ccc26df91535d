use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use super::{
    Pathfinder, SearchStatus, StepOutcome, check_endpoints, ensure_not_running, ensure_running,
};
use crate::{
    error::Result,
    maze::{Coord, Maze, neighbors4},
};

/// Manhattan distance, admissible and consistent for 4-directional unit moves.
pub fn manhattan(a: Coord, b: Coord) -> u32 {
    a.0.abs_diff(b.0) as u32 + a.1.abs_diff(b.1) as u32
}

/// Frontier entry ordered by f-score, ties broken by row-major coordinate.
/// Wrapped in `Reverse` so the max-heap pops the smallest entry first.
type OpenEntry = Reverse<(u32, Coord)>;

/// Best-first search over f = g + manhattan, one heap pop per step.
///
/// Improved cells are pushed again without removing their older heap entries.
/// A stale entry is expanded like any other when popped, using the best recorded
/// g-score, which can only re-confirm scores already recorded.
#[derive(Debug, Clone)]
pub struct AStar<'a> {
    maze: Option<&'a Maze>,
    start: Coord,
    end: Coord,
    open: BinaryHeap<OpenEntry>,
    came_from: HashMap<Coord, Coord>,
    g_score: HashMap<Coord, u32>,
    f_score: HashMap<Coord, u32>,
    /// Most recently expanded cell
    last: Option<Coord>,
    path: Vec<Coord>,
    status: SearchStatus,
}

impl Default for AStar<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl AStar<'_> {
    pub fn new() -> Self {
        AStar {
            maze: None,
            start: (0, 0),
            end: (0, 0),
            open: BinaryHeap::new(),
            came_from: HashMap::new(),
            g_score: HashMap::new(),
            f_score: HashMap::new(),
            last: None,
            path: Vec::new(),
            status: SearchStatus::Ready,
        }
    }

    pub fn g_score(&self, coord: Coord) -> Option<u32> {
        self.g_score.get(&coord).copied()
    }

    pub fn f_score(&self, coord: Coord) -> Option<u32> {
        self.f_score.get(&coord).copied()
    }

    /// Number of heap entries, stale duplicates included.
    pub fn frontier_len(&self) -> usize {
        self.open.len()
    }

    /// Walks predecessor links back from `to` and returns the route from start.
    fn reconstruct(&self, to: Coord) -> Vec<Coord> {
        let mut path = vec![to];
        let mut current = to;
        while let Some(&previous) = self.came_from.get(&current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }

    /// Best known route to the most recently expanded cell, for highlighting
    /// progress mid-run. Empty before the first expansion.
    pub fn current_path(&self) -> Vec<Coord> {
        match self.status {
            SearchStatus::Found => self.path.clone(),
            _ => self.last.map(|c| self.reconstruct(c)).unwrap_or_default(),
        }
    }
}

impl<'a> Pathfinder<'a> for AStar<'a> {
    fn initialize(&mut self, maze: &'a Maze, start: Coord, end: Coord) -> Result<()> {
        ensure_not_running(self.status)?;
        check_endpoints(maze, start, end)?;

        let h = manhattan(start, end);
        self.maze = Some(maze);
        self.start = start;
        self.end = end;
        self.open.clear();
        self.open.push(Reverse((h, start)));
        self.came_from.clear();
        self.g_score.clear();
        self.g_score.insert(start, 0);
        self.f_score.clear();
        self.f_score.insert(start, h);
        self.last = None;
        self.path.clear();
        self.status = SearchStatus::Running;
        tracing::debug!("[astar] initialized from {:?} to {:?}, f = {}", start, end, h);
        Ok(())
    }

    fn step(&mut self) -> Result<StepOutcome> {
        ensure_running(self.status)?;
        let Some(maze) = self.maze else {
            // Running always has a maze attached
            self.status = SearchStatus::Exhausted;
            return Ok(StepOutcome::Exhausted);
        };

        let Some(Reverse((_, current))) = self.open.pop() else {
            self.status = SearchStatus::Exhausted;
            tracing::debug!("[astar] frontier empty, {} cells scored", self.g_score.len());
            return Ok(StepOutcome::Exhausted);
        };
        self.last = Some(current);

        if current == self.end {
            self.path = self.reconstruct(current);
            self.status = SearchStatus::Found;
            tracing::debug!(
                "[astar] reached {:?} from {:?} with cost {}",
                current,
                self.start,
                self.path.len() - 1
            );
            return Ok(StepOutcome::Found);
        }

        let Some(current_g) = self.g_score(current) else {
            // Only scored cells are ever pushed
            return Ok(StepOutcome::Skipped { current });
        };

        for neighbor in neighbors4(current, maze).filter(|&c| maze.is_passable(c)) {
            let tentative_g = current_g + 1;
            if self.g_score(neighbor).is_none_or(|g| tentative_g < g) {
                let f = tentative_g + manhattan(neighbor, self.end);
                self.came_from.insert(neighbor, current);
                self.g_score.insert(neighbor, tentative_g);
                self.f_score.insert(neighbor, f);
                self.open.push(Reverse((f, neighbor)));
            }
        }
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
