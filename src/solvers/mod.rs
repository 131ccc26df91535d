//! Steppable pathfinders.
//!
//! Each solver is a small state machine: `initialize` moves it to
//! [`SearchStatus::Running`], and every `step` performs exactly one expansion
//! until the search ends in [`SearchStatus::Found`] or [`SearchStatus::Exhausted`].
//! Callers choose the cadence (a timer tick per step for animation, or a tight
//! loop via [`solve_maze`]). Solvers only borrow the maze immutably, so the maze
//! cannot change while a run is in progress.

mod astar;
mod backtrack;

use std::{fmt, str::FromStr};

pub use astar::{AStar, manhattan};
pub use backtrack::Backtracker;

use crate::{
    error::{MazeError, Result},
    maze::{Coord, Maze},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Backtracking,
    AStar,
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solver::Backtracking => write!(f, "Backtracking (DFS)"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

impl FromStr for Solver {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "backtracking" | "dfs" => Ok(Solver::Backtracking),
            "astar" | "a*" => Ok(Solver::AStar),
            _ => Err(MazeError::Config(format!("unknown solver {s:?}"))),
        }
    }
}

/// Lifecycle of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Ready,
    Running,
    /// A path to the end cell was found.
    Found,
    /// The frontier emptied without reaching the end cell.
    Exhausted,
}

/// Result of a single `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// `current` was expanded and its neighbors queued.
    Progress { current: Coord },
    /// `current` had already been visited; the frontier just shrank.
    Skipped { current: Coord },
    Found,
    Exhausted,
}

impl StepOutcome {
    /// Whether this step ended the run.
    pub fn is_terminal(self) -> bool {
        matches!(self, StepOutcome::Found | StepOutcome::Exhausted)
    }
}

/// Shared interface of the steppable solvers.
pub trait Pathfinder<'a> {
    /// Starts a new run on `maze`. Fails with [`MazeError::InvalidState`] while a
    /// run is in progress and with [`MazeError::OutOfBounds`] for bad endpoints.
    fn initialize(&mut self, maze: &'a Maze, start: Coord, end: Coord) -> Result<()>;

    /// Performs one expansion. Fails with [`MazeError::InvalidState`] unless
    /// the solver is running.
    fn step(&mut self) -> Result<StepOutcome>;

    fn status(&self) -> SearchStatus;

    /// The path from start to end (inclusive), once the run is [`SearchStatus::Found`].
    fn path(&self) -> Option<&[Coord]>;
}

fn ensure_running(found: SearchStatus) -> Result<()> {
    if found == SearchStatus::Running {
        Ok(())
    } else {
        Err(MazeError::InvalidState {
            expected: "Running",
            found,
        })
    }
}

fn ensure_not_running(found: SearchStatus) -> Result<()> {
    if found == SearchStatus::Running {
        Err(MazeError::InvalidState {
            expected: "Ready, Found or Exhausted",
            found,
        })
    } else {
        Ok(())
    }
}

fn check_endpoints(maze: &Maze, start: Coord, end: Coord) -> Result<()> {
    maze.at(start)?;
    maze.at(end)?;
    Ok(())
}

/// The single active search, whichever strategy was chosen.
pub enum Search<'a> {
    Backtracking(Backtracker<'a>),
    AStar(AStar<'a>),
}

impl Search<'_> {
    pub fn new(solver: Solver) -> Self {
        match solver {
            Solver::Backtracking => Search::Backtracking(Backtracker::new()),
            Solver::AStar => Search::AStar(AStar::new()),
        }
    }

    pub fn solver(&self) -> Solver {
        match self {
            Search::Backtracking(_) => Solver::Backtracking,
            Search::AStar(_) => Solver::AStar,
        }
    }

    /// The cells to highlight mid-run: the visitation order for backtracking, the
    /// route to the most recently expanded cell for A*.
    pub fn progress_path(&self) -> Vec<Coord> {
        match self {
            Search::Backtracking(s) => s.visited_path().to_vec(),
            Search::AStar(s) => s.current_path(),
        }
    }
}

impl<'a> Pathfinder<'a> for Search<'a> {
    fn initialize(&mut self, maze: &'a Maze, start: Coord, end: Coord) -> Result<()> {
        match self {
            Search::Backtracking(s) => s.initialize(maze, start, end),
            Search::AStar(s) => s.initialize(maze, start, end),
        }
    }

    fn step(&mut self) -> Result<StepOutcome> {
        match self {
            Search::Backtracking(s) => s.step(),
            Search::AStar(s) => s.step(),
        }
    }

    fn status(&self) -> SearchStatus {
        match self {
            Search::Backtracking(s) => s.status(),
            Search::AStar(s) => s.status(),
        }
    }

    fn path(&self) -> Option<&[Coord]> {
        match self {
            Search::Backtracking(s) => s.path(),
            Search::AStar(s) => s.path(),
        }
    }
}

/// Runs `solver` from the maze's start to its end until the run finishes.
/// Returns the path, or `None` if the end is unreachable.
pub fn solve_maze(maze: &Maze, solver: Solver) -> Result<Option<Vec<Coord>>> {
    let mut search = Search::new(solver);
    search.initialize(maze, maze.start(), maze.end())?;

    let mut steps = 0usize;
    loop {
        steps += 1;
        if search.step()?.is_terminal() {
            break;
        }
    }

    let path = search.path().map(<[Coord]>::to_vec);
    match &path {
        Some(p) => tracing::info!("[solve] {solver} found a {}-cell path in {steps} steps", p.len()),
        None => tracing::info!("[solve] {solver} exhausted the frontier after {steps} steps"),
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVERS: [Solver; 2] = [Solver::Backtracking, Solver::AStar];

    #[test]
    fn test_solver_from_str() {
        assert_eq!("astar".parse::<Solver>(), Ok(Solver::AStar));
        assert_eq!("A*".parse::<Solver>(), Ok(Solver::AStar));
        assert_eq!("Backtracking".parse::<Solver>(), Ok(Solver::Backtracking));
        assert!("bfs".parse::<Solver>().is_err());
    }

    #[test]
    fn test_two_by_two_diagonal_walls_exhaust() {
        let maze = Maze::from_matrix(&[vec![0, 1], vec![1, 0]], 2, 2).unwrap();
        for solver in SOLVERS {
            assert_eq!(solve_maze(&maze, solver), Ok(None), "{solver}");
        }
    }

    #[test]
    fn test_open_maze_found_by_both() {
        let maze = Maze::new(6, 4, None);
        for solver in SOLVERS {
            let path = solve_maze(&maze, solver).unwrap().unwrap();
            assert_eq!(path.first(), Some(&maze.start()));
            assert_eq!(path.last(), Some(&maze.end()));
        }
    }

    #[test]
    fn test_step_before_initialize_is_invalid() {
        for solver in SOLVERS {
            let mut search = Search::new(solver);
            assert_eq!(search.status(), SearchStatus::Ready);
            assert_eq!(
                search.step(),
                Err(MazeError::InvalidState {
                    expected: "Running",
                    found: SearchStatus::Ready
                })
            );
        }
    }

    #[test]
    fn test_reinitialize_while_running_is_invalid() {
        let maze = Maze::new(3, 3, None);
        for solver in SOLVERS {
            let mut search = Search::new(solver);
            search.initialize(&maze, (0, 0), (2, 2)).unwrap();
            assert!(matches!(
                search.initialize(&maze, (0, 0), (2, 2)),
                Err(MazeError::InvalidState { .. })
            ));
        }
    }

    #[test]
    fn test_restart_after_finish() {
        let maze = Maze::new(3, 3, None);
        for solver in SOLVERS {
            let mut search = Search::new(solver);
            search.initialize(&maze, (0, 0), (2, 2)).unwrap();
            while !search.step().unwrap().is_terminal() {}
            assert_eq!(search.status(), SearchStatus::Found);
            assert!(search.step().is_err());
            search.initialize(&maze, (2, 2), (0, 0)).unwrap();
            while !search.step().unwrap().is_terminal() {}
            assert_eq!(search.path().and_then(|p| p.first()), Some(&(2, 2)));
        }
    }

    #[test]
    fn test_progress_path_mid_run() {
        let rows = vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]];
        let maze = Maze::from_matrix(&rows, 3, 3).unwrap();

        let mut search = Search::new(Solver::Backtracking);
        search.initialize(&maze, maze.start(), maze.end()).unwrap();
        assert!(search.progress_path().is_empty());
        // (0, 1) is pushed after (1, 0), so it is popped first
        for expected in [(0, 0), (0, 1), (0, 2)] {
            assert_eq!(search.step(), Ok(StepOutcome::Progress { current: expected }));
        }
        assert_eq!(search.progress_path(), vec![(0, 0), (0, 1), (0, 2)]);

        let mut search = Search::new(Solver::AStar);
        search.initialize(&maze, maze.start(), maze.end()).unwrap();
        assert!(search.progress_path().is_empty());
        assert_eq!(search.step(), Ok(StepOutcome::Progress { current: (0, 0) }));
        assert_eq!(search.progress_path(), vec![(0, 0)]);
        // (0, 1) and (1, 0) tie at f = 4; row-major order picks (0, 1)
        assert_eq!(search.step(), Ok(StepOutcome::Progress { current: (0, 1) }));
        assert_eq!(search.progress_path(), vec![(0, 0), (0, 1)]);
        // (0, 2) ties with (1, 0) and sorts first
        assert_eq!(search.step(), Ok(StepOutcome::Progress { current: (0, 2) }));
        assert_eq!(search.progress_path(), vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_progress_path_is_final_path_when_found() {
        let maze = Maze::new(4, 5, None);
        for solver in SOLVERS {
            let mut search = Search::new(solver);
            search.initialize(&maze, maze.start(), maze.end()).unwrap();
            while !search.step().unwrap().is_terminal() {}
            assert_eq!(search.status(), SearchStatus::Found);
            assert_eq!(Some(search.progress_path().as_slice()), search.path(), "{solver}");
        }
    }

    #[test]
    fn test_out_of_bounds_endpoints() {
        let maze = Maze::new(3, 3, None);
        for solver in SOLVERS {
            let mut search = Search::new(solver);
            assert!(matches!(
                search.initialize(&maze, (0, 0), (3, 0)),
                Err(MazeError::OutOfBounds { .. })
            ));
            assert_eq!(search.status(), SearchStatus::Ready);
        }
    }
}
