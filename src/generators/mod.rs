//! Random obstacle layouts with an optional start-to-end connectivity guarantee.

pub mod carve;
pub mod scatter;

use std::{
    sync::mpsc::Sender,
    thread::{self, JoinHandle},
};

use rand::{RngCore, SeedableRng, rngs::StdRng};

use crate::{
    config::MazeConfig,
    maze::{Maze, grid::GridEvent},
};
use carve::{ProbeMode, probe};
use scatter::{available_cells, scatter_blocks};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Knobs for a single generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    /// Absolute number of blocked cells to place.
    pub blocks: usize,
    /// Carve a path from start to end if the scattered blocks cut it off.
    pub ensure_path: bool,
    /// Number of scatter attempts before settling for the last one.
    pub max_retries: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            blocks: 30,
            ensure_path: true,
            max_retries: 10,
        }
    }
}

/// What a generation run ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Attempts made, between 1 and `max_retries`.
    pub attempts: usize,
    /// Block count actually requested after clamping to the free cells.
    pub blocks: usize,
    /// Whether the accepted layout satisfied `ensure_path` (always true when the
    /// flag is off).
    pub accepted: bool,
}

/// Fills `maze` with a random obstacle layout.
///
/// Each attempt clears the maze, scatters `params.blocks` blocks away from the
/// start and end cells, and accepts right away unless `ensure_path` is set. With
/// `ensure_path`, the carve probe runs from start toward end and the layout is
/// accepted once it reports the end reached. If every attempt fails, the maze keeps
/// whatever the last carve pass left behind; running out of retries is not an
/// error.
pub fn generate_maze_with_rng(
    maze: &mut Maze,
    params: GenerationParams,
    rng: &mut dyn RngCore,
) -> GenerationOutcome {
    let available = available_cells(maze);
    let blocks = if params.blocks > available {
        tracing::warn!(
            "[generate] {} blocks requested but only {} cells are free, clamping",
            params.blocks,
            available
        );
        available
    } else {
        params.blocks
    };
    let max_retries = params.max_retries.max(1);
    let (start, end) = (maze.start(), maze.end());

    let mut attempts = 0;
    let mut accepted = false;
    while attempts < max_retries && !accepted {
        attempts += 1;
        maze.clear();
        if let Err(e) = scatter_blocks(maze, blocks, rng) {
            tracing::error!("[generate] scatter failed: {e}");
            break;
        }
        maze.clear_endpoints();

        accepted = if params.ensure_path {
            match probe(maze, start, end, ProbeMode::Carve, rng) {
                Ok(found) => found,
                Err(e) => {
                    tracing::error!("[generate] carve failed: {e}");
                    break;
                }
            }
        } else {
            true
        };
        tracing::debug!("[generate] attempt {attempts}/{max_retries}, accepted: {accepted}");
    }

    if !accepted {
        tracing::warn!(
            "[generate] no attempt satisfied ensure_path after {attempts} tries, keeping last layout"
        );
    }
    tracing::info!(
        "[generate] {}x{} maze with {} blocks after {} attempt(s)",
        maze.height(),
        maze.width(),
        maze.blocked_count(),
        attempts
    );

    GenerationOutcome {
        attempts,
        blocks,
        accepted,
    }
}

/// Seeded (or OS-entropy) variant of [`generate_maze_with_rng`].
pub fn generate_maze(
    maze: &mut Maze,
    params: GenerationParams,
    seed: Option<u64>,
) -> GenerationOutcome {
    let mut rng = get_rng(seed);
    generate_maze_with_rng(maze, params, &mut rng)
}

/// Builds a fresh `height` x `width` maze with the start at the top-left and the
/// end at the bottom-right corner.
///
/// Panics if either height or width is 0.
pub fn generate(
    height: u16,
    width: u16,
    blocks: usize,
    ensure_path: bool,
    max_retries: usize,
    seed: Option<u64>,
) -> Maze {
    let mut maze = Maze::new(height, width, None);
    let params = GenerationParams {
        blocks,
        ensure_path,
        max_retries,
    };
    generate_maze(&mut maze, params, seed);
    maze
}

/// Maze generation running on a worker thread, so a foreground loop can keep
/// polling (e.g. to show a busy indicator) until the maze is ready.
pub struct GenerationTask {
    handle: JoinHandle<Maze>,
}

impl GenerationTask {
    /// Spawns generation for `config`. Grid events are streamed to `sender` while
    /// the worker scatters and carves; the listener is detached before the maze is
    /// handed back.
    pub fn spawn(config: &MazeConfig, sender: Option<Sender<GridEvent>>) -> Self {
        let (height, width) = (config.height, config.width);
        let params = config.generation_params();
        let seed = config.seed;
        let handle = thread::spawn(move || {
            tracing::debug!("[generate] worker thread started");
            let mut maze = Maze::new(height, width, sender);
            generate_maze(&mut maze, params, seed);
            maze.detach_events();
            maze
        });
        GenerationTask { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the worker is done. Fails only if the worker panicked.
    pub fn join(self) -> thread::Result<Maze> {
        self.handle.join()
    }
}
