use std::{thread, time::Duration};

use gridpath::{
    MazeError,
    config::MazeConfig,
    generators::GenerationTask,
    maze::{Coord, Maze},
    solvers::{Pathfinder, Search, StepOutcome},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// How often the foreground loop checks on background generation
const GENERATION_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Log to a file so stdout only carries the maze and the path.
/// The returned guard must stay alive until the end of `main` to flush the log.
fn init_logging() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", "gridpath.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridpath=info")),
        )
        .init();
    guard
}

fn load_maze(config: &MazeConfig) -> gridpath::Result<Maze> {
    if let Some(path) = &config.input {
        tracing::info!("Loading maze from {:?}", path);
        let text = std::fs::read_to_string(path)
            .map_err(|e| MazeError::Config(format!("cannot read {}: {e}", path.display())))?;
        return Maze::from_text(&text, config.height, config.width);
    }

    let task = GenerationTask::spawn(config, None);
    let mut polls = 0usize;
    while !task.is_finished() {
        polls += 1;
        thread::sleep(GENERATION_POLL_INTERVAL);
    }
    tracing::debug!("Generation finished after {} polls", polls);
    task.join().map_err(|_| MazeError::WorkerPanicked)
}

fn format_path(path: &[Coord]) -> String {
    path.iter()
        .map(|(row, col)| format!("({row}, {col})"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn main() -> gridpath::Result<()> {
    let _guard = init_logging();

    let config = MazeConfig::from_args(std::env::args().skip(1))?;
    tracing::info!("Starting with {:?}", config);

    let maze = load_maze(&config)?;
    println!("{maze}");
    println!();

    let mut search = Search::new(config.solver);
    search.initialize(&maze, maze.start(), maze.end())?;
    let mut steps = 0usize;
    loop {
        steps += 1;
        match search.step()? {
            StepOutcome::Progress { current } => {
                tracing::debug!("[step {}] expanded {:?}", steps, current);
            }
            StepOutcome::Skipped { current } => {
                tracing::debug!("[step {}] skipped visited {:?}", steps, current);
            }
            StepOutcome::Found | StepOutcome::Exhausted => break,
        }
    }

    println!("Solver: {}", search.solver());
    match search.path() {
        Some(path) => {
            println!("Path ({} cells, {} steps): {}", path.len(), steps, format_path(path));
        }
        None => println!("No path found after {steps} steps."),
    }
    tracing::info!("Finished with status {:?}", search.status());
    Ok(())
}
